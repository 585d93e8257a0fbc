use std::time::Duration;

use crate::domain::{InitialMode, RuleSet};
use crate::error::ConfigError;

/// Everything needed to start a simulation session.
#[derive(Clone, Debug, PartialEq)]
pub struct SessionConfig {
    /// Side length of each generation grid (odd values keep a true center)
    pub grid_size: usize,
    /// History cap; stepping stops once this many layers exist
    pub max_generations: usize,
    /// Tick period of the simulation timer
    pub frame_delay: Duration,
    pub rules: RuleSet,
    pub initial_mode: InitialMode,
    /// Soup fill probability in (0, 1]
    pub soup_density: f32,
    /// Fixed RNG seed for reproducible soups; None draws from the thread RNG
    pub seed: Option<u64>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            grid_size: 65,
            max_generations: 32,
            frame_delay: Duration::from_millis(200),
            rules: RuleSet::conway(),
            initial_mode: InitialMode::Soup,
            soup_density: 0.15,
            seed: None,
        }
    }
}

impl SessionConfig {
    pub fn with_grid_size(mut self, grid_size: usize) -> Self {
        self.grid_size = grid_size;
        self
    }

    pub fn with_max_generations(mut self, max_generations: usize) -> Self {
        self.max_generations = max_generations;
        self
    }

    pub fn with_frame_delay(mut self, frame_delay: Duration) -> Self {
        self.frame_delay = frame_delay;
        self
    }

    pub fn with_rules(mut self, rules: RuleSet) -> Self {
        self.rules = rules;
        self
    }

    pub fn with_initial_mode(mut self, initial_mode: InitialMode) -> Self {
        self.initial_mode = initial_mode;
        self
    }

    pub fn with_soup_density(mut self, soup_density: f32) -> Self {
        self.soup_density = soup_density;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Check every knob against its domain. Nothing is clamped.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid_size < 1 {
            return Err(ConfigError::GridSize(self.grid_size));
        }
        if self.max_generations < 1 {
            return Err(ConfigError::MaxGenerations(self.max_generations));
        }
        if self.frame_delay.is_zero() {
            return Err(ConfigError::FrameDelay);
        }
        // Written so NaN fails too
        if !(self.soup_density > 0.0 && self.soup_density <= 1.0) {
            return Err(ConfigError::SoupDensity(self.soup_density));
        }
        Ok(())
    }
}
