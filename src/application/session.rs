use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use macroquad::math::{Mat4, Vec2, Vec3};
use rand::SeedableRng;
use rand::rngs::StdRng;

use super::config::SessionConfig;
use super::selector::{LayerSelector, is_drag};
use super::worker::{StepJob, StepOutcome};
use crate::domain::{Algorithm, History, RuleSet};
use crate::error::ConfigError;
use crate::rendering::{Frame, Palette, build_frame};

/// Source of session epochs; every start or restart gets a fresh one
static NEXT_EPOCH: AtomicU64 = AtomicU64::new(1);

fn next_epoch() -> u64 {
    NEXT_EPOCH.fetch_add(1, Ordering::Relaxed)
}

/// One simulation timeline: history, rule snapshot, colors and layer focus.
///
/// The caller owns the session and drives it: `tick` on its timer,
/// `build_frame` every rendered frame, `pick` on pointer release. A restart
/// replaces every piece of state and moves to a new epoch, so step results
/// computed for the old timeline are rejected.
pub struct Session {
    config: SessionConfig,
    rules: Arc<RuleSet>,
    algorithm: Algorithm,
    history: History,
    palette: Palette,
    selector: LayerSelector,
    epoch: u64,
}

impl Session {
    /// Validate the config and seed layer 0
    pub fn new(config: SessionConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let history = seed_history(&config);
        let mut palette = Palette::new(config.grid_size);
        palette.extend_to(history.len());
        let mut selector = LayerSelector::new();
        selector.on_history_len(history.len());
        let epoch = next_epoch();

        log::info!(
            "session {} started: {}x{} grid, {} generations, {}, {} seed, population {}",
            epoch,
            config.grid_size,
            config.grid_size,
            config.max_generations,
            config.rules,
            config.initial_mode,
            history.latest().population(),
        );

        Ok(Self {
            rules: Arc::new(config.rules),
            algorithm: Algorithm::default(),
            config,
            history,
            palette,
            selector,
            epoch,
        })
    }

    /// Throw away the whole timeline and start over with `config`.
    /// On error the current session is left untouched.
    pub fn restart(&mut self, config: SessionConfig) -> Result<(), ConfigError> {
        let algorithm = self.algorithm;
        *self = Self::new(config)?;
        self.algorithm = algorithm;
        Ok(())
    }

    /// Swap the rule for future steps; existing layers are kept as they are
    pub fn set_rules(&mut self, rules: RuleSet) {
        if *self.rules != rules {
            log::debug!("session {}: rules {} -> {}", self.epoch, self.rules, rules);
        }
        self.config.rules = rules;
        self.rules = Arc::new(rules);
    }

    /// Record a new tick period; the caller's timer does the actual pacing
    pub fn set_frame_delay(&mut self, frame_delay: Duration) -> Result<(), ConfigError> {
        if frame_delay.is_zero() {
            return Err(ConfigError::FrameDelay);
        }
        self.config.frame_delay = frame_delay;
        Ok(())
    }

    pub fn set_algorithm(&mut self, algorithm: Algorithm) {
        self.algorithm = algorithm;
    }

    /// The step that would extend the history, or None once it is full
    pub fn next_job(&self) -> Option<StepJob> {
        (!self.history.is_full()).then(|| StepJob {
            epoch: self.epoch,
            grid: Arc::clone(self.history.latest()),
            rules: Arc::clone(&self.rules),
            algorithm: self.algorithm,
        })
    }

    /// Append a finished step. Returns false for results from another epoch
    /// or when the history is already full.
    pub fn complete(&mut self, outcome: StepOutcome) -> bool {
        if outcome.epoch != self.epoch {
            log::warn!(
                "session {}: dropping step result from epoch {}",
                self.epoch,
                outcome.epoch
            );
            return false;
        }
        if outcome.grid.size() != self.history.grid_size() {
            log::warn!("session {}: step result has the wrong grid size", self.epoch);
            return false;
        }
        if !self.history.push(outcome.grid) {
            return false;
        }

        let len = self.history.len();
        self.palette.extend_to(len);
        self.selector.on_history_len(len);
        log::debug!(
            "session {}: layer {} appended, population {}",
            self.epoch,
            len - 1,
            self.history.latest().population()
        );
        true
    }

    /// Step synchronously. True if a layer was appended, false at the cap.
    pub fn tick(&mut self) -> bool {
        match self.next_job() {
            Some(job) => self.complete(job.run()),
            None => false,
        }
    }

    /// Instances for this frame, culled against `view_projection`
    pub fn build_frame(&self, view_projection: &Mat4) -> Frame {
        build_frame(self.history.layers(), &self.palette, view_projection)
    }

    /// Resolve a pointer release into a layer pick.
    ///
    /// `hit` is the world position of the instance under the pointer, as
    /// reported by the renderer's hit test. Drags, empty hits and positions
    /// outside the history are ignored and leave the focus unchanged.
    pub fn pick(&mut self, hit: Option<Vec3>, pointer_down: Vec2, pointer_up: Vec2) -> Option<usize> {
        if is_drag(pointer_down, pointer_up) {
            return None;
        }
        let layer = hit?.y.round();
        if !layer.is_finite() || layer < 0.0 || layer as usize >= self.history.len() {
            return None;
        }

        let layer = layer as usize;
        self.selector.pin(layer);
        log::debug!("session {}: layer {} picked", self.epoch, layer);
        Some(layer)
    }

    pub fn focused_layer(&self) -> usize {
        self.selector.focused()
    }

    pub fn selector(&self) -> &LayerSelector {
        &self.selector
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn rules(&self) -> RuleSet {
        *self.rules
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn is_complete(&self) -> bool {
        self.history.is_full()
    }
}

fn seed_history(config: &SessionConfig) -> History {
    let SessionConfig {
        grid_size,
        soup_density,
        initial_mode,
        ..
    } = *config;
    let seed = match config.seed {
        Some(seed) => initial_mode.seed(grid_size, soup_density, &mut StdRng::seed_from_u64(seed)),
        None => initial_mode.seed(grid_size, soup_density, &mut rand::rng()),
    };
    History::new(seed, config.max_generations)
}
