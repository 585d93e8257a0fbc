//! User-facing knobs and how they map onto session operations.
//!
//! Bounds here are UI bounds: they are clamped before a config is built,
//! while the session itself only rejects values outside its domain.

use std::ops::RangeInclusive;
use std::time::Duration;

use super::config::SessionConfig;
use super::rule_editor::RuleField;
use super::session::Session;
use crate::domain::RuleSet;
use crate::error::ConfigError;

pub const GRID_SIZE_RANGE: RangeInclusive<usize> = 21..=101;
pub const GRID_SIZE_STEP: usize = 2;
pub const GENERATIONS_RANGE: RangeInclusive<usize> = 4..=128;
pub const GENERATIONS_STEP: usize = 4;
pub const DENSITY_RANGE: RangeInclusive<f32> = 0.05..=1.0;
pub const DENSITY_STEP: f32 = 0.05;
pub const FRAME_DELAY_MS_RANGE: RangeInclusive<u64> = 50..=1000;
pub const FRAME_DELAY_STEP_MS: u64 = 50;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Command {
    Restart,
    ToggleInitialMode,
    DensityUp,
    DensityDown,
    GridSizeUp,
    GridSizeDown,
    GenerationsUp,
    GenerationsDown,
    SetRules(RuleSet),
    /// Focus (or unfocus) one of the rule digit fields
    EditRule(RuleField),
    TogglePause,
    /// Shorter tick period
    SpeedUp,
    SpeedDown,
}

/// What the caller has to do after a command
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Unchanged,
    /// New session: timers and workers of the old one must be replaced
    Restarted,
    RulesChanged,
    /// The caller's rule editor should toggle focus on this field
    Editing(RuleField),
    /// Tick period changed
    Retimed(Duration),
    Paused(bool),
}

/// Apply a command to the session.
/// Knob changes that reseed go through `Session::restart`.
pub fn apply(session: &mut Session, paused: bool, command: Command) -> Result<Outcome, ConfigError> {
    let current = session.config().clone();
    let reseed = |session: &mut Session, config: SessionConfig| {
        session.restart(config).map(|_| Outcome::Restarted)
    };

    match command {
        Command::Restart => reseed(session, current),
        Command::ToggleInitialMode => {
            let mode = current.initial_mode.toggled();
            reseed(session, current.with_initial_mode(mode))
        }
        Command::DensityUp | Command::DensityDown => {
            let delta = if command == Command::DensityUp { DENSITY_STEP } else { -DENSITY_STEP };
            let density = step_density(current.soup_density, delta);
            if density == current.soup_density {
                return Ok(Outcome::Unchanged);
            }
            reseed(session, current.with_soup_density(density))
        }
        Command::GridSizeUp | Command::GridSizeDown => {
            let size = step_grid_size(current.grid_size, command == Command::GridSizeUp);
            if size == current.grid_size {
                return Ok(Outcome::Unchanged);
            }
            reseed(session, current.with_grid_size(size))
        }
        Command::GenerationsUp | Command::GenerationsDown => {
            let cap = step_generations(current.max_generations, command == Command::GenerationsUp);
            if cap == current.max_generations {
                return Ok(Outcome::Unchanged);
            }
            reseed(session, current.with_max_generations(cap))
        }
        Command::SetRules(rules) => {
            session.set_rules(rules);
            Ok(Outcome::RulesChanged)
        }
        Command::EditRule(field) => Ok(Outcome::Editing(field)),
        Command::TogglePause => Ok(Outcome::Paused(!paused)),
        Command::SpeedUp | Command::SpeedDown => {
            let delay = step_frame_delay(current.frame_delay, command == Command::SpeedUp);
            if delay == current.frame_delay {
                return Ok(Outcome::Unchanged);
            }
            session.set_frame_delay(delay)?;
            Ok(Outcome::Retimed(delay))
        }
    }
}

fn step_density(density: f32, delta: f32) -> f32 {
    let stepped = ((density + delta) * 100.0).round() / 100.0;
    stepped.clamp(*DENSITY_RANGE.start(), *DENSITY_RANGE.end())
}

/// Next odd size in range
fn step_grid_size(size: usize, up: bool) -> usize {
    let size = if up { size + GRID_SIZE_STEP } else { size.saturating_sub(GRID_SIZE_STEP) };
    let size = size.clamp(*GRID_SIZE_RANGE.start(), *GRID_SIZE_RANGE.end());
    if size % 2 == 0 { size - 1 } else { size }
}

fn step_generations(cap: usize, up: bool) -> usize {
    let cap = if up { cap + GENERATIONS_STEP } else { cap.saturating_sub(GENERATIONS_STEP) };
    cap.clamp(*GENERATIONS_RANGE.start(), *GENERATIONS_RANGE.end())
}

fn step_frame_delay(delay: Duration, faster: bool) -> Duration {
    let ms = delay.as_millis() as u64;
    let ms = if faster { ms.saturating_sub(FRAME_DELAY_STEP_MS) } else { ms + FRAME_DELAY_STEP_MS };
    Duration::from_millis(ms.clamp(*FRAME_DELAY_MS_RANGE.start(), *FRAME_DELAY_MS_RANGE.end()))
}
