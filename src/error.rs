//! Error types for session configuration.

use thiserror::Error;

/// Configuration errors, raised when a session is created or restarted.
///
/// The core never clamps out-of-domain values; callers that want clamping
/// do it before building a [`crate::SessionConfig`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// Grid side length must be at least one cell.
    #[error("grid size must be at least 1, got {0}")]
    GridSize(usize),

    /// History cap must allow at least the seed layer.
    #[error("max generations must be at least 1, got {0}")]
    MaxGenerations(usize),

    /// Neighbor counts live in 0..=8.
    #[error("neighbor count {0} is outside 0..=8")]
    NeighborCount(u8),

    /// A character in rule notation that is not a valid count digit.
    #[error("invalid rule character {0:?}")]
    RuleCharacter(char),

    /// Rule notation that does not look like `B<digits>/S<digits>`.
    #[error("malformed rule notation {0:?}, expected B<digits>/S<digits>")]
    RuleNotation(String),

    /// Soup fill probability must be in (0, 1].
    #[error("soup density must be in (0, 1], got {0}")]
    SoupDensity(f32),

    /// Tick period must be positive.
    #[error("frame delay must be greater than zero")]
    FrameDelay,
}
