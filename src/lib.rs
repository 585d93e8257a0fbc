// Domain layer - automaton rules, grids, history
pub mod domain;

// Application layer - sessions, layer focus, timing
pub mod application;

// Infrastructure layer - instance building, UI, input
pub mod rendering;
pub mod ui;
pub mod input;

pub mod error;

// Re-exports for convenience
pub use domain::{Grid, History, InitialMode, RuleSet};
pub use application::{OrbitCamera, Session, SessionConfig};
pub use rendering::{Frame, VoxelInstance};
pub use error::ConfigError;
