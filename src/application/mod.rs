mod cadence;
mod camera;
mod config;
pub mod controls;
mod rule_editor;
mod selector;
mod session;
mod worker;

pub use cadence::Cadence;
pub use camera::OrbitCamera;
pub use config::SessionConfig;
pub use controls::{Command, Outcome};
pub use rule_editor::{RuleEditor, RuleField};
pub use selector::{DRAG_THRESHOLD_PX, LayerSelector, SelectorState, is_drag};
pub use session::Session;
pub use worker::{StepJob, StepOutcome, StepWorker};
