mod algorithm;
mod grid;
mod history;
mod rules;
pub mod seed;

pub use algorithm::{Algorithm, step};
pub use grid::Grid;
pub use history::History;
pub use rules::{CountSet, MAX_NEIGHBORS, RuleSet, all_rules};
pub use seed::InitialMode;
