//! Pipeline assembly and execution

pub mod resolver;
pub mod runner;

pub use resolver::{ResolvedStage, StageResolver};
pub use runner::{RunError, RunOptions, RunOutcome, Runner};
