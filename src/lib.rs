//! chap - a configuration-driven pipeline runner

pub mod cli;
pub mod core;
pub mod execution;
pub mod logging;
pub mod stages;

// Re-export commonly used types
pub use crate::core::{Pipeline, PipelineConfig, PipelineData, Stage, StageError, StageOptions, StageRegistry};
pub use crate::execution::{RunError, RunOptions, Runner};
pub use crate::logging::{LogLevel, Logger, LoggingContext};
