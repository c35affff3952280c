//! Core domain models
//!
//! This module defines the configuration schema, the stage abstraction and
//! its registry, and the pipeline that runs stages in order.

pub mod config;
pub mod pipeline;
pub mod registry;
pub mod stage;
pub mod state;

pub use config::{PipelineConfig, StageId, StageOptions, StageSpec};
pub use pipeline::{Pipeline, PipelineError};
pub use registry::{ResolveError, StageFactory, StageRegistry};
pub use stage::{PipelineData, Stage, StageError};
pub use state::{ExecutionStatus, PipelineState};
