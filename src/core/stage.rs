//! Stage domain model

use crate::core::config::StageOptions;
use crate::logging::Logger;
use serde::{Deserialize, Serialize};
use serde_yaml::Value;
use std::path::PathBuf;
use thiserror::Error;

/// Error types for stage construction and execution
#[derive(Debug, Error)]
pub enum StageError {
    #[error("Missing required option '{0}'")]
    MissingOption(String),

    #[error("Option '{option}' must be {expected}")]
    InvalidOption { option: String, expected: &'static str },

    #[error("I/O error on '{}'", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("No input data to process")]
    NoInput,

    #[error("Refusing to overwrite existing file '{}'", .0.display())]
    Exists(PathBuf),

    #[error("{0}")]
    Other(String),
}

/// One item of data flowing between stages
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineData {
    /// Name of the stage that produced the item
    pub name: String,

    /// The payload
    pub data: serde_json::Value,

    /// Optional schema tag describing the payload
    #[serde(default)]
    pub schema: Option<String>,
}

impl PipelineData {
    pub fn new(name: impl Into<String>, data: serde_json::Value) -> Self {
        Self {
            name: name.into(),
            data,
            schema: None,
        }
    }

    pub fn with_schema(mut self, schema: Option<String>) -> Self {
        self.schema = schema;
        self
    }
}

/// A single unit of work in a pipeline
///
/// Stages are constructed by a registry factory which hands them a logger
/// already attached to the shared logging context.
pub trait Stage: Send {
    /// Stage name, used as its logger name
    fn name(&self) -> &str;

    /// The stage's logger
    fn logger(&self) -> &Logger;

    /// Run the stage over the data produced so far and return the new data
    fn execute(
        &mut self,
        data: Vec<PipelineData>,
        options: &StageOptions,
    ) -> Result<Vec<PipelineData>, StageError>;
}

impl StageOptions {
    /// An optional string option
    pub fn get_str(&self, option: &str) -> Result<Option<&str>, StageError> {
        match self.get(option) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(s)) => Ok(Some(s)),
            Some(_) => Err(StageError::InvalidOption {
                option: option.to_string(),
                expected: "a string",
            }),
        }
    }

    /// A required string option
    pub fn require_str(&self, option: &str) -> Result<&str, StageError> {
        self.get_str(option)?
            .ok_or_else(|| StageError::MissingOption(option.to_string()))
    }

    /// A boolean option with a default
    pub fn get_bool(&self, option: &str, default: bool) -> Result<bool, StageError> {
        match self.get(option) {
            None | Some(Value::Null) => Ok(default),
            Some(Value::Bool(b)) => Ok(*b),
            Some(_) => Err(StageError::InvalidOption {
                option: option.to_string(),
                expected: "a boolean",
            }),
        }
    }
}
