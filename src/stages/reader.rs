//! File readers

use crate::core::config::StageOptions;
use crate::core::stage::{PipelineData, Stage, StageError};
use crate::logging::Logger;
use std::path::Path;

/// Structured text formats understood by readers and writers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Yaml,
    Json,
}

impl FileFormat {
    /// Parse file content into a JSON value
    pub fn parse(self, content: &str) -> Result<serde_json::Value, StageError> {
        Ok(match self {
            FileFormat::Yaml => serde_yaml::from_str(content)?,
            FileFormat::Json => serde_json::from_str(content)?,
        })
    }

    /// Render a value in this format
    pub fn render(self, value: &serde_json::Value) -> Result<String, StageError> {
        Ok(match self {
            FileFormat::Yaml => serde_yaml::to_string(value)?,
            FileFormat::Json => serde_json::to_string_pretty(value)? + "\n",
        })
    }
}

/// Reads `filename` and appends its parsed content to the pipeline data
pub struct Reader {
    format: FileFormat,
    logger: Logger,
}

impl Reader {
    pub fn new(format: FileFormat, logger: Logger) -> Self {
        Self { format, logger }
    }
}

impl Stage for Reader {
    fn name(&self) -> &str {
        self.logger.name()
    }

    fn logger(&self) -> &Logger {
        &self.logger
    }

    fn execute(
        &mut self,
        mut data: Vec<PipelineData>,
        options: &StageOptions,
    ) -> Result<Vec<PipelineData>, StageError> {
        let filename = options.require_str("filename")?;
        let schema = options.get_str("schema")?.map(str::to_string);

        self.logger.info(format!("Reading {}", filename));
        let content = std::fs::read_to_string(filename).map_err(|source| StageError::Io {
            path: Path::new(filename).to_path_buf(),
            source,
        })?;

        let value = self.format.parse(&content)?;
        self.logger.debug(format!("Read {} bytes from {}", content.len(), filename));

        data.push(PipelineData::new(self.name(), value).with_schema(schema));
        Ok(data)
    }
}
