//! Processors

use crate::cli::output::format_pipeline_data;
use crate::core::config::StageOptions;
use crate::core::stage::{PipelineData, Stage, StageError};
use crate::logging::Logger;

/// Prints every data item to stdout and passes the data through unchanged
pub struct PrintProcessor {
    logger: Logger,
}

impl PrintProcessor {
    pub fn new(logger: Logger) -> Self {
        Self { logger }
    }
}

impl Stage for PrintProcessor {
    fn name(&self) -> &str {
        self.logger.name()
    }

    fn logger(&self) -> &Logger {
        &self.logger
    }

    fn execute(
        &mut self,
        data: Vec<PipelineData>,
        _options: &StageOptions,
    ) -> Result<Vec<PipelineData>, StageError> {
        self.logger.debug(format!("Printing {} items", data.len()));
        for item in &data {
            println!("{}", format_pipeline_data(item));
        }
        Ok(data)
    }
}
