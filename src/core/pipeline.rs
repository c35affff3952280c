//! Pipeline domain model and its sequential execution

use crate::core::{
    config::StageOptions,
    stage::{PipelineData, Stage, StageError},
    state::PipelineState,
};
use crate::logging::{Logger, LoggingContext};
use std::fmt;
use thiserror::Error;

/// Name the pipeline logs under
pub const PIPELINE_LOGGER: &str = "Pipeline";

/// Errors raised by pipeline assembly or execution
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Got {stages} stages but {options} option sets")]
    LengthMismatch { stages: usize, options: usize },

    #[error("Stage {index} ({stage}) failed")]
    StageFailed {
        index: usize,
        stage: String,
        #[source]
        source: StageError,
    },
}

/// An ordered collection of stages and the options each one runs with
pub struct Pipeline {
    stages: Vec<Box<dyn Stage>>,
    options: Vec<StageOptions>,
    logger: Logger,

    /// Execution state
    pub state: PipelineState,
}

impl Pipeline {
    /// Create a pipeline from parallel lists of stages and their options
    pub fn new(
        stages: Vec<Box<dyn Stage>>,
        options: Vec<StageOptions>,
        logging: &LoggingContext,
    ) -> Result<Self, PipelineError> {
        if stages.len() != options.len() {
            return Err(PipelineError::LengthMismatch {
                stages: stages.len(),
                options: options.len(),
            });
        }

        Ok(Self {
            stages,
            options,
            logger: Logger::new(PIPELINE_LOGGER, logging),
            state: PipelineState::new(),
        })
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    pub fn stages(&self) -> impl Iterator<Item = &dyn Stage> {
        self.stages.iter().map(|s| s.as_ref())
    }

    pub fn stage_options(&self) -> &[StageOptions] {
        &self.options
    }

    pub fn logger(&self) -> &Logger {
        &self.logger
    }

    /// Run every stage once, in order, threading the data through
    pub fn execute(&mut self) -> Result<Vec<PipelineData>, PipelineError> {
        self.logger.info("Executing \"execute\"");
        self.state.start(self.stages.len());

        let mut data = Vec::new();
        for (index, (stage, options)) in self.stages.iter_mut().zip(&self.options).enumerate() {
            self.logger
                .info(format!("Calling \"execute\" on {}", stage.name()));

            data = match stage.execute(data, options) {
                Ok(data) => data,
                Err(source) => {
                    self.state.fail(index);
                    self.logger.error(format!("{} failed: {}", stage.name(), source));
                    return Err(PipelineError::StageFailed {
                        index,
                        stage: stage.name().to_string(),
                        source,
                    });
                }
            };
            self.state.stage_completed();
        }

        self.state.complete();
        self.logger.info(format!(
            "Executed \"execute\" in {:.3} seconds",
            self.state.elapsed_secs().unwrap_or_default()
        ));

        Ok(data)
    }
}

impl fmt::Display for Pipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", PIPELINE_LOGGER, &self.state.execution_id.to_string()[..8])
    }
}

impl fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pipeline")
            .field("stages", &self.stages.iter().map(|s| s.name()).collect::<Vec<_>>())
            .field("options", &self.options)
            .field("state", &self.state)
            .finish()
    }
}
