//! Main runner - load configuration, assemble the pipeline, execute it

use crate::core::{
    config::{ConfigError, PipelineConfig},
    pipeline::{Pipeline, PipelineError},
    registry::{ResolveError, StageRegistry},
    stage::PipelineData,
};
use crate::execution::resolver::StageResolver;
use crate::logging::{Logger, LoggingContext};
use std::path::PathBuf;
use thiserror::Error;

/// Name the runner logs under
pub const RUNNER_LOGGER: &str = "runner";

/// Any failure between reading the configuration and finishing execution
#[derive(Debug, Error)]
pub enum RunError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error(transparent)]
    Pipeline(#[from] PipelineError),
}

/// Global options supplied on the command line
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Path to the YAML configuration
    pub config: PathBuf,

    /// Default for every stage's `interactive` option
    pub interactive: bool,
}

/// A finished run
#[derive(Debug)]
pub struct RunOutcome {
    pub pipeline: Pipeline,
    pub data: Vec<PipelineData>,
}

/// Ties the registry and the logging context together
pub struct Runner<'a> {
    registry: &'a StageRegistry,
    logging: &'a LoggingContext,
    logger: Logger,
}

impl<'a> Runner<'a> {
    pub fn new(registry: &'a StageRegistry, logging: &'a LoggingContext) -> Self {
        Self {
            registry,
            logging,
            logger: Logger::new(RUNNER_LOGGER, logging),
        }
    }

    pub fn logger(&self) -> &Logger {
        &self.logger
    }

    /// Read and validate the configuration file
    pub fn load(&self, options: &RunOptions) -> Result<PipelineConfig, RunError> {
        let config = PipelineConfig::from_file(&options.config)?;
        let rendered = serde_json::to_string(&config).unwrap_or_else(|_| format!("{:?}", config));
        self.logger.info(format!("Input configuration: {}", rendered));
        Ok(config)
    }

    /// Resolve every stage and build the pipeline without running it
    pub fn assemble(&self, config: &PipelineConfig, interactive: bool) -> Result<Pipeline, RunError> {
        let specs = config.stages()?;
        let resolver = StageResolver::new(self.registry, self.logging, interactive);
        let (stages, options) = resolver.resolve_all(&specs, &self.logger)?;

        let pipeline = Pipeline::new(stages, options, self.logging)?;
        self.logger
            .info(format!("Loaded {} with {} items", pipeline, pipeline.len()));
        Ok(pipeline)
    }

    /// Load, assemble and execute once
    pub fn run(&self, options: &RunOptions) -> Result<RunOutcome, RunError> {
        let config = self.load(options)?;
        let mut pipeline = self.assemble(&config, options.interactive)?;

        self.logger
            .info(format!("Calling \"execute\" on {}", pipeline));
        let data = pipeline.execute()?;

        Ok(RunOutcome { pipeline, data })
    }
}
