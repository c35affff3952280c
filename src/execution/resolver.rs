//! Stage resolution: configuration entries to constructed stages

use crate::core::{
    config::{StageOptions, StageSpec},
    registry::{ResolveError, StageRegistry},
    stage::Stage,
};
use crate::logging::{Logger, LoggingContext};

/// A constructed stage together with the options it will run with
pub struct ResolvedStage {
    pub stage: Box<dyn Stage>,
    pub options: StageOptions,
}

/// Resolves validated stage entries through a registry
pub struct StageResolver<'a> {
    registry: &'a StageRegistry,
    logging: &'a LoggingContext,
    interactive: bool,
}

impl<'a> StageResolver<'a> {
    pub fn new(registry: &'a StageRegistry, logging: &'a LoggingContext, interactive: bool) -> Self {
        Self {
            registry,
            logging,
            interactive,
        }
    }

    /// Options a stage runs with: the global interactive flag overlaid by the
    /// stage's own options
    pub fn options_for(&self, spec: &StageSpec) -> StageOptions {
        StageOptions::with_interactive(self.interactive).merged_with(&spec.options)
    }

    /// Construct one stage with a logger attached to the shared context
    pub fn resolve(&self, spec: &StageSpec) -> Result<ResolvedStage, ResolveError> {
        let options = self.options_for(spec);
        let logger = Logger::new(spec.id.stage.as_str(), self.logging);
        let stage = self.registry.construct(&spec.id, logger)?;

        Ok(ResolvedStage { stage, options })
    }

    /// Construct every stage in order, stopping at the first failure
    pub fn resolve_all(
        &self,
        specs: &[StageSpec],
        runner: &Logger,
    ) -> Result<(Vec<Box<dyn Stage>>, Vec<StageOptions>), ResolveError> {
        let mut stages = Vec::with_capacity(specs.len());
        let mut options = Vec::with_capacity(specs.len());

        for spec in specs {
            let resolved = self.resolve(spec)?;
            runner.info(format!("Loaded {}", spec.id));
            stages.push(resolved.stage);
            options.push(resolved.options);
        }

        Ok((stages, options))
    }
}
