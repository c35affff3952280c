//! Stage registry
//!
//! Maps `<group>.<stage>` identifiers to factories. Stages are looked up by
//! name at resolution time; unknown names are typed errors.

use crate::core::config::StageId;
use crate::core::stage::{Stage, StageError};
use crate::logging::Logger;
use std::collections::{BTreeMap, HashMap};
use thiserror::Error;

/// Builds a stage around a logger attached to the shared logging context
pub type StageFactory =
    Box<dyn Fn(Logger) -> Result<Box<dyn Stage>, StageError> + Send + Sync>;

/// Errors raised while resolving a stage identifier
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("Unknown stage group '{0}'")]
    UnknownGroup(String),

    #[error("Unknown stage '{stage}' in group '{group}'")]
    UnknownStage { group: String, stage: String },

    #[error("Failed to construct stage '{id}'")]
    Construction {
        id: StageId,
        #[source]
        source: StageError,
    },
}

/// Registry of stage factories, grouped by namespace
#[derive(Default)]
pub struct StageRegistry {
    groups: HashMap<String, HashMap<String, StageFactory>>,
}

impl StageRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding the built-in stages
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        crate::stages::register_builtins(&mut registry);
        registry
    }

    /// Register a factory
    ///
    /// If a stage with the same identifier already exists, it will be replaced.
    pub fn register<F>(&mut self, group: &str, stage: &str, factory: F)
    where
        F: Fn(Logger) -> Result<Box<dyn Stage>, StageError> + Send + Sync + 'static,
    {
        self.groups
            .entry(group.to_string())
            .or_default()
            .insert(stage.to_string(), Box::new(factory));
    }

    /// Check if a stage exists
    pub fn contains(&self, id: &StageId) -> bool {
        self.groups
            .get(&id.group)
            .is_some_and(|stages| stages.contains_key(&id.stage))
    }

    /// Look up the factory for an identifier
    pub fn factory(&self, id: &StageId) -> Result<&StageFactory, ResolveError> {
        let stages = self
            .groups
            .get(&id.group)
            .ok_or_else(|| ResolveError::UnknownGroup(id.group.clone()))?;

        stages.get(&id.stage).ok_or_else(|| ResolveError::UnknownStage {
            group: id.group.clone(),
            stage: id.stage.clone(),
        })
    }

    /// Construct the stage named by `id`
    pub fn construct(&self, id: &StageId, logger: Logger) -> Result<Box<dyn Stage>, ResolveError> {
        let factory = self.factory(id)?;
        factory(logger).map_err(|source| ResolveError::Construction {
            id: id.clone(),
            source,
        })
    }

    /// All registered identifiers, grouped and sorted
    pub fn list(&self) -> BTreeMap<String, Vec<String>> {
        self.groups
            .iter()
            .map(|(group, stages)| {
                let mut names: Vec<_> = stages.keys().cloned().collect();
                names.sort();
                (group.clone(), names)
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.groups.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
