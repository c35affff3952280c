//! Test utility functions for chap

#![allow(dead_code)]

use chap::core::{PipelineData, Stage, StageError, StageOptions, StageRegistry};
use chap::execution::{RunError, RunOptions, RunOutcome, Runner};
use chap::logging::{LogLevel, Logger, LoggingContext, MemoryWriter};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// One recorded call to `execute`
#[derive(Debug, Clone)]
pub struct Call {
    pub stage: String,
    pub options: StageOptions,
    pub logger: Logger,
}

/// Shared log of stage executions
#[derive(Debug, Clone, Default)]
pub struct Recorder {
    calls: Arc<Mutex<Vec<Call>>>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn stage_names(&self) -> Vec<String> {
        self.calls().into_iter().map(|c| c.stage).collect()
    }
}

/// Stage that records its execution and appends its name to the data
pub struct RecordingStage {
    logger: Logger,
    recorder: Recorder,
}

impl Stage for RecordingStage {
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
        self.recorder.calls.lock().unwrap().push(Call {
            stage: self.name().to_string(),
            options: options.clone(),
            logger: self.logger.clone(),
        });
        data.push(PipelineData::new(self.name(), serde_json::json!(data.len())));
        Ok(data)
    }
}

/// Registry with recording stages `group.<name>` for every name given
pub fn recording_registry(group: &str, names: &[&str], recorder: &Recorder) -> StageRegistry {
    let mut registry = StageRegistry::new();
    for name in names {
        let recorder = recorder.clone();
        registry.register(group, name, move |logger| {
            Ok(Box::new(RecordingStage {
                logger,
                recorder: recorder.clone(),
            }))
        });
    }
    registry
}

/// Logging context writing into memory
pub fn capture_logging(level: LogLevel) -> (LoggingContext, MemoryWriter) {
    let writer = MemoryWriter::new();
    (LoggingContext::with_writer(level, writer.clone()), writer)
}

/// Write a configuration file into `dir`
pub fn write_config(dir: &Path, yaml: &str) -> PathBuf {
    let path = dir.join("pipeline.yaml");
    std::fs::write(&path, yaml).unwrap();
    path
}

/// Run a pipeline from YAML text against the given registry
pub fn run_yaml(
    yaml: &str,
    interactive: bool,
    registry: &StageRegistry,
    logging: &LoggingContext,
) -> Result<RunOutcome, RunError> {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(dir.path(), yaml);
    Runner::new(registry, logging).run(&RunOptions {
        config,
        interactive,
    })
}

/// Number of times `needle` occurs in `haystack`
pub fn count(haystack: &str, needle: &str) -> usize {
    haystack.matches(needle).count()
}
