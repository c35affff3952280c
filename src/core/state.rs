//! Execution state models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Overall pipeline execution status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExecutionStatus {
    /// Pipeline has not started
    Pending,
    /// Pipeline is currently running
    Running,
    /// Every stage completed
    Completed,
    /// A stage failed and execution stopped
    Failed,
}

/// Overall pipeline state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineState {
    /// Unique execution ID
    pub execution_id: Uuid,

    /// Current execution status
    pub status: ExecutionStatus,

    /// When execution started
    pub started_at: Option<DateTime<Utc>>,

    /// When execution completed/failed
    pub completed_at: Option<DateTime<Utc>>,

    /// Total number of stages
    pub total_stages: usize,

    /// Number of stages that ran to completion
    pub completed_stages: usize,

    /// Index of the stage that failed, if any
    pub failed_stage: Option<usize>,
}

impl PipelineState {
    /// Create a new pipeline state
    pub fn new() -> Self {
        Self {
            execution_id: Uuid::new_v4(),
            status: ExecutionStatus::Pending,
            started_at: None,
            completed_at: None,
            total_stages: 0,
            completed_stages: 0,
            failed_stage: None,
        }
    }

    /// Mark pipeline as started
    pub fn start(&mut self, total_stages: usize) {
        self.status = ExecutionStatus::Running;
        self.started_at = Some(Utc::now());
        self.total_stages = total_stages;
        self.completed_stages = 0;
        self.failed_stage = None;
    }

    /// Record one finished stage
    pub fn stage_completed(&mut self) {
        self.completed_stages += 1;
    }

    /// Mark pipeline as completed
    pub fn complete(&mut self) {
        self.status = ExecutionStatus::Completed;
        self.completed_at = Some(Utc::now());
    }

    /// Mark pipeline as failed at the given stage
    pub fn fail(&mut self, index: usize) {
        self.status = ExecutionStatus::Failed;
        self.failed_stage = Some(index);
        self.completed_at = Some(Utc::now());
    }

    /// Wall-clock seconds between start and completion
    pub fn elapsed_secs(&self) -> Option<f64> {
        let started = self.started_at?;
        let finished = self.completed_at?;
        Some(finished.signed_duration_since(started).num_microseconds()? as f64 / 1e6)
    }

    /// Calculate progress (0.0 to 1.0)
    pub fn progress(&self) -> f64 {
        if self.total_stages == 0 {
            return 1.0;
        }
        self.completed_stages as f64 / self.total_stages as f64
    }
}

impl Default for PipelineState {
    fn default() -> Self {
        Self::new()
    }
}
