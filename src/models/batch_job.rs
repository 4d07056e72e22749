//! Batch Job Model
//!
//! The request handed to a batch submitter and the captured result of a
//! finished job.

use chrono::{DateTime, Utc};
use std::path::PathBuf;

/// Everything a submitter needs to queue one job
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobRequest {
    /// Job name shown by the scheduler
    pub name: String,

    /// Shell command the job runs
    pub command: String,

    /// Where the scheduler writes the job's log
    pub output_log: PathBuf,

    /// Scheduler queue
    pub queue: String,
}

impl JobRequest {
    pub fn new(
        name: impl Into<String>,
        command: impl Into<String>,
        output_log: impl Into<PathBuf>,
        queue: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            command: command.into(),
            output_log: output_log.into(),
            queue: queue.into(),
        }
    }
}

/// Captured result of a finished job
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobOutput {
    /// Job name
    pub name: String,

    /// Exit code (None if terminated by a signal)
    pub exit_code: Option<i32>,

    /// Captured standard output
    pub stdout: String,

    /// Captured standard error
    pub stderr: String,

    /// When the job was submitted
    pub started_at: DateTime<Utc>,

    /// When the wait returned
    pub finished_at: DateTime<Utc>,
}

impl JobOutput {
    /// Whether the job exited with code 0
    pub fn succeeded(&self) -> bool {
        self.exit_code == Some(0)
    }

    /// Wall-clock time between submission and completion
    pub fn elapsed(&self) -> chrono::Duration {
        self.finished_at - self.started_at
    }
}
