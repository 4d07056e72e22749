//! Batch Job Submission
//!
//! A submitter queues a [`JobRequest`] and hands back a [`JobHandle`];
//! awaiting the handle yields the job's captured output. Callers submit a
//! whole batch first and only then join the handles with [`wait_all`].
//!
//! Two backends are provided:
//!
//! - [`PbsSubmitter`] - blocking `qsub` submissions to a PBS/Torque queue
//! - [`LocalSubmitter`] - runs the command on this machine via `sh -c`

pub mod local;
pub mod pbs;

pub use local::LocalSubmitter;
pub use pbs::PbsSubmitter;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures::future::join_all;
use std::borrow::Cow;
use std::path::PathBuf;
use tokio::process::Child;

use crate::config::{BatchBackend, BatchConfig};
use crate::error::{Error, Result};
use crate::models::{JobOutput, JobRequest};

/// A submitted job that can be waited on exactly once
#[async_trait]
pub trait JobHandle: Send {
    /// Name the job was submitted under
    fn name(&self) -> &str;

    /// Wait for the job to finish and collect its output
    async fn wait(self: Box<Self>) -> Result<JobOutput>;
}

/// Queues jobs with some scheduler
///
/// Implementations must not block on the job itself inside `submit`;
/// completion is only observed through the returned handle.
#[async_trait]
pub trait BatchSubmitter: Send + Sync {
    /// Submit one job
    ///
    /// # Errors
    /// Returns an error if the scheduler cannot be reached or the job
    /// script cannot be handed over
    async fn submit(&self, request: &JobRequest) -> Result<Box<dyn JobHandle>>;
}

/// Build the submitter selected by the configuration
pub fn submitter_for(config: &BatchConfig) -> Result<Box<dyn BatchSubmitter>> {
    match config.backend {
        BatchBackend::Pbs => Ok(Box::new(PbsSubmitter::new(
            config.qsub.clone(),
            config.qsub_args.clone(),
        )?)),
        BatchBackend::Local => Ok(Box::new(LocalSubmitter::new())),
    }
}

/// Quote `arg` for inclusion in a `sh` command line
pub fn shell_quote(arg: &str) -> Cow<'_, str> {
    let plain = !arg.is_empty()
        && arg
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "-_./=:,+@%".contains(c));
    if plain {
        Cow::Borrowed(arg)
    } else {
        Cow::Owned(format!("'{}'", arg.replace('\'', r"'\''")))
    }
}

/// Wait on every handle and return each result in submission order
///
/// All handles are driven concurrently so that no job stalls on a full
/// output pipe while an earlier one is still running. A failed wait does
/// not affect the other jobs.
pub async fn join_each(handles: Vec<Box<dyn JobHandle>>) -> Vec<Result<JobOutput>> {
    debug!("Waiting on {} jobs", handles.len());
    join_all(handles.into_iter().map(|h| h.wait())).await
}

/// Wait on every handle and return the outputs in submission order, or the
/// first error once all jobs have been joined
pub async fn wait_all(handles: Vec<Box<dyn JobHandle>>) -> Result<Vec<JobOutput>> {
    join_each(handles).await.into_iter().collect()
}

/// Handle for a job backed by a spawned child process
pub struct SpawnedJob {
    name: String,
    child: Child,
    started_at: DateTime<Utc>,
    /// Also write the captured output here once the process exits
    tee_log: Option<PathBuf>,
}

impl SpawnedJob {
    pub(crate) fn new(name: String, child: Child, tee_log: Option<PathBuf>) -> Self {
        Self {
            name,
            child,
            started_at: Utc::now(),
            tee_log,
        }
    }
}

#[async_trait]
impl JobHandle for SpawnedJob {
    fn name(&self) -> &str {
        &self.name
    }

    async fn wait(self: Box<Self>) -> Result<JobOutput> {
        let SpawnedJob {
            name,
            child,
            started_at,
            tee_log,
        } = *self;

        let output = child
            .wait_with_output()
            .await
            .map_err(|e| Error::JobWaitFailed {
                job: name.clone(),
                reason: e.to_string(),
            })?;

        let job_output = JobOutput {
            name,
            exit_code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            started_at,
            finished_at: Utc::now(),
        };

        if let Some(log) = tee_log {
            let mut content = job_output.stdout.clone();
            content.push_str(&job_output.stderr);
            if let Err(e) = tokio::fs::write(&log, content).await {
                warn!(
                    "Job {}: failed to write log {}: {}",
                    job_output.name,
                    log.display(),
                    e
                );
            }
        }

        if job_output.succeeded() {
            debug!("Job {} finished", job_output.name);
        } else {
            warn!(
                "Job {} exited with code {:?}",
                job_output.name, job_output.exit_code
            );
        }

        Ok(job_output)
    }
}
