//! Mock Batch Submitter
//!
//! Records every request and returns handles that complete immediately
//! with canned output, or with a wait error for jobs marked as failing.

use async_trait::async_trait;
use chrono::Utc;
use std::sync::{Arc, Mutex};

use mg5batch::error::{Error, Result};
use mg5batch::{BatchSubmitter, JobHandle, JobOutput, JobRequest};

/// Submitter that never runs anything
#[derive(Clone, Default)]
pub struct RecordingSubmitter {
    /// Requests in submission order
    pub requests: Arc<Mutex<Vec<JobRequest>>>,
    /// Names of jobs whose handles have been waited on, in wait order
    pub waited: Arc<Mutex<Vec<String>>>,
    /// Names of jobs whose wait fails
    pub failing: Vec<String>,
}

impl RecordingSubmitter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make waiting on the job called `name` fail
    pub fn fail_on(mut self, name: impl Into<String>) -> Self {
        self.failing.push(name.into());
        self
    }

    /// Snapshot of the recorded requests
    pub fn requests(&self) -> Vec<JobRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Snapshot of the waited job names
    pub fn waited(&self) -> Vec<String> {
        self.waited.lock().unwrap().clone()
    }
}

#[async_trait]
impl BatchSubmitter for RecordingSubmitter {
    async fn submit(&self, request: &JobRequest) -> Result<Box<dyn JobHandle>> {
        self.requests.lock().unwrap().push(request.clone());
        Ok(Box::new(CompletedJob {
            name: request.name.clone(),
            waited: Arc::clone(&self.waited),
            fails: self.failing.contains(&request.name),
        }))
    }
}

/// Handle whose job has already finished
pub struct CompletedJob {
    name: String,
    waited: Arc<Mutex<Vec<String>>>,
    fails: bool,
}

#[async_trait]
impl JobHandle for CompletedJob {
    fn name(&self) -> &str {
        &self.name
    }

    async fn wait(self: Box<Self>) -> Result<JobOutput> {
        self.waited.lock().unwrap().push(self.name.clone());
        if self.fails {
            return Err(Error::JobWaitFailed {
                job: self.name,
                reason: "lost by scheduler".to_string(),
            });
        }
        let now = Utc::now();
        Ok(JobOutput {
            stdout: format!("stdout of {}", self.name),
            stderr: String::new(),
            name: self.name,
            exit_code: Some(0),
            started_at: now,
            finished_at: now,
        })
    }
}
