//! Local Execution
//!
//! Runs jobs as `sh -c <command>` on this machine. The queue is ignored;
//! captured output is written to the job's log once it exits, mirroring
//! what the scheduler would leave behind.

use async_trait::async_trait;
use std::path::PathBuf;
use std::process::Stdio;
use tokio::process::Command;

use super::{BatchSubmitter, JobHandle, SpawnedJob};
use crate::error::{Error, Result};
use crate::models::JobRequest;

/// Runs jobs directly instead of through a scheduler
pub struct LocalSubmitter {
    shell: PathBuf,
}

impl LocalSubmitter {
    pub fn new() -> Self {
        Self {
            shell: PathBuf::from("sh"),
        }
    }
}

impl Default for LocalSubmitter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BatchSubmitter for LocalSubmitter {
    async fn submit(&self, request: &JobRequest) -> Result<Box<dyn JobHandle>> {
        debug!(
            "Running {} locally (queue '{}' ignored)",
            request.name, request.queue
        );

        let child = Command::new(&self.shell)
            .arg("-c")
            .arg(&request.command)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| Error::CommandSpawnFailed {
                command: request.command.clone(),
                reason: e.to_string(),
            })?;

        info!("Started {} (pid {:?})", request.name, child.id());
        Ok(Box::new(SpawnedJob::new(
            request.name.clone(),
            child,
            Some(request.output_log.clone()),
        )))
    }
}
