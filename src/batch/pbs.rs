//! PBS Submission
//!
//! Submits jobs with `qsub -W block=true`, so the `qsub` process itself
//! stays alive until the job finishes and its exit status is the job's.
//! The job script is fed to `qsub` on stdin.

use async_trait::async_trait;
use regex::Regex;
use std::path::PathBuf;
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use super::{BatchSubmitter, JobHandle, SpawnedJob};
use crate::error::{Error, Result};
use crate::models::JobRequest;

/// Submitter for PBS/Torque queues
pub struct PbsSubmitter {
    qsub: PathBuf,
    extra_args: Vec<String>,
    invalid_name_chars: Regex,
}

impl PbsSubmitter {
    pub fn new(qsub: PathBuf, extra_args: Vec<String>) -> Result<Self> {
        Ok(Self {
            qsub,
            extra_args,
            invalid_name_chars: Regex::new(r"[^A-Za-z0-9_.\-]")?,
        })
    }

    /// Job name accepted by PBS: restricted charset, alphabetic first char
    pub fn sanitize_job_name(&self, name: &str) -> String {
        let cleaned = self.invalid_name_chars.replace_all(name, "_");
        match cleaned.chars().next() {
            Some(c) if c.is_ascii_alphabetic() => cleaned.into_owned(),
            _ => format!("j{}", cleaned),
        }
    }

    /// Arguments passed to `qsub` for this request
    pub fn qsub_args(&self, request: &JobRequest) -> Vec<String> {
        let mut args = vec![
            "-N".to_string(),
            self.sanitize_job_name(&request.name),
            "-q".to_string(),
            request.queue.clone(),
            "-o".to_string(),
            request.output_log.to_string_lossy().into_owned(),
            "-j".to_string(),
            "oe".to_string(),
            "-V".to_string(),
            "-W".to_string(),
            "block=true".to_string(),
        ];
        args.extend(self.extra_args.iter().cloned());
        args
    }

    /// Job script run on the execution host
    pub fn job_script(request: &JobRequest) -> String {
        format!(
            "#!/bin/sh\ncd \"${{PBS_O_WORKDIR:-.}}\"\n{}\n",
            request.command
        )
    }
}

#[async_trait]
impl BatchSubmitter for PbsSubmitter {
    async fn submit(&self, request: &JobRequest) -> Result<Box<dyn JobHandle>> {
        let args = self.qsub_args(request);
        debug!("{} {}", self.qsub.display(), args.join(" "));

        let mut child = Command::new(&self.qsub)
            .args(&args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| Error::CommandSpawnFailed {
                command: self.qsub.display().to_string(),
                reason: e.to_string(),
            })?;

        // Closing stdin after the script tells qsub the script is complete.
        let mut stdin = child.stdin.take().ok_or_else(|| Error::JobScriptWriteFailed {
            job: request.name.clone(),
            reason: "qsub stdin not available".to_string(),
        })?;
        stdin
            .write_all(Self::job_script(request).as_bytes())
            .await
            .map_err(|e| Error::JobScriptWriteFailed {
                job: request.name.clone(),
                reason: e.to_string(),
            })?;
        drop(stdin);

        info!("Submitted {} to queue {}", request.name, request.queue);
        Ok(Box::new(SpawnedJob::new(request.name.clone(), child, None)))
    }
}
