//! Event Generation Runner
//!
//! Prepares a MadGraph script per process, submits one generation job per
//! process and waits until all of them are done. Submission never waits on
//! a job; the join happens only after the last submission.

use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::batch::{shell_quote, wait_all, BatchSubmitter};
use crate::config::GenerationConfig;
use crate::error::{Error, Result};
use crate::models::{JobOutput, JobRequest, ProcessDefinition};

/// Intermediate file MadGraph leaves in its working directory
pub const STALE_INTERMEDIATE: &str = "py.py";

/// Result of a generation run
#[derive(Debug, Clone, Default)]
pub struct GenerationSummary {
    /// Output of every job, in submission order
    pub outputs: Vec<JobOutput>,
}

impl GenerationSummary {
    /// Number of jobs that ran
    pub fn jobs(&self) -> usize {
        self.outputs.len()
    }
}

/// Drives MadGraph generation for a list of processes
pub struct JobRunner<'a> {
    config: &'a GenerationConfig,
    submitter: &'a dyn BatchSubmitter,
}

impl<'a> JobRunner<'a> {
    pub fn new(config: &'a GenerationConfig, submitter: &'a dyn BatchSubmitter) -> Self {
        Self { config, submitter }
    }

    /// Path of the MadGraph script written for `proc`
    pub fn script_path(&self, proc: &ProcessDefinition) -> PathBuf {
        self.config.work_dir.join(format!("{}.mg5", proc.name()))
    }

    /// Path of the batch log for `proc`
    pub fn log_path(&self, proc: &ProcessDefinition) -> PathBuf {
        self.config.work_dir.join(format!("{}.log", proc.name()))
    }

    /// Batch request that generates events for an initialized `proc`
    pub fn request_for(&self, proc: &ProcessDefinition) -> JobRequest {
        let work_dir = self.config.work_dir.to_string_lossy();
        let mg5 = self.config.mg5_executable.to_string_lossy();
        let command = format!(
            "cd {} && {} {}",
            shell_quote(&work_dir),
            shell_quote(&mg5),
            shell_quote(&format!("{}.mg5", proc.name())),
        );

        JobRequest::new(
            format!("mg5.{}", proc.name()),
            command,
            self.log_path(proc),
            self.config.queue.clone(),
        )
    }

    /// Generate `event_count` events for every process.
    ///
    /// Each process gets its event count and its script written first;
    /// any failure there aborts the run before anything is submitted.
    pub async fn run(
        &self,
        procs: &mut [ProcessDefinition],
        event_count: u64,
    ) -> Result<GenerationSummary> {
        if procs.is_empty() {
            info!("No processes to generate");
            return Ok(GenerationSummary::default());
        }

        let start = Instant::now();

        for proc in procs.iter_mut() {
            proc.set_nevents(event_count);
            self.initialize(proc)?;
        }
        clear_stale_intermediate(&self.config.work_dir)?;

        let mut running = Vec::with_capacity(procs.len());
        for proc in procs.iter() {
            running.push(self.submitter.submit(&self.request_for(proc)).await?);
        }
        info!("Submitted {} generation jobs", running.len());

        let outputs = wait_all(running).await?;

        info!(
            "All event generation complete ({} jobs, {:.1}s)",
            outputs.len(),
            start.elapsed().as_secs_f64()
        );
        Ok(GenerationSummary { outputs })
    }

    /// Write the MadGraph script for `proc`
    fn initialize(&self, proc: &ProcessDefinition) -> Result<()> {
        let path = self.script_path(proc);
        let init_failed = |e: std::io::Error| Error::InitializationFailed {
            process: proc.name().to_string(),
            path: path.clone(),
            reason: e.to_string(),
        };

        std::fs::create_dir_all(&self.config.work_dir).map_err(init_failed)?;
        std::fs::write(&path, proc.mg5_script()).map_err(init_failed)?;

        debug!("Wrote {}", path.display());
        Ok(())
    }
}

/// Remove MadGraph's leftover intermediate file from `work_dir`
fn clear_stale_intermediate(work_dir: &Path) -> Result<()> {
    let path = work_dir.join(STALE_INTERMEDIATE);
    match std::fs::remove_file(&path) {
        Ok(()) => {
            debug!("Removed stale {}", path.display());
            Ok(())
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(Error::InitializationFailed {
            process: STALE_INTERMEDIATE.to_string(),
            path,
            reason: e.to_string(),
        }),
    }
}
