//! Rivet Analysis Runner
//!
//! Submits one Rivet job per event file. Output and log paths are derived
//! by swapping the event-file suffix. Submissions are spaced out by a fixed
//! delay; all jobs are joined afterwards and their captured output echoed.
//! A job that cannot be waited on is reported after the others are echoed.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::batch::{join_each, shell_quote, BatchSubmitter};
use crate::config::AnalysisConfig;
use crate::error::Result;
use crate::models::{JobOutput, JobRequest};

/// Result of an analysis run
#[derive(Debug, Clone, Default)]
pub struct AnalysisSummary {
    /// Requests that were submitted, in order
    pub submitted: Vec<JobRequest>,

    /// Input files rejected for having the wrong suffix
    pub skipped: Vec<String>,

    /// Output of every job that could be waited on, in submission order
    pub outputs: Vec<JobOutput>,
}

/// Submits Rivet jobs over event files
pub struct AnalysisRunner<'a> {
    config: &'a AnalysisConfig,
    submitter: &'a dyn BatchSubmitter,
}

impl<'a> AnalysisRunner<'a> {
    pub fn new(config: &'a AnalysisConfig, submitter: &'a dyn BatchSubmitter) -> Self {
        Self { config, submitter }
    }

    /// Histogram output and log paths for `event_file`, or `None` if the
    /// file does not carry the input suffix
    pub fn derive_paths(&self, event_file: &str) -> Option<(PathBuf, PathBuf)> {
        let stem = event_file.strip_suffix(self.config.input_suffix.as_str())?;
        Some((
            PathBuf::from(format!("{}{}", stem, self.config.output_suffix)),
            PathBuf::from(format!("{}{}", stem, self.config.log_suffix)),
        ))
    }

    /// Batch request analysing `event_file`, or `None` if it is rejected
    pub fn request_for(&self, event_file: &str) -> Option<JobRequest> {
        let (histograms, log) = self.derive_paths(event_file)?;

        let file_name = Path::new(event_file)
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| event_file.to_string());

        let command = format!(
            "{} --pwd -a {} -H {} {}",
            shell_quote(&self.config.rivet_executable.to_string_lossy()),
            shell_quote(&self.config.analysis),
            shell_quote(&histograms.to_string_lossy()),
            shell_quote(event_file),
        );

        Some(JobRequest::new(
            format!("rivet.{}", file_name),
            command,
            log,
            self.config.queue.clone(),
        ))
    }

    /// Analyse every accepted file in `event_files`
    pub async fn run<S: AsRef<str>>(&self, event_files: &[S]) -> Result<AnalysisSummary> {
        let mut summary = AnalysisSummary::default();
        let mut running = Vec::new();
        let delay = Duration::from_millis(self.config.submit_delay_ms);

        for event_file in event_files {
            let event_file: &str = event_file.as_ref();
            let Some(request) = self.request_for(event_file) else {
                warn!(
                    "Unrecognized file: {}. Please provide a {} file.",
                    event_file, self.config.input_suffix
                );
                summary.skipped.push(event_file.to_string());
                continue;
            };

            if !running.is_empty() && !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }

            running.push(self.submitter.submit(&request).await?);
            summary.submitted.push(request);
        }

        info!(
            "Submitted {} analysis jobs, skipped {} files",
            summary.submitted.len(),
            summary.skipped.len()
        );

        let mut first_error = None;
        for result in join_each(running).await {
            match result {
                Ok(output) => summary.outputs.push(output),
                Err(e) => {
                    error!("{}", e);
                    if first_error.is_none() {
                        first_error = Some(e);
                    }
                }
            }
        }

        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        for output in &summary.outputs {
            writeln!(out, "{}", output.stdout)?;
            writeln!(out, "{}", output.stderr)?;
        }
        out.flush()?;

        match first_error {
            Some(e) => Err(e),
            None => Ok(summary),
        }
    }
}
