//! Configuration management for mg5batch
//!
//! Settings for event generation, Rivet analysis and the batch backend.
//! Every field has a default, so an empty or partial file is valid.

pub mod loader;

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::htsplit::{validate_thresholds, DEFAULT_THRESHOLDS};
use crate::models::RunCard;

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// MadGraph event generation
    pub generation: GenerationConfig,

    /// Rivet analysis
    pub analysis: AnalysisConfig,

    /// Batch submission backend
    pub batch: BatchConfig,
}

impl Config {
    /// Validate every section
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.generation.validate()?;
        self.analysis.validate()?;
        self.batch.validate()
    }
}

/// Event generation configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// MadGraph executable
    pub mg5_executable: PathBuf,

    /// Directory for scripts, logs and MadGraph output
    pub work_dir: PathBuf,

    /// Events generated per HT bin
    pub events: u64,

    /// HT bin lower edges
    pub thresholds: Vec<u32>,

    /// Scheduler queue for generation jobs
    pub queue: String,

    /// Extra run-card options applied to every process
    pub run_card: RunCard,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            mg5_executable: PathBuf::from("mg5_aMC"),
            work_dir: PathBuf::from("."),
            events: 50000,
            thresholds: DEFAULT_THRESHOLDS.to_vec(),
            queue: "medium6".to_string(),
            run_card: RunCard::new(),
        }
    }
}

impl GenerationConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.mg5_executable.as_os_str().is_empty() {
            return Err(ConfigError::EmptyField("generation.mg5_executable"));
        }
        if self.events == 0 {
            return Err(ConfigError::InvalidEventCount(self.events));
        }
        if validate_thresholds(&self.thresholds).is_err() {
            return Err(ConfigError::InvalidThresholds(self.thresholds.clone()));
        }
        if self.queue.trim().is_empty() {
            return Err(ConfigError::EmptyField("generation.queue"));
        }
        Ok(())
    }
}

/// Rivet analysis configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Rivet executable
    pub rivet_executable: PathBuf,

    /// Rivet analysis name
    pub analysis: String,

    /// Scheduler queue for analysis jobs
    pub queue: String,

    /// Pause between consecutive submissions, in milliseconds
    pub submit_delay_ms: u64,

    /// Suffix of accepted event files
    pub input_suffix: String,

    /// Suffix replacing `input_suffix` for the histogram output
    pub output_suffix: String,

    /// Suffix replacing `input_suffix` for the job log
    pub log_suffix: String,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            rivet_executable: PathBuf::from("rivet"),
            analysis: "MC_BOOSTEDHBB".to_string(),
            queue: "medium6".to_string(),
            submit_delay_ms: 1000,
            input_suffix: ".hepmc".to_string(),
            output_suffix: ".yoda".to_string(),
            log_suffix: ".rivet.log".to_string(),
        }
    }
}

impl AnalysisConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.rivet_executable.as_os_str().is_empty() {
            return Err(ConfigError::EmptyField("analysis.rivet_executable"));
        }
        if self.analysis.trim().is_empty() {
            return Err(ConfigError::EmptyField("analysis.analysis"));
        }
        if self.queue.trim().is_empty() {
            return Err(ConfigError::EmptyField("analysis.queue"));
        }
        for (field, suffix) in [
            ("analysis.input_suffix", &self.input_suffix),
            ("analysis.output_suffix", &self.output_suffix),
            ("analysis.log_suffix", &self.log_suffix),
        ] {
            if suffix.is_empty() {
                return Err(ConfigError::EmptyField(field));
            }
        }
        if self.input_suffix == self.output_suffix || self.input_suffix == self.log_suffix {
            return Err(ConfigError::SuffixCollision(self.input_suffix.clone()));
        }
        Ok(())
    }
}

/// Where jobs are run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BatchBackend {
    /// Submit through `qsub`
    #[default]
    Pbs,
    /// Run directly on this machine
    Local,
}

/// Batch submission configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    /// Backend used for every job
    pub backend: BatchBackend,

    /// `qsub` executable for the PBS backend
    pub qsub: PathBuf,

    /// Extra arguments passed to every `qsub` call
    pub qsub_args: Vec<String>,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            backend: BatchBackend::Pbs,
            qsub: PathBuf::from("qsub"),
            qsub_args: Vec::new(),
        }
    }
}

impl BatchConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.backend == BatchBackend::Pbs && self.qsub.as_os_str().is_empty() {
            return Err(ConfigError::EmptyField("batch.qsub"));
        }
        Ok(())
    }
}

/// Configuration validation errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid event count: {0} (must be greater than 0)")]
    InvalidEventCount(u64),

    #[error("Invalid HT thresholds: {0:?} (must be strictly increasing)")]
    InvalidThresholds(Vec<u32>),

    #[error("Field '{0}' cannot be empty")]
    EmptyField(&'static str),

    #[error("Output suffixes must differ from the input suffix '{0}'")]
    SuffixCollision(String),
}
