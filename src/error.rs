//! Error types and Result aliases for mg5batch

use std::fmt;
use std::path::PathBuf;

use crate::config::ConfigError;

/// Result type alias for mg5batch operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for mg5batch
#[derive(Debug)]
pub enum Error {
    // === Process table errors ===
    /// Requested channel is not in the process table
    UnknownChannel {
        channel: String,
    },

    /// HT thresholds are not strictly increasing
    InvalidThresholds {
        thresholds: Vec<u32>,
        reason: String,
    },

    // === Batch errors ===
    /// Failed to spawn the submission process
    CommandSpawnFailed {
        command: String,
        reason: String,
    },

    /// Failed to hand the job script to the submitter
    JobScriptWriteFailed {
        job: String,
        reason: String,
    },

    /// Waiting on a submitted job failed
    JobWaitFailed {
        job: String,
        reason: String,
    },

    // === Generation errors ===
    /// Failed to prepare a process for generation
    InitializationFailed {
        process: String,
        path: PathBuf,
        reason: String,
    },

    // === Configuration errors ===
    /// Failed to load configuration file
    ConfigLoadFailed {
        path: PathBuf,
        reason: String,
    },

    /// Failed to parse configuration
    ConfigParseFailed {
        format: String,
        reason: String,
    },

    /// Failed to serialize configuration
    ConfigSerializationFailed {
        format: String,
        reason: String,
    },

    /// Configuration validation failed
    ConfigValidationFailed(ConfigError),

    // === I/O and serialization errors ===
    /// I/O errors
    Io(std::io::Error),

    /// Serialization errors
    Serde(serde_json::Error),

    /// TOML parsing errors
    Toml(toml::de::Error),

    /// Regex compilation errors
    Regex(regex::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // Process table errors
            Error::UnknownChannel { channel } => {
                write!(f, "Unknown channel '{}'", channel)
            }
            Error::InvalidThresholds { thresholds, reason } => {
                write!(f, "Invalid HT thresholds {:?}: {}", thresholds, reason)
            }

            // Batch errors
            Error::CommandSpawnFailed { command, reason } => {
                write!(f, "Failed to spawn command '{}': {}", command, reason)
            }
            Error::JobScriptWriteFailed { job, reason } => {
                write!(f, "Failed to write job script for '{}': {}", job, reason)
            }
            Error::JobWaitFailed { job, reason } => {
                write!(f, "Failed to wait on job '{}': {}", job, reason)
            }

            // Generation errors
            Error::InitializationFailed {
                process,
                path,
                reason,
            } => {
                write!(
                    f,
                    "Failed to initialize process '{}' at '{}': {}",
                    process,
                    path.display(),
                    reason
                )
            }

            // Configuration errors
            Error::ConfigLoadFailed { path, reason } => {
                write!(f, "Failed to load config from '{}': {}", path.display(), reason)
            }
            Error::ConfigParseFailed { format, reason } => {
                write!(f, "Failed to parse {} config: {}", format, reason)
            }
            Error::ConfigSerializationFailed { format, reason } => {
                write!(f, "Failed to serialize config as {}: {}", format, reason)
            }
            Error::ConfigValidationFailed(err) => {
                write!(f, "Configuration validation failed: {}", err)
            }

            // I/O and serialization errors
            Error::Io(err) => write!(f, "I/O error: {}", err),
            Error::Serde(err) => write!(f, "Serialization error: {}", err),
            Error::Toml(err) => write!(f, "TOML parsing error: {}", err),
            Error::Regex(err) => write!(f, "Regex compilation error: {}", err),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::ConfigValidationFailed(err) => Some(err),
            Error::Io(err) => Some(err),
            Error::Serde(err) => Some(err),
            Error::Toml(err) => Some(err),
            Error::Regex(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serde(err)
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Toml(err)
    }
}

impl From<regex::Error> for Error {
    fn from(err: regex::Error) -> Self {
        Error::Regex(err)
    }
}

impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Self {
        Error::ConfigValidationFailed(err)
    }
}
