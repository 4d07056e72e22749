//! mg5batch - MadGraph5 HT-binned generation and Rivet analysis on PBS
//!
//! This library builds MadGraph5 scripts for a fixed set of physics
//! channels, splits each channel into HT bins, and drives the resulting
//! generation jobs and the follow-up Rivet analysis jobs through a batch
//! scheduler.
//!
//! ## Module Organization
//!
//! - [`channels`] - Channel table: Standard Model header + per-channel commands
//! - [`htsplit`] - HT bin splitting of process definitions
//! - [`generation`] - Generation runner (script preparation, fan-out, join)
//! - [`analysis`] - Rivet runner over produced event files
//! - [`batch`] - Batch submission backends (PBS, local)
//! - [`models`] - Data structures (ProcessDefinition, RunCard, JobRequest, JobOutput)
//! - [`config`] - Configuration loading and validation
//! - [`mod@error`] - Error types and Result aliases
//!
//! ## Quick Start
//!
//! ```no_run
//! use mg5batch::{batch::LocalSubmitter, htsplit, Config, JobRunner, ProcessTable};
//!
//! # async fn run() -> mg5batch::Result<()> {
//! let config = Config::default();
//! let table = ProcessTable::standard();
//!
//! let wbb = table.get("Wbb")?;
//! let mut bins = htsplit::split(&wbb, &config.generation.thresholds);
//!
//! let submitter = LocalSubmitter::new();
//! let runner = JobRunner::new(&config.generation, &submitter);
//! runner.run(&mut bins, config.generation.events).await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Execution Model
//!
//! The orchestrator is single-threaded. Every batch is submitted in full
//! before any job is waited on; the jobs themselves are independent OS
//! processes owned by the scheduler.

#[macro_use]
extern crate tracing;

pub mod analysis;
pub mod batch;
pub mod channels;
pub mod config;
pub mod error;
pub mod generation;
pub mod htsplit;
pub mod models;

// Re-exports for core functionality
pub use analysis::{AnalysisRunner, AnalysisSummary};
pub use batch::{BatchSubmitter, JobHandle};
pub use channels::ProcessTable;
pub use config::loader::ConfigLoader;
pub use config::Config;
pub use error::{Error, Result};
pub use generation::{GenerationSummary, JobRunner};
pub use models::{CardValue, JobOutput, JobRequest, ProcessDefinition, RunCard};

/// The current version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// The package name from Cargo.toml
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Environment variable enabling debug logging (`1` or `true`)
pub const DEBUG_ENV_VAR: &str = "MG5BATCH_DEBUG";

/// Install the global tracing subscriber.
///
/// `RUST_LOG` takes precedence; otherwise the level is `debug` when
/// `debug` is set or `MG5BATCH_DEBUG` is enabled, and `info` otherwise.
pub fn init_logging(debug: bool) {
    let debug = debug
        || std::env::var(DEBUG_ENV_VAR)
            .map_or(false, |v| v == "1" || v.eq_ignore_ascii_case("true"));
    let log_level = if debug { "debug" } else { "info" };

    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| log_level.to_string());
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(env_filter))
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .try_init();

    debug!("{} v{} logging initialized", NAME, VERSION);
}
