//! runrivet-pbs - run the Rivet analysis over HepMC event files

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing::info;

use mg5batch::batch::submitter_for;
use mg5batch::config::BatchBackend;
use mg5batch::{init_logging, AnalysisRunner, ConfigLoader};

#[derive(Parser, Debug)]
#[command(name = "runrivet-pbs")]
#[command(about = "Submit one Rivet job per HepMC event file")]
#[command(version)]
struct Cli {
    /// HepMC event files
    files: Vec<String>,

    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Scheduler queue (overrides configuration)
    #[arg(short, long)]
    queue: Option<String>,

    /// Run jobs on this machine instead of submitting them
    #[arg(long)]
    local: bool,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    init_logging(cli.debug);

    if cli.files.is_empty() {
        // Nothing requested is not an error
        println!("no hepmc output specified");
        return Ok(ExitCode::SUCCESS);
    }

    let mut config = ConfigLoader::load(cli.config.as_deref()).context("loading configuration")?;
    if let Some(queue) = cli.queue {
        config.analysis.queue = queue;
    }
    if cli.local {
        config.batch.backend = BatchBackend::Local;
    }

    let submitter = submitter_for(&config.batch)?;
    let runner = AnalysisRunner::new(&config.analysis, submitter.as_ref());
    let summary = runner.run(cli.files.as_slice()).await?;

    info!(
        "{} analysis jobs finished, {} files skipped",
        summary.outputs.len(),
        summary.skipped.len()
    );
    Ok(ExitCode::SUCCESS)
}
