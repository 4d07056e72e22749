//! runmg5-htsplit - generate events for physics channels in HT bins
//!
//! Every selected channel is split into HT bins, one MadGraph job per bin is
//! submitted to the batch queue, and the program returns once all of them
//! have finished.

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing::{debug, error, info};

use mg5batch::batch::submitter_for;
use mg5batch::config::{BatchBackend, Config, ConfigError};
use mg5batch::htsplit::split_all;
use mg5batch::{init_logging, ConfigLoader, JobRunner, ProcessTable};

#[derive(Parser, Debug)]
#[command(name = "runmg5-htsplit")]
#[command(about = "Generate MadGraph5 events per channel, split into HT bins")]
#[command(version)]
struct Cli {
    /// Channels to generate, or `all`
    channels: Vec<String>,

    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Events per HT bin (overrides configuration)
    #[arg(short = 'n', long)]
    events: Option<u64>,

    /// Comma separated HT bin lower edges (overrides configuration)
    #[arg(long, value_delimiter = ',')]
    thresholds: Option<Vec<u32>>,

    /// Run jobs on this machine instead of submitting them
    #[arg(long)]
    local: bool,

    /// List the known channels and exit
    #[arg(long)]
    list: bool,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

/// Apply command-line overrides and re-validate the result
fn apply_overrides(cli: &Cli, config: &mut Config) -> Result<(), ConfigError> {
    if let Some(events) = cli.events {
        config.generation.events = events;
    }
    if let Some(thresholds) = &cli.thresholds {
        config.generation.thresholds = thresholds.clone();
    }
    if cli.local {
        config.batch.backend = BatchBackend::Local;
    }
    config.validate()
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    init_logging(cli.debug);

    let table = ProcessTable::standard();

    if cli.list {
        for name in table.names() {
            println!("{}", name);
        }
        return Ok(ExitCode::SUCCESS);
    }

    if cli.channels.is_empty() {
        // Nothing requested is not an error
        println!("no processes specified.");
        return Ok(ExitCode::SUCCESS);
    }

    let mut config = ConfigLoader::load(cli.config.as_deref()).context("loading configuration")?;
    apply_overrides(&cli, &mut config).context("invalid command-line override")?;

    let mut procs = match table.select(cli.channels.as_slice()) {
        Ok(procs) => procs,
        Err(e) => {
            error!("{}", e);
            return Ok(ExitCode::FAILURE);
        }
    };
    for proc in procs.iter_mut() {
        proc.run_card_mut().merge(&config.generation.run_card);
    }

    let mut bins = split_all(&procs, &config.generation.thresholds);
    {
        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        for bin in &bins {
            writeln!(out, "{}", bin.name())?;
        }
        out.flush()?;
    }
    debug!(
        "{} channels split into {} HT bins",
        procs.len(),
        bins.len()
    );

    let submitter = submitter_for(&config.batch)?;
    let runner = JobRunner::new(&config.generation, submitter.as_ref());
    let summary = runner.run(&mut bins, config.generation.events).await?;

    info!("{} generation jobs finished", summary.jobs());
    println!("all event generation complete.");
    Ok(ExitCode::SUCCESS)
}
