//! Integration Tests for the Generation Runner
//!
//! Drives the runner against a recording submitter and checks what ends up
//! on disk and in the queue.

#[path = "../test_utils/mod.rs"]
mod test_utils;

use std::fs;
use tempfile::TempDir;

use mg5batch::config::GenerationConfig;
use mg5batch::generation::STALE_INTERMEDIATE;
use mg5batch::htsplit::{split, DEFAULT_THRESHOLDS};
use mg5batch::{JobRunner, ProcessDefinition, ProcessTable};
use test_utils::RecordingSubmitter;

fn config_in(temp_dir: &TempDir) -> GenerationConfig {
    GenerationConfig {
        work_dir: temp_dir.path().to_path_buf(),
        ..GenerationConfig::default()
    }
}

#[tokio::test]
async fn test_empty_run_submits_nothing() {
    let temp_dir = TempDir::new().unwrap();
    let config = config_in(&temp_dir);
    let submitter = RecordingSubmitter::new();
    let runner = JobRunner::new(&config, &submitter);

    let mut procs: Vec<ProcessDefinition> = Vec::new();
    let summary = runner.run(&mut procs, 50000).await.unwrap();

    assert_eq!(summary.jobs(), 0);
    assert!(submitter.requests().is_empty());
}

#[tokio::test]
async fn test_one_job_per_bin_in_order() {
    let temp_dir = TempDir::new().unwrap();
    let config = config_in(&temp_dir);
    let submitter = RecordingSubmitter::new();
    let runner = JobRunner::new(&config, &submitter);

    let wbb = ProcessTable::standard().get("Wbb").unwrap();
    let mut bins = split(&wbb, &DEFAULT_THRESHOLDS);
    let summary = runner.run(&mut bins, 1000).await.unwrap();

    let requests = submitter.requests();
    assert_eq!(requests.len(), 5);
    assert_eq!(summary.jobs(), 5);
    assert_eq!(requests[0].name, "mg5.Wbb_ihtmin0000_ihtmax0400");
    assert_eq!(requests[4].name, "mg5.Wbb_ihtmin3200");
    assert!(requests.iter().all(|r| r.queue == "medium6"));

    // Every handle was joined
    let waited = submitter.waited();
    assert_eq!(waited.len(), 5);
    let names: Vec<String> = requests.iter().map(|r| r.name.clone()).collect();
    assert_eq!(waited, names);
}

#[tokio::test]
async fn test_scripts_written_with_event_count() {
    let temp_dir = TempDir::new().unwrap();
    let config = config_in(&temp_dir);
    let submitter = RecordingSubmitter::new();
    let runner = JobRunner::new(&config, &submitter);

    let zh = ProcessTable::standard().get("ZH").unwrap();
    let mut bins = split(&zh, &[0, 400]);
    runner.run(&mut bins, 777).await.unwrap();

    for bin in &bins {
        assert_eq!(bin.run_card().get_int("nevents"), Some(777));
    }

    let first = fs::read_to_string(temp_dir.path().join("ZH_ihtmin0000_ihtmax0400.mg5")).unwrap();
    assert!(first.starts_with("set automatic_html_opening False\n"));
    assert!(first.contains("output ZH_ihtmin0000_ihtmax0400\n"));
    assert!(first.contains("set nevents 777\n"));
    assert!(first.contains("set ihtmin 0\n"));
    assert!(first.contains("set ihtmax 400\n"));

    let last = fs::read_to_string(temp_dir.path().join("ZH_ihtmin0400.mg5")).unwrap();
    assert!(last.contains("set ihtmin 400\n"));
    assert!(last.contains("set ihtmax -1\n"));
}

#[tokio::test]
async fn test_stale_intermediate_removed() {
    let temp_dir = TempDir::new().unwrap();
    let stale = temp_dir.path().join(STALE_INTERMEDIATE);
    fs::write(&stale, "leftover").unwrap();

    let config = config_in(&temp_dir);
    let submitter = RecordingSubmitter::new();
    let runner = JobRunner::new(&config, &submitter);

    let mut procs = vec![ProcessDefinition::new("WH", "generate p p > w+ h")];
    runner.run(&mut procs, 10).await.unwrap();

    assert!(!stale.exists());
}

#[tokio::test]
async fn test_unwritable_work_dir_aborts_before_submission() {
    let temp_dir = TempDir::new().unwrap();
    // A regular file where the work directory should be
    let blocker = temp_dir.path().join("not_a_dir");
    fs::write(&blocker, "").unwrap();

    let config = GenerationConfig {
        work_dir: blocker,
        ..GenerationConfig::default()
    };
    let submitter = RecordingSubmitter::new();
    let runner = JobRunner::new(&config, &submitter);

    let mut procs = vec![ProcessDefinition::new("WH", "generate p p > w+ h")];
    let result = runner.run(&mut procs, 10).await;

    assert!(matches!(
        result,
        Err(mg5batch::Error::InitializationFailed { .. })
    ));
    assert!(submitter.requests().is_empty());
}
