//! Core data models for mg5batch
//!
//! Process definitions with their run cards, and the request/result
//! records exchanged with batch submitters.

pub mod batch_job;
pub mod process_definition;
pub mod run_card;

// Re-exports for convenience
pub use batch_job::{JobOutput, JobRequest};
pub use process_definition::ProcessDefinition;
pub use run_card::{CardValue, RunCard};
