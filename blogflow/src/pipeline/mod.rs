//! Pipeline configuration and orchestration.

mod config;
mod failure_tolerance;
mod orchestrator;

pub use config::PipelineConfig;
pub use failure_tolerance::{DegradationRecord, DegradationSummary};
pub use orchestrator::{BlogPipeline, PipelineRun};
