//! Lifecycle events emitted while a run progresses.
//!
//! Sinks receive `pipeline.started`, `stage.started`, `stage.completed`,
//! `stage.degraded`, and `pipeline.completed` for every run.

mod sink;

pub use sink::{CollectingEventSink, EventSink, LoggingEventSink, NoOpEventSink};

use crate::core::StageKind;
use crate::utils::iso_timestamp;
use serde::{Deserialize, Serialize};

/// Run accepted and validated.
pub const PIPELINE_STARTED: &str = "pipeline.started";
/// All four stages done and the result assembled.
pub const PIPELINE_COMPLETED: &str = "pipeline.completed";
/// A stage is about to call the model.
pub const STAGE_STARTED: &str = "stage.started";
/// A stage received model output.
pub const STAGE_COMPLETED: &str = "stage.completed";
/// A stage's model call failed and was replaced by placeholder text.
pub const STAGE_DEGRADED: &str = "stage.degraded";

/// One lifecycle event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineEvent {
    /// The event type (e.g., "stage.started").
    #[serde(rename = "type")]
    pub event_type: String,
    /// Task the event belongs to.
    pub task_id: String,
    /// Stage, for stage events.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stage: Option<StageKind>,
    /// When the event occurred (ISO 8601).
    pub timestamp: String,
    /// Event payload.
    #[serde(default)]
    pub data: serde_json::Value,
}

impl PipelineEvent {
    /// Creates a run-level event.
    #[must_use]
    pub fn pipeline(event_type: &str, task_id: &str) -> Self {
        Self {
            event_type: event_type.to_string(),
            task_id: task_id.to_string(),
            stage: None,
            timestamp: iso_timestamp(),
            data: serde_json::Value::Null,
        }
    }

    /// Creates a stage-level event.
    #[must_use]
    pub fn stage(event_type: &str, task_id: &str, stage: StageKind) -> Self {
        Self {
            stage: Some(stage),
            ..Self::pipeline(event_type, task_id)
        }
    }

    /// Attaches a payload.
    #[must_use]
    pub fn with_data(mut self, data: serde_json::Value) -> Self {
        self.data = data;
        self
    }
}
