//! Timing and span attributes for stage execution.

use crate::core::StageKind;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Instant;

/// Attributes describing one stage execution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StageSpanAttributes {
    /// Stage name.
    pub stage: StageKind,
    /// Task the stage belongs to.
    pub task_id: String,
    /// "completed" or "degraded".
    pub status: Option<String>,
    /// Duration in milliseconds.
    pub duration_ms: Option<f64>,
    /// Error message if degraded.
    pub error: Option<String>,
}

impl StageSpanAttributes {
    /// Creates attributes for a stage of `task_id`.
    #[must_use]
    pub fn new(stage: StageKind, task_id: impl Into<String>) -> Self {
        Self {
            stage,
            task_id: task_id.into(),
            status: None,
            duration_ms: None,
            error: None,
        }
    }

    /// Sets the stage status.
    #[must_use]
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// Sets the duration.
    #[must_use]
    pub fn with_duration_ms(mut self, duration_ms: f64) -> Self {
        self.duration_ms = Some(duration_ms);
        self
    }

    /// Sets the error.
    #[must_use]
    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.error = Some(error.into());
        self
    }

    /// Flattens to a JSON payload for event sinks.
    #[must_use]
    pub fn to_event_data(&self) -> serde_json::Value {
        let mut attrs = HashMap::new();
        if let Some(ref v) = self.status {
            attrs.insert("status", serde_json::json!(v));
        }
        if let Some(v) = self.duration_ms {
            attrs.insert("duration_ms", serde_json::json!(v));
        }
        if let Some(ref v) = self.error {
            attrs.insert("error", serde_json::json!(v));
        }
        serde_json::json!(attrs)
    }
}

/// Simple span timing helper.
#[derive(Debug)]
pub struct SpanTimer {
    start: Instant,
}

impl SpanTimer {
    /// Starts a new span timer.
    #[must_use]
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    /// Returns the elapsed time in milliseconds.
    #[must_use]
    pub fn elapsed_ms(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_span_attributes() {
        let attrs = StageSpanAttributes::new(StageKind::Draft, "BLOG-1")
            .with_status("degraded")
            .with_duration_ms(12.5)
            .with_error("quota");

        let data = attrs.to_event_data();
        assert_eq!(data["status"], "degraded");
        assert_eq!(data["duration_ms"], 12.5);
        assert_eq!(data["error"], "quota");
    }

    #[test]
    fn test_empty_attributes_are_empty_object() {
        let data = StageSpanAttributes::new(StageKind::Edit, "t").to_event_data();
        assert_eq!(data, serde_json::json!({}));
    }

    #[test]
    fn test_span_timer() {
        let timer = SpanTimer::start();
        std::thread::sleep(std::time::Duration::from_millis(5));
        assert!(timer.elapsed_ms() >= 5.0);
    }
}
