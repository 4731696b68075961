//! Per-stage execution reports.

use crate::core::{StageKind, StageOutcome};
use crate::utils::Timestamp;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Whether a stage got real model output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StageStatus {
    /// The model answered.
    Completed,
    /// The model call failed; placeholder text was used.
    Degraded,
}

impl fmt::Display for StageStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Completed => write!(f, "completed"),
            Self::Degraded => write!(f, "degraded"),
        }
    }
}

/// Record of one stage execution. Carries no stage text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageReport {
    /// Stage that ran.
    pub stage: StageKind,
    /// Outcome status.
    pub status: StageStatus,
    /// When the model call started.
    pub started_at: Timestamp,
    /// Wall time of the model call in milliseconds.
    pub duration_ms: f64,
    /// Length of the text handed downstream, in characters.
    pub output_chars: usize,
    /// Cause when degraded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl StageReport {
    /// Builds a report from a finished outcome.
    #[must_use]
    pub fn from_outcome(
        stage: StageKind,
        outcome: &StageOutcome,
        started_at: Timestamp,
        duration_ms: f64,
    ) -> Self {
        let (status, error) = match outcome.cause() {
            Some(cause) => (StageStatus::Degraded, Some(cause.to_string())),
            None => (StageStatus::Completed, None),
        };
        Self {
            stage,
            status,
            started_at,
            duration_ms,
            output_chars: outcome.text().chars().count(),
            error,
        }
    }

    /// Returns true if the stage degraded.
    #[must_use]
    pub fn is_degraded(&self) -> bool {
        matches!(self.status, StageStatus::Degraded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ModelCallError;
    use chrono::Utc;

    #[test]
    fn test_report_completed() {
        let outcome = StageOutcome::ok("héllo");
        let report = StageReport::from_outcome(StageKind::Research, &outcome, Utc::now(), 3.0);
        assert_eq!(report.status, StageStatus::Completed);
        assert_eq!(report.output_chars, 5);
        assert!(report.error.is_none());
        assert!(!report.is_degraded());
    }

    #[test]
    fn test_report_degraded() {
        let outcome = StageOutcome::degraded(StageKind::Edit, ModelCallError::api("quota"));
        let report = StageReport::from_outcome(StageKind::Edit, &outcome, Utc::now(), 1.0);
        assert!(report.is_degraded());
        assert_eq!(report.error.as_deref(), Some("quota"));
        assert_eq!(report.status.to_string(), "degraded");
    }
}
