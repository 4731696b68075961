//! Bookkeeping for degraded stages.
//!
//! A run never stops on a model failure; these types let a caller find out
//! afterwards whether, and where, the content was contaminated.

use crate::core::StageKind;
use crate::stages::StageReport;
use serde::{Deserialize, Serialize};

/// One degraded stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DegradationRecord {
    /// Stage that degraded.
    pub stage: StageKind,
    /// Cause reported by the gateway.
    pub error: String,
}

/// Summary of degradations during one run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DegradationSummary {
    /// Number of stages executed.
    pub total_stages: usize,
    /// Degraded stages in execution order.
    pub degraded: Vec<DegradationRecord>,
}

impl DegradationSummary {
    /// Builds a summary from stage reports.
    #[must_use]
    pub fn from_reports(reports: &[StageReport]) -> Self {
        Self {
            total_stages: reports.len(),
            degraded: reports
                .iter()
                .filter(|r| r.is_degraded())
                .map(|r| DegradationRecord {
                    stage: r.stage,
                    error: r.error.clone().unwrap_or_default(),
                })
                .collect(),
        }
    }

    /// Returns true if any stage degraded.
    #[must_use]
    pub fn has_degradations(&self) -> bool {
        !self.degraded.is_empty()
    }

    /// The first stage that degraded. Every later stage consumed its placeholder.
    #[must_use]
    pub fn first_degraded(&self) -> Option<StageKind> {
        self.degraded.first().map(|r| r.stage)
    }

    /// Fraction of stages that got real model output.
    #[must_use]
    pub fn success_rate(&self) -> f64 {
        if self.total_stages == 0 {
            return 0.0;
        }
        (self.total_stages - self.degraded.len()) as f64 / self.total_stages as f64
    }
}
