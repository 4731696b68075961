//! The terminal artifact of a run.

use crate::utils::Timestamp;
use serde::{Deserialize, Serialize};

/// Structured result handed to delivery once a run completes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationResult {
    /// Supplied or synthesized task id.
    pub task_id: String,
    /// Echoed request topic.
    #[serde(rename = "blog_topic")]
    pub topic: String,
    /// Echoed request audience.
    pub target_audience: String,
    /// Echoed request keywords.
    pub primary_keywords: String,
    /// When the run finished.
    pub completion_time: Timestamp,
    /// Output of the research stage.
    pub research_summary: String,
    /// Output of the edit stage: the publishable body.
    pub blog_draft: String,
    /// Title recovered from the optimize stage's marker line.
    #[serde(rename = "meta_title")]
    pub title: String,
    /// Description recovered from the optimize stage's marker line.
    #[serde(rename = "meta_description")]
    pub description: String,
    /// Whitespace token count of `blog_draft`.
    pub word_count: usize,
}
