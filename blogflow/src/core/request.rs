//! The brief a caller submits to the pipeline.

use crate::errors::RequestValidationError;
use crate::utils::{synthesize_task_id, Clock};
use serde::{Deserialize, Serialize};

/// Default article length in words.
pub const DEFAULT_WORD_COUNT: u32 = 4000;

fn default_word_count() -> u32 {
    DEFAULT_WORD_COUNT
}

/// A request to produce one article.
///
/// Field names on the wire follow the job API (`blog_topic`,
/// `requester_email`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationRequest {
    /// Article topic. Must be non-empty.
    #[serde(rename = "blog_topic")]
    pub topic: String,
    /// Comma-separated search keywords.
    #[serde(default)]
    pub primary_keywords: String,
    /// Who the article is written for.
    #[serde(default)]
    pub target_audience: String,
    /// Closing call to action, quoted verbatim in the draft prompt.
    #[serde(default)]
    pub call_to_action: String,
    /// Target length in words.
    #[serde(default = "default_word_count")]
    pub desired_word_count: u32,
    /// Identity of the requester (an email address in the job API).
    #[serde(rename = "requester_email", default)]
    pub requester: String,
    /// Caller supplied task id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_id: Option<String>,
    /// Planned publication date, passed through untouched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publish_date: Option<String>,
}

impl GenerationRequest {
    /// Creates a request for `topic` with default fields.
    #[must_use]
    pub fn new(topic: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            primary_keywords: String::new(),
            target_audience: String::new(),
            call_to_action: String::new(),
            desired_word_count: DEFAULT_WORD_COUNT,
            requester: String::new(),
            task_id: None,
            publish_date: None,
        }
    }

    /// Sets the keywords.
    #[must_use]
    pub fn with_keywords(mut self, keywords: impl Into<String>) -> Self {
        self.primary_keywords = keywords.into();
        self
    }

    /// Sets the audience.
    #[must_use]
    pub fn with_audience(mut self, audience: impl Into<String>) -> Self {
        self.target_audience = audience.into();
        self
    }

    /// Sets the call to action.
    #[must_use]
    pub fn with_call_to_action(mut self, cta: impl Into<String>) -> Self {
        self.call_to_action = cta.into();
        self
    }

    /// Sets the desired word count.
    #[must_use]
    pub fn with_word_count(mut self, words: u32) -> Self {
        self.desired_word_count = words;
        self
    }

    /// Sets the requester.
    #[must_use]
    pub fn with_requester(mut self, requester: impl Into<String>) -> Self {
        self.requester = requester.into();
        self
    }

    /// Sets an explicit task id.
    #[must_use]
    pub fn with_task_id(mut self, task_id: impl Into<String>) -> Self {
        self.task_id = Some(task_id.into());
        self
    }

    /// Sets the publish date.
    #[must_use]
    pub fn with_publish_date(mut self, date: impl Into<String>) -> Self {
        self.publish_date = Some(date.into());
        self
    }

    /// Checks the fields a run cannot start without.
    pub fn validate(&self) -> Result<(), RequestValidationError> {
        if self.topic.trim().is_empty() {
            return Err(RequestValidationError::required("blog_topic", "Blog topic"));
        }
        if self.desired_word_count == 0 {
            return Err(RequestValidationError::new(
                "desired_word_count",
                "Desired word count must be positive",
            ));
        }
        Ok(())
    }

    /// Returns the supplied task id, or synthesizes `BLOG-<timestamp>`.
    ///
    /// An empty string counts as absent.
    #[must_use]
    pub fn resolve_task_id(&self, clock: &dyn Clock) -> String {
        match self.task_id.as_deref() {
            Some(id) if !id.is_empty() => id.to_string(),
            _ => synthesize_task_id(&clock.now()),
        }
    }

    /// Individual keywords, trimmed, empty entries dropped.
    #[must_use]
    pub fn keyword_list(&self) -> Vec<&str> {
        self.primary_keywords
            .split(',')
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::FixedClock;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_empty_topic_rejected() {
        let err = GenerationRequest::new("   ").validate().unwrap_err();
        assert_eq!(err.field, "blog_topic");
    }

    #[test]
    fn test_zero_word_count_rejected() {
        let err = GenerationRequest::new("Topic")
            .with_word_count(0)
            .validate()
            .unwrap_err();
        assert_eq!(err.field, "desired_word_count");
    }

    #[test]
    fn test_valid_request() {
        assert!(GenerationRequest::new("Topic").validate().is_ok());
    }

    #[test]
    fn test_resolve_task_id() {
        let clock = FixedClock::new(Utc.with_ymd_and_hms(2024, 6, 1, 8, 0, 9).unwrap());
        let req = GenerationRequest::new("Topic");
        assert_eq!(req.resolve_task_id(&clock), "BLOG-20240601080009");

        let req = req.with_task_id("custom-42");
        assert_eq!(req.resolve_task_id(&clock), "custom-42");

        let req = GenerationRequest::new("Topic").with_task_id("");
        assert_eq!(req.resolve_task_id(&clock), "BLOG-20240601080009");
    }

    #[test]
    fn test_keyword_list() {
        let req = GenerationRequest::new("Topic").with_keywords("pet travel, dog beaches,, ");
        assert_eq!(req.keyword_list(), vec!["pet travel", "dog beaches"]);
    }

    #[test]
    fn test_deserialize_wire_names_and_defaults() {
        let req: GenerationRequest = serde_json::from_value(serde_json::json!({
            "blog_topic": "Senior Cruises",
            "primary_keywords": "cruise",
            "target_audience": "seniors",
            "call_to_action": "Book now",
            "requester_email": "ops@example.com"
        }))
        .unwrap();
        assert_eq!(req.topic, "Senior Cruises");
        assert_eq!(req.requester, "ops@example.com");
        assert_eq!(req.desired_word_count, DEFAULT_WORD_COUNT);
        assert!(req.task_id.is_none());
    }
}
