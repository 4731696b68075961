//! Tagged result of a single stage.

use super::StageKind;
use crate::errors::ModelCallError;
use serde::{Deserialize, Serialize};

/// What a stage produced.
///
/// A degraded stage still carries text: the placeholder is fed to the next
/// stage verbatim, exactly like successful output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "status")]
pub enum StageOutcome {
    /// The model answered.
    Ok {
        /// Model response text.
        text: String,
    },
    /// The model call failed and was replaced by placeholder text.
    Degraded {
        /// `Error <verb>ing <stage>: <cause>`.
        placeholder: String,
        /// The contained failure.
        cause: ModelCallError,
    },
}

impl StageOutcome {
    /// Successful outcome.
    #[must_use]
    pub fn ok(text: impl Into<String>) -> Self {
        Self::Ok { text: text.into() }
    }

    /// Degraded outcome for `stage` failing with `cause`.
    #[must_use]
    pub fn degraded(stage: StageKind, cause: ModelCallError) -> Self {
        Self::Degraded {
            placeholder: stage.placeholder(&cause.to_string()),
            cause,
        }
    }

    /// Text handed to the next stage.
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Self::Ok { text } => text,
            Self::Degraded { placeholder, .. } => placeholder,
        }
    }

    /// Consumes the outcome, returning the downstream text.
    #[must_use]
    pub fn into_text(self) -> String {
        match self {
            Self::Ok { text } => text,
            Self::Degraded { placeholder, .. } => placeholder,
        }
    }

    /// Returns true if the model call failed.
    #[must_use]
    pub fn is_degraded(&self) -> bool {
        matches!(self, Self::Degraded { .. })
    }

    /// The contained failure, if any.
    #[must_use]
    pub fn cause(&self) -> Option<&ModelCallError> {
        match self {
            Self::Ok { .. } => None,
            Self::Degraded { cause, .. } => Some(cause),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ok_text() {
        let outcome = StageOutcome::ok("body");
        assert_eq!(outcome.text(), "body");
        assert!(!outcome.is_degraded());
        assert!(outcome.cause().is_none());
    }

    #[test]
    fn test_degraded_text_is_placeholder() {
        let outcome = StageOutcome::degraded(StageKind::Research, ModelCallError::network("dns"));
        assert!(outcome.is_degraded());
        assert_eq!(outcome.text(), "Error generating research: dns");
        assert_eq!(outcome.cause().map(|c| c.message.as_str()), Some("dns"));
        assert_eq!(outcome.into_text(), "Error generating research: dns");
    }
}
