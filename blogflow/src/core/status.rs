//! Stage kind and pipeline state enums.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the four fixed pipeline stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StageKind {
    /// Gathers grounding material for the article.
    Research,
    /// Writes the first full draft from the research.
    Draft,
    /// Rewrites the draft for search and emits the meta marker lines.
    Optimize,
    /// Final copy edit of the optimized body.
    Edit,
}

impl StageKind {
    /// All stages in execution order.
    pub const ALL: [Self; 4] = [Self::Research, Self::Draft, Self::Optimize, Self::Edit];

    /// Gerund phrase used in placeholder text when the stage degrades.
    #[must_use]
    pub fn failure_label(self) -> &'static str {
        match self {
            Self::Research => "generating research",
            Self::Draft => "writing blog content",
            Self::Optimize => "optimizing for SEO",
            Self::Edit => "editing and finalizing",
        }
    }

    /// Renders the placeholder text for a failed stage.
    ///
    /// ```
    /// use blogflow::core::StageKind;
    ///
    /// assert_eq!(
    ///     StageKind::Draft.placeholder("timeout"),
    ///     "Error writing blog content: timeout"
    /// );
    /// ```
    #[must_use]
    pub fn placeholder(self, cause: &str) -> String {
        format!("Error {}: {cause}", self.failure_label())
    }
}

impl fmt::Display for StageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Research => write!(f, "research"),
            Self::Draft => write!(f, "draft"),
            Self::Optimize => write!(f, "optimize"),
            Self::Edit => write!(f, "edit"),
        }
    }
}

/// Position of a run in the linear pipeline state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineState {
    /// Research stage in flight.
    #[default]
    Researching,
    /// Draft stage in flight.
    Drafting,
    /// Optimize stage in flight.
    Optimizing,
    /// Edit stage in flight.
    Editing,
    /// All stages finished.
    Done,
}

impl PipelineState {
    /// The stage executed in this state, if any.
    #[must_use]
    pub fn stage(self) -> Option<StageKind> {
        match self {
            Self::Researching => Some(StageKind::Research),
            Self::Drafting => Some(StageKind::Draft),
            Self::Optimizing => Some(StageKind::Optimize),
            Self::Editing => Some(StageKind::Edit),
            Self::Done => None,
        }
    }

    /// The state that follows this one. `Done` is absorbing.
    #[must_use]
    pub fn advance(self) -> Self {
        match self {
            Self::Researching => Self::Drafting,
            Self::Drafting => Self::Optimizing,
            Self::Optimizing => Self::Editing,
            Self::Editing | Self::Done => Self::Done,
        }
    }

    /// Returns true once every stage has run.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Done)
    }
}

impl fmt::Display for PipelineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Researching => write!(f, "researching"),
            Self::Drafting => write!(f, "drafting"),
            Self::Optimizing => write!(f, "optimizing"),
            Self::Editing => write!(f, "editing"),
            Self::Done => write!(f, "done"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_kind_display() {
        assert_eq!(StageKind::Research.to_string(), "research");
        assert_eq!(StageKind::Draft.to_string(), "draft");
        assert_eq!(StageKind::Optimize.to_string(), "optimize");
        assert_eq!(StageKind::Edit.to_string(), "edit");
    }

    #[test]
    fn test_placeholders() {
        assert_eq!(
            StageKind::Research.placeholder("boom"),
            "Error generating research: boom"
        );
        assert_eq!(
            StageKind::Optimize.placeholder("boom"),
            "Error optimizing for SEO: boom"
        );
        assert_eq!(
            StageKind::Edit.placeholder("boom"),
            "Error editing and finalizing: boom"
        );
    }

    #[test]
    fn test_state_machine_walks_stages_in_order() {
        let mut state = PipelineState::default();
        let mut visited = Vec::new();
        while let Some(stage) = state.stage() {
            visited.push(stage);
            state = state.advance();
        }
        assert_eq!(visited, StageKind::ALL.to_vec());
        assert!(state.is_terminal());
        assert_eq!(state.advance(), PipelineState::Done);
    }

    #[test]
    fn test_stage_kind_serialize() {
        let json = serde_json::to_string(&StageKind::Optimize).unwrap();
        assert_eq!(json, r#""optimize""#);
    }
}
