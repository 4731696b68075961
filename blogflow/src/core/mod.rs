//! Core domain model types for blogflow.
//!
//! This module contains the fundamental types used throughout the crate:
//! - The generation request and its validation
//! - Stage kinds and the pipeline state machine
//! - Tagged per-stage outcomes
//! - The terminal generation result

mod outcome;
mod request;
mod result;
mod status;

pub use outcome::StageOutcome;
pub use request::{GenerationRequest, DEFAULT_WORD_COUNT};
pub use result::GenerationResult;
pub use status::{PipelineState, StageKind};
