//! # Blogflow
//!
//! A four-stage LLM content pipeline that turns a short brief into a
//! long-form, search-optimized blog article.
//!
//! Blogflow provides:
//!
//! - **Linear stage machine**: research, draft, optimize and edit, each one
//!   model call fed by the previous stage's text
//! - **Degrade, don't abort**: a failed model call becomes placeholder text
//!   and the run keeps going
//! - **Meta extraction**: title and description recovered from marker lines
//! - **Event-driven observability**: lifecycle events alongside `tracing` logs
//! - **Background dispatch**: validate now, run later, join when needed
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use blogflow::prelude::*;
//! use std::sync::Arc;
//!
//! # async fn demo() -> Result<(), BlogflowError> {
//! let gateway = OpenAiGateway::from_env()?;
//! let pipeline = BlogPipeline::with_config(Arc::new(gateway), PipelineConfig::branded());
//!
//! let request = GenerationRequest::new("Pet-Friendly Beaches")
//!     .with_keywords("dog beaches, pet travel")
//!     .with_audience("pet owners")
//!     .with_call_to_action("Book now");
//!
//! let result = pipeline.run_pipeline(&request).await?;
//! println!("{}: {} words", result.title, result.word_count);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    missing_docs,
    rust_2018_idioms
)]
#![allow(
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc
)]

#[cfg(feature = "cli")]
pub mod cli;
pub mod core;
pub mod dispatch;
pub mod errors;
pub mod events;
pub mod gateway;
pub mod meta;
pub mod observability;
pub mod pipeline;
pub mod prompts;
pub mod stages;
pub mod testing;
pub mod utils;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::core::{
        GenerationRequest, GenerationResult, PipelineState, StageKind, StageOutcome,
    };
    pub use crate::dispatch::{
        LoggingResultSink, ResultSink, SubmissionReceipt, TaskDispatcher, TaskHandle,
    };
    pub use crate::errors::{
        BlogflowError, ModelCallError, ModelCallErrorKind, RequestValidationError,
    };
    pub use crate::events::{
        CollectingEventSink, EventSink, LoggingEventSink, NoOpEventSink, PipelineEvent,
    };
    #[cfg(feature = "openai")]
    pub use crate::gateway::OpenAiGateway;
    pub use crate::gateway::{GatewayConfig, GenerationParams, ModelGateway};
    pub use crate::meta::{ExtractedMeta, MetaExtractor};
    pub use crate::pipeline::{BlogPipeline, DegradationSummary, PipelineConfig, PipelineRun};
    pub use crate::prompts::{BrandGuidelines, PromptBuilder, StagePrompt};
    pub use crate::stages::{StageReport, StageRunner, StageStatus};
    pub use crate::utils::{Clock, FixedClock, SystemClock, Timestamp};
}
