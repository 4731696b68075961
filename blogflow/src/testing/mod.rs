//! Testing utilities for blogflow pipelines.
//!
//! This module provides:
//! - Scripted and prompt-driven model gateways
//! - Request and clock fixtures
//! - Assertions for degraded output and task ids

mod assertions;
mod fixtures;
mod mocks;

pub use assertions::{assert_degraded_placeholder, assert_stage_statuses, assert_synthesized_task_id};
pub use fixtures::{fixed_clock, fixed_time, optimized_text, sample_request};
pub use mocks::{FnGateway, RecordedCall, ScriptedGateway};
