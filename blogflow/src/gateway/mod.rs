//! The single seam between the pipeline and the model service.
//!
//! Implementations make exactly one outbound call per `generate` and never
//! retry or cache. Failures are reported as [`ModelCallError`]; containing
//! them is the stage runner's job.

mod config;
#[cfg(feature = "openai")]
mod openai;

pub use config::GatewayConfig;
#[cfg(feature = "openai")]
pub use openai::OpenAiGateway;

use crate::errors::ModelCallError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Sampling parameters for one model call.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GenerationParams {
    /// Upper bound on generated tokens.
    pub max_output_tokens: u32,
    /// Sampling temperature.
    pub temperature: f32,
}

impl GenerationParams {
    /// Creates a parameter set.
    #[must_use]
    pub fn new(max_output_tokens: u32, temperature: f32) -> Self {
        Self {
            max_output_tokens,
            temperature,
        }
    }
}

/// Turns a system instruction and user prompt into response text.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ModelGateway: Send + Sync {
    /// Performs one model call.
    async fn generate(
        &self,
        system_instruction: &str,
        user_prompt: &str,
        params: GenerationParams,
    ) -> Result<String, ModelCallError>;
}
