//! In-memory model gateways for tests.

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::fmt;

use crate::errors::ModelCallError;
use crate::gateway::{GenerationParams, ModelGateway};

/// One call observed by a test gateway.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    /// System instruction as sent.
    pub system: String,
    /// User prompt as sent.
    pub user: String,
    /// Sampling parameters as sent.
    pub params: GenerationParams,
}

/// A gateway that answers from a queue of scripted responses.
///
/// Once the script is exhausted the fallback answers every call. Without a
/// fallback, extra calls fail with an API error.
#[derive(Debug, Default)]
pub struct ScriptedGateway {
    script: Mutex<VecDeque<Result<String, ModelCallError>>>,
    fallback: Option<Result<String, ModelCallError>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl ScriptedGateway {
    /// Creates a gateway answering with `script` in order.
    #[must_use]
    pub fn new(script: impl IntoIterator<Item = Result<String, ModelCallError>>) -> Self {
        Self {
            script: Mutex::new(script.into_iter().collect()),
            ..Self::default()
        }
    }

    /// Creates a gateway that always answers `text`.
    #[must_use]
    pub fn repeating(text: impl Into<String>) -> Self {
        Self {
            fallback: Some(Ok(text.into())),
            ..Self::default()
        }
    }

    /// Creates a gateway whose every call fails with `error`.
    #[must_use]
    pub fn failing(error: ModelCallError) -> Self {
        Self {
            fallback: Some(Err(error)),
            ..Self::default()
        }
    }

    /// Replaces the fallback used after the script runs out.
    #[must_use]
    pub fn with_fallback(mut self, fallback: Result<String, ModelCallError>) -> Self {
        self.fallback = Some(fallback);
        self
    }

    /// Number of calls received.
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }

    /// All calls received, in order.
    #[must_use]
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().clone()
    }

    /// Scripted responses not yet consumed.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.script.lock().len()
    }
}

#[async_trait]
impl ModelGateway for ScriptedGateway {
    async fn generate(
        &self,
        system_instruction: &str,
        user_prompt: &str,
        params: GenerationParams,
    ) -> Result<String, ModelCallError> {
        self.calls.lock().push(RecordedCall {
            system: system_instruction.to_string(),
            user: user_prompt.to_string(),
            params,
        });
        let next = self.script.lock().pop_front();
        match next {
            Some(response) => response,
            None => self
                .fallback
                .clone()
                .unwrap_or_else(|| Err(ModelCallError::api("No scripted response left"))),
        }
    }
}

type Responder = dyn Fn(&str, &str) -> Result<String, ModelCallError> + Send + Sync;

/// A gateway computing each answer from the prompt it receives.
///
/// Yields to the scheduler before answering so concurrent runs interleave.
pub struct FnGateway {
    responder: Box<Responder>,
    calls: Mutex<usize>,
}

impl FnGateway {
    /// Creates a gateway from `responder(system, user)`.
    pub fn new<F>(responder: F) -> Self
    where
        F: Fn(&str, &str) -> Result<String, ModelCallError> + Send + Sync + 'static,
    {
        Self {
            responder: Box::new(responder),
            calls: Mutex::new(0),
        }
    }

    /// Number of calls received.
    #[must_use]
    pub fn call_count(&self) -> usize {
        *self.calls.lock()
    }
}

impl fmt::Debug for FnGateway {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnGateway")
            .field("calls", &self.call_count())
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl ModelGateway for FnGateway {
    async fn generate(
        &self,
        system_instruction: &str,
        user_prompt: &str,
        _params: GenerationParams,
    ) -> Result<String, ModelCallError> {
        *self.calls.lock() += 1;
        tokio::task::yield_now().await;
        (self.responder)(system_instruction, user_prompt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> GenerationParams {
        GenerationParams::new(10, 0.5)
    }

    #[tokio::test]
    async fn test_scripted_gateway_in_order() {
        let gateway = ScriptedGateway::new([Ok("a".to_string()), Err(ModelCallError::network("x"))]);

        assert_eq!(gateway.generate("s", "u1", params()).await.unwrap(), "a");
        assert!(gateway.generate("s", "u2", params()).await.is_err());
        assert_eq!(gateway.remaining(), 0);
        assert_eq!(gateway.calls()[1].user, "u2");
    }

    #[tokio::test]
    async fn test_scripted_gateway_exhausted() {
        let gateway = ScriptedGateway::new(Vec::new());
        let err = gateway.generate("s", "u", params()).await.unwrap_err();
        assert_eq!(err.message, "No scripted response left");
    }

    #[tokio::test]
    async fn test_scripted_gateway_fallback() {
        let gateway = ScriptedGateway::new([Ok("first".to_string())]).with_fallback(Ok("rest".to_string()));
        assert_eq!(gateway.generate("s", "u", params()).await.unwrap(), "first");
        assert_eq!(gateway.generate("s", "u", params()).await.unwrap(), "rest");
        assert_eq!(gateway.call_count(), 2);
    }

    #[tokio::test]
    async fn test_fn_gateway() {
        let gateway = FnGateway::new(|_, user| Ok(user.to_uppercase()));
        assert_eq!(gateway.generate("s", "abc", params()).await.unwrap(), "ABC");
        assert_eq!(gateway.call_count(), 1);
    }
}
