//! Connection settings for an OpenAI-compatible chat completions API.

use crate::errors::BlogflowError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Settings for [`super::OpenAiGateway`].
#[derive(Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// Bearer token.
    #[serde(skip_serializing)]
    pub api_key: String,
    /// API root, without the `/chat/completions` suffix.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Model identifier sent with every call.
    #[serde(default = "default_model")]
    pub model: String,
    /// Per-call HTTP timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

fn default_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_model() -> String {
    "gpt-3.5-turbo-16k".to_string()
}

fn default_timeout() -> u64 {
    120
}

impl std::fmt::Debug for GatewayConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GatewayConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("timeout_seconds", &self.timeout_seconds)
            .finish()
    }
}

impl GatewayConfig {
    /// Creates a configuration with defaults for everything but the key.
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: default_base_url(),
            model: default_model(),
            timeout_seconds: default_timeout(),
        }
    }

    /// Reads `OPENAI_API_KEY`, `OPENAI_BASE_URL`, `OPENAI_MODEL` and
    /// `OPENAI_TIMEOUT_SECONDS`.
    pub fn from_env() -> Result<Self, BlogflowError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, BlogflowError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup("OPENAI_API_KEY")
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| BlogflowError::Config("OPENAI_API_KEY environment variable not set".to_string()))?;

        let mut config = Self::new(api_key);
        if let Some(url) = lookup("OPENAI_BASE_URL") {
            config.base_url = url;
        }
        if let Some(model) = lookup("OPENAI_MODEL") {
            config.model = model;
        }
        if let Some(timeout) = lookup("OPENAI_TIMEOUT_SECONDS").and_then(|s| s.parse().ok()) {
            config.timeout_seconds = timeout;
        }
        Ok(config)
    }

    /// Sets the base URL.
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Sets the model.
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Sets the timeout.
    #[must_use]
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout_seconds = seconds;
        self
    }

    /// Gets timeout as Duration.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    /// Full chat completions endpoint.
    #[must_use]
    pub fn chat_url(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_missing_key_is_config_error() {
        let err = GatewayConfig::from_lookup(lookup(&[])).unwrap_err();
        assert!(matches!(err, BlogflowError::Config(_)));
    }

    #[test]
    fn test_defaults() {
        let config = GatewayConfig::from_lookup(lookup(&[("OPENAI_API_KEY", "sk-test")])).unwrap();
        assert_eq!(config.model, "gpt-3.5-turbo-16k");
        assert_eq!(config.chat_url(), "https://api.openai.com/v1/chat/completions");
        assert_eq!(config.timeout(), Duration::from_secs(120));
    }

    #[test]
    fn test_overrides() {
        let config = GatewayConfig::from_lookup(lookup(&[
            ("OPENAI_API_KEY", "sk-test"),
            ("OPENAI_BASE_URL", "http://localhost:9000/v1/"),
            ("OPENAI_MODEL", "gpt-4o-mini"),
            ("OPENAI_TIMEOUT_SECONDS", "5"),
        ]))
        .unwrap();
        assert_eq!(config.chat_url(), "http://localhost:9000/v1/chat/completions");
        assert_eq!(config.model, "gpt-4o-mini");
        assert_eq!(config.timeout_seconds, 5);
    }

    #[test]
    fn test_debug_redacts_key() {
        let config = GatewayConfig::new("sk-secret");
        assert!(!format!("{config:?}").contains("sk-secret"));
    }
}
