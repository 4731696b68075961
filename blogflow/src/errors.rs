//! Error types for the blogflow pipeline.
//!
//! Two tiers exist. A [`RequestValidationError`] stops a run before any
//! stage executes. A [`ModelCallError`] never escapes a run: stage runners
//! turn it into placeholder text (see [`crate::stages::StageRunner`]).

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use thiserror::Error;

/// The main error type for blogflow operations.
#[derive(Debug, Error)]
pub enum BlogflowError {
    /// The request was rejected before the pipeline started.
    #[error("{0}")]
    Validation(#[from] RequestValidationError),

    /// A model call failed outside of stage containment.
    #[error("{0}")]
    ModelCall(#[from] ModelCallError),

    /// Configuration is missing or invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A background task could not be joined.
    #[error("Dispatch error: {0}")]
    Dispatch(String),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl BlogflowError {
    /// Returns true if this is a request validation failure.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

/// Error raised when a generation request is missing a required field.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{message}")]
pub struct RequestValidationError {
    /// The offending field.
    pub field: String,
    /// Human readable message.
    pub message: String,
}

impl RequestValidationError {
    /// Creates a new validation error.
    #[must_use]
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Error for a required field that is empty or whitespace-only.
    #[must_use]
    pub fn required(field: impl Into<String>, label: &str) -> Self {
        Self::new(field, format!("{label} is required"))
    }

    /// Converts to a dictionary representation.
    #[must_use]
    pub fn to_dict(&self) -> HashMap<String, serde_json::Value> {
        let mut map = HashMap::new();
        map.insert("field".to_string(), serde_json::Value::String(self.field.clone()));
        map.insert("detail".to_string(), serde_json::Value::String(self.message.clone()));
        map
    }
}

/// Category of a model call failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "type")]
pub enum ModelCallErrorKind {
    /// The request never reached the service or the connection dropped.
    Network,
    /// The service answered with a non-success status.
    Http {
        /// HTTP status code.
        status: u16,
    },
    /// The service answered with an error payload (quota, invalid model).
    Api,
    /// The response did not contain generated text.
    MalformedResponse,
    /// The gateway itself is misconfigured.
    Config,
}

impl fmt::Display for ModelCallErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Network => write!(f, "network"),
            Self::Http { status } => write!(f, "http {status}"),
            Self::Api => write!(f, "api"),
            Self::MalformedResponse => write!(f, "malformed_response"),
            Self::Config => write!(f, "config"),
        }
    }
}

/// Failure of a single call to the model service.
///
/// `Display` renders only the message, which is the cause text that ends up
/// inside degraded stage output.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{message}")]
pub struct ModelCallError {
    /// Failure category.
    pub kind: ModelCallErrorKind,
    /// Underlying cause.
    pub message: String,
}

impl ModelCallError {
    /// Creates a new model call error.
    #[must_use]
    pub fn new(kind: ModelCallErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Transport-level failure.
    #[must_use]
    pub fn network(message: impl Into<String>) -> Self {
        Self::new(ModelCallErrorKind::Network, message)
    }

    /// Non-success HTTP status.
    #[must_use]
    pub fn http(status: u16, message: impl Into<String>) -> Self {
        Self::new(ModelCallErrorKind::Http { status }, message)
    }

    /// Error payload returned by the service.
    #[must_use]
    pub fn api(message: impl Into<String>) -> Self {
        Self::new(ModelCallErrorKind::Api, message)
    }

    /// Response without usable content.
    #[must_use]
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::new(ModelCallErrorKind::MalformedResponse, message)
    }

    /// Gateway misconfiguration.
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ModelCallErrorKind::Config, message)
    }
}
