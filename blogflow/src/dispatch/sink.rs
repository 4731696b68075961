//! Delivery hook for completed results.

use crate::core::GenerationResult;
use async_trait::async_trait;
use tracing::info;

/// Receives every result produced by a dispatched run.
#[async_trait]
pub trait ResultSink: Send + Sync {
    /// Delivers one completed result.
    async fn deliver(&self, result: &GenerationResult);
}

/// Result sink that logs a delivery line per result.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingResultSink;

#[async_trait]
impl ResultSink for LoggingResultSink {
    async fn deliver(&self, result: &GenerationResult) {
        info!(
            task_id = %result.task_id,
            topic = %result.topic,
            title = %result.title,
            word_count = result.word_count,
            "Blog result ready for delivery"
        );
    }
}
