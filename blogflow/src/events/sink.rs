//! Event sink trait and implementations.

use super::PipelineEvent;
use async_trait::async_trait;
use parking_lot::RwLock;
use tracing::{debug, info, Level};

/// Receiver of pipeline lifecycle events.
///
/// Sinks must not fail: a sink problem is logged and swallowed so that it
/// can never abort a run.
#[async_trait]
pub trait EventSink: Send + Sync {
    /// Emits an event.
    async fn emit(&self, event: PipelineEvent);
}

/// A no-op event sink that discards all events.
///
/// Used as the default when no sink is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpEventSink;

#[async_trait]
impl EventSink for NoOpEventSink {
    async fn emit(&self, _event: PipelineEvent) {}
}

/// An event sink that logs events using the tracing framework.
#[derive(Debug, Clone)]
pub struct LoggingEventSink {
    level: Level,
}

impl Default for LoggingEventSink {
    fn default() -> Self {
        Self { level: Level::INFO }
    }
}

impl LoggingEventSink {
    /// Creates a new logging event sink with the specified level.
    #[must_use]
    pub fn new(level: Level) -> Self {
        Self { level }
    }

    /// Creates a debug-level logging sink.
    #[must_use]
    pub fn debug() -> Self {
        Self::new(Level::DEBUG)
    }
}

#[async_trait]
impl EventSink for LoggingEventSink {
    async fn emit(&self, event: PipelineEvent) {
        let stage = event.stage.map(|s| s.to_string()).unwrap_or_default();
        if self.level == Level::DEBUG {
            debug!(
                event_type = %event.event_type,
                task_id = %event.task_id,
                stage = %stage,
                event_data = %event.data,
                "Event: {}", event.event_type
            );
        } else {
            info!(
                event_type = %event.event_type,
                task_id = %event.task_id,
                stage = %stage,
                event_data = %event.data,
                "Event: {}", event.event_type
            );
        }
    }
}

/// A collecting event sink for testing purposes.
#[derive(Debug, Default)]
pub struct CollectingEventSink {
    events: RwLock<Vec<PipelineEvent>>,
}

impl CollectingEventSink {
    /// Creates a new collecting sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns all collected events.
    #[must_use]
    pub fn events(&self) -> Vec<PipelineEvent> {
        self.events.read().clone()
    }

    /// Returns collected event types in order.
    #[must_use]
    pub fn event_types(&self) -> Vec<String> {
        self.events.read().iter().map(|e| e.event_type.clone()).collect()
    }

    /// Returns the number of collected events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.read().len()
    }

    /// Returns true if no events have been collected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.read().is_empty()
    }

    /// Returns events matching a type prefix.
    #[must_use]
    pub fn events_of_type(&self, type_prefix: &str) -> Vec<PipelineEvent> {
        self.events
            .read()
            .iter()
            .filter(|e| e.event_type.starts_with(type_prefix))
            .cloned()
            .collect()
    }
}

#[async_trait]
impl EventSink for CollectingEventSink {
    async fn emit(&self, event: PipelineEvent) {
        self.events.write().push(event);
    }
}
