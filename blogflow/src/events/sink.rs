//! Event sink trait and implementations.

use crate::core::StepEvent;
use async_trait::async_trait;
use tracing::debug;

/// Trait for sinks that receive step lifecycle events.
#[async_trait]
pub trait EventSink: Send + Sync + std::fmt::Debug {
    /// Emits an event. Sinks never fail; problems are logged and dropped.
    async fn emit(&self, event: &StepEvent);
}

/// A no-op event sink that discards all events.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpEventSink;

#[async_trait]
impl EventSink for NoOpEventSink {
    async fn emit(&self, _event: &StepEvent) {}
}

/// An event sink that logs events at debug level.
///
/// The engine already logs step outcomes at info and error level, so the
/// full event payload only shows up when debug output is enabled.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingEventSink;

#[async_trait]
impl EventSink for LoggingEventSink {
    async fn emit(&self, event: &StepEvent) {
        let data = serde_json::to_string(&event.data).unwrap_or_default();
        debug!(
            event_type = %event.event_type,
            status = ?event.status(),
            event_data = %data,
            "Event: {}",
            event.event_type
        );
    }
}

/// A collecting event sink for testing purposes.
#[derive(Debug, Default)]
pub struct CollectingEventSink {
    events: parking_lot::RwLock<Vec<StepEvent>>,
}

impl CollectingEventSink {
    /// Creates a new collecting sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns all collected events.
    #[must_use]
    pub fn events(&self) -> Vec<StepEvent> {
        self.events.read().clone()
    }

    /// Returns the collected event types, in order.
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
    pub fn events_of_type(&self, type_prefix: &str) -> Vec<StepEvent> {
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
    async fn emit(&self, event: &StepEvent) {
        self.events.write().push(event.clone());
    }
}
