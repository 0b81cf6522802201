//! Step lifecycle events emitted by the pipeline engine.

use super::StepStatus;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A lifecycle event emitted around each step of a run.
///
/// Events are consumed by event sinks for logging or test inspection.
/// They are distinct from the ndjson events sent to the client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepEvent {
    /// The event type (e.g., "step.started", "step.completed").
    #[serde(rename = "type")]
    pub event_type: String,

    /// When the event occurred (ISO 8601).
    pub timestamp: String,

    /// The event payload data.
    #[serde(default)]
    pub data: HashMap<String, serde_json::Value>,
}

impl StepEvent {
    /// Creates a new event.
    #[must_use]
    pub fn new(event_type: impl Into<String>) -> Self {
        Self {
            event_type: event_type.into(),
            timestamp: iso_timestamp(),
            data: HashMap::new(),
        }
    }

    /// Adds a data field to the event.
    #[must_use]
    pub fn add_data(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.data.insert(key.into(), value);
        self
    }

    /// Creates a "pipeline.started" event.
    #[must_use]
    pub fn pipeline_started(run_id: &str, pipeline: &str) -> Self {
        Self::new("pipeline.started")
            .add_data("run_id", serde_json::json!(run_id))
            .add_data("pipeline", serde_json::json!(pipeline))
    }

    /// Creates a "pipeline.completed" event.
    #[must_use]
    pub fn pipeline_completed(run_id: &str, pipeline: &str, duration_ms: f64) -> Self {
        Self::new("pipeline.completed")
            .add_data("run_id", serde_json::json!(run_id))
            .add_data("pipeline", serde_json::json!(pipeline))
            .add_data("duration_ms", serde_json::json!(duration_ms))
    }

    /// Creates a "step.started" event.
    #[must_use]
    pub fn started(run_id: &str, step: &str) -> Self {
        Self::new("step.started")
            .add_data("run_id", serde_json::json!(run_id))
            .add_data("step", serde_json::json!(step))
            .add_data("status", serde_json::json!(StepStatus::Running))
    }

    /// Creates a "step.completed" event.
    #[must_use]
    pub fn completed(run_id: &str, step: &str, duration_ms: f64, degraded: bool) -> Self {
        Self::new("step.completed")
            .add_data("run_id", serde_json::json!(run_id))
            .add_data("step", serde_json::json!(step))
            .add_data("status", serde_json::json!(StepStatus::Ok))
            .add_data("duration_ms", serde_json::json!(duration_ms))
            .add_data("degraded", serde_json::json!(degraded))
    }

    /// Creates a "step.failed" event.
    #[must_use]
    pub fn failed(run_id: &str, step: &str, error: &str) -> Self {
        Self::new("step.failed")
            .add_data("run_id", serde_json::json!(run_id))
            .add_data("step", serde_json::json!(step))
            .add_data("status", serde_json::json!(StepStatus::Fail))
            .add_data("error", serde_json::json!(error))
    }

    /// Creates a "step.cancelled" event.
    #[must_use]
    pub fn cancelled(run_id: &str, step: &str, reason: &str) -> Self {
        Self::new("step.cancelled")
            .add_data("run_id", serde_json::json!(run_id))
            .add_data("step", serde_json::json!(step))
            .add_data("status", serde_json::json!(StepStatus::Cancel))
            .add_data("reason", serde_json::json!(reason))
    }

    /// Returns the step status carried by the event, if any.
    #[must_use]
    pub fn status(&self) -> Option<StepStatus> {
        self.data
            .get("status")
            .and_then(|v| serde_json::from_value(v.clone()).ok())
    }

    /// Returns the step name carried by the event, if any.
    #[must_use]
    pub fn step(&self) -> Option<&str> {
        self.data.get("step").and_then(serde_json::Value::as_str)
    }
}

/// Current UTC time formatted as `YYYY-MM-DDTHH:MM:SS.ffffff+00:00`.
fn iso_timestamp() -> String {
    chrono::Utc::now()
        .format("%Y-%m-%dT%H:%M:%S%.6f+00:00")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_creation() {
        let event = StepEvent::new("test.event");
        assert_eq!(event.event_type, "test.event");
        assert!(event.data.is_empty());
        assert!(event.timestamp.ends_with("+00:00"));
    }

    #[test]
    fn test_event_started() {
        let event = StepEvent::started("run-1", "create_outline");
        assert_eq!(event.event_type, "step.started");
        assert_eq!(event.step(), Some("create_outline"));
        assert_eq!(event.data.get("run_id"), Some(&serde_json::json!("run-1")));
        assert_eq!(event.status(), Some(StepStatus::Running));
    }

    #[test]
    fn test_pipeline_events_carry_no_step() {
        let event = StepEvent::pipeline_started("run-1", "blog");
        assert_eq!(event.event_type, "pipeline.started");
        assert_eq!(event.step(), None);
        assert_eq!(event.status(), None);
        assert_eq!(event.data.get("pipeline"), Some(&serde_json::json!("blog")));
    }

    #[test]
    fn test_event_completed() {
        let event = StepEvent::completed("run-1", "create_blog", 12.5, true);
        assert_eq!(event.event_type, "step.completed");
        assert_eq!(event.data.get("duration_ms"), Some(&serde_json::json!(12.5)));
        assert_eq!(event.data.get("degraded"), Some(&serde_json::json!(true)));
    }

    #[test]
    fn test_event_serialization() {
        let event = StepEvent::failed("run-1", "create_blog", "boom");
        let json = serde_json::to_string(&event).unwrap();
        let deserialized: StepEvent = serde_json::from_str(&json).unwrap();

        assert_eq!(deserialized.event_type, "step.failed");
        assert_eq!(deserialized.step(), Some("create_blog"));
        assert_eq!(deserialized.status(), Some(StepStatus::Fail));
    }
}
