use async_trait::async_trait;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Mutex;

/// One telemetry event, ready for whatever sink is configured.
#[derive(Debug, Serialize, Clone)]
pub struct BaseEvent {
    pub kind: String,
    #[serde(flatten)]
    pub properties: HashMap<String, String>,
}

impl BaseEvent {
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            properties: HashMap::new(),
        }
    }

    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }
}

/// Fire-and-forget event transport.
///
/// Implementations swallow their own failures: a broken sink must never
/// surface an error into the operation that produced the event.
#[async_trait]
pub trait TelemetrySender: Send + Sync + 'static {
    async fn send_event(&self, event: BaseEvent);
}

/// Routes events through the `log` facade. The default wiring.
#[derive(Debug, Default)]
pub struct LogSender;

#[async_trait]
impl TelemetrySender for LogSender {
    async fn send_event(&self, event: BaseEvent) {
        match serde_json::to_string(&event) {
            Ok(payload) => log::debug!("telemetry: {payload}"),
            Err(err) => log::debug!("telemetry: {} (unserializable: {err})", event.kind),
        }
    }
}

/// Drops every event.
#[derive(Debug, Default)]
pub struct NullSender;

#[async_trait]
impl TelemetrySender for NullSender {
    async fn send_event(&self, _event: BaseEvent) {}
}

/// Records event kinds in memory so tests can assert on them.
#[derive(Debug, Default)]
pub struct CapturingSender {
    events: Mutex<Vec<String>>,
}

impl CapturingSender {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every recorded event kind, in send order.
    pub fn kinds(&self) -> Vec<String> {
        self.events.lock().expect("telemetry capture poisoned").clone()
    }

    /// How many times `kind` was sent.
    pub fn count(&self, kind: &str) -> usize {
        self.events
            .lock()
            .expect("telemetry capture poisoned")
            .iter()
            .filter(|k| k.as_str() == kind)
            .count()
    }
}

#[async_trait]
impl TelemetrySender for CapturingSender {
    async fn send_event(&self, event: BaseEvent) {
        self.events
            .lock()
            .expect("telemetry capture poisoned")
            .push(event.kind);
    }
}
