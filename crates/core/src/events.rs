//! Per-invocation once-only telemetry recording.

use std::collections::HashSet;
use std::sync::Arc;

use codenav_models::TelemetryEvent;
use codenav_telemetry::{BaseEvent, TelemetrySender};

/// Records which telemetry events one operation invocation has fired.
///
/// One recorder is built per invocation, never shared across invocations
/// or composers, so an operation that yields many improving batches still
/// counts once per event name. Sender failures are the sender's problem;
/// nothing here can interrupt the result sequence.
pub struct EventRecorder {
    sender: Arc<dyn TelemetrySender>,
    fired: HashSet<TelemetryEvent>,
}

impl EventRecorder {
    pub fn new(sender: Arc<dyn TelemetrySender>) -> Self {
        Self {
            sender,
            fired: HashSet::new(),
        }
    }

    /// Send `event` if this recorder has not sent it before; no-op otherwise.
    pub async fn emit_once(&mut self, event: TelemetryEvent) {
        if self.fired.insert(event) {
            self.sender.send_event(BaseEvent::new(event.as_str())).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use codenav_telemetry::CapturingSender;

    #[tokio::test]
    async fn repeated_emit_sends_once() {
        let sender = Arc::new(CapturingSender::new());
        let mut recorder = EventRecorder::new(sender.clone());
        for _ in 0..5 {
            recorder.emit_once(TelemetryEvent::HeuristicDefinitions).await;
        }
        assert_eq!(sender.count("heuristicDefinitions"), 1);
    }

    #[tokio::test]
    async fn distinct_events_each_fire() {
        let sender = Arc::new(CapturingSender::new());
        let mut recorder = EventRecorder::new(sender.clone());
        recorder.emit_once(TelemetryEvent::PreciseReferences).await;
        recorder.emit_once(TelemetryEvent::HeuristicReferences).await;
        recorder.emit_once(TelemetryEvent::PreciseReferences).await;
        assert_eq!(
            sender.kinds(),
            vec!["preciseReferences", "heuristicReferences"]
        );
    }

    #[tokio::test]
    async fn fresh_recorder_counts_again() {
        // Recorders are per-invocation: a new one fires the same name again.
        let sender = Arc::new(CapturingSender::new());
        let mut first = EventRecorder::new(sender.clone());
        first.emit_once(TelemetryEvent::PreciseHover).await;
        let mut second = EventRecorder::new(sender.clone());
        second.emit_once(TelemetryEvent::PreciseHover).await;
        assert_eq!(sender.count("preciseHover"), 2);
    }
}
