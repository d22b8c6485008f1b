//! The definition composer.

use std::pin::pin;
use std::sync::Arc;

use futures::StreamExt;
use tokio::sync::mpsc;

use codenav_models::{Located, Query, TelemetryEvent};

use crate::backends::{HeuristicBackend, PreciseBackend, ProtocolBackend};
use crate::composition::{lookup_precise, ok_batches};
use crate::events::EventRecorder;

/// Walks the precedence protocol for one definition invocation.
///
/// Precise wins outright: one non-empty index answer and nothing else is
/// consulted. With a protocol backend configured, every batch it yields is
/// forwarded verbatim (empties included, so a stale result does not linger
/// in the UI) and the heuristic backend is never reached.
pub(crate) async fn produce(
    precise: Arc<dyn PreciseBackend>,
    protocol: Option<Arc<dyn ProtocolBackend>>,
    heuristic: Arc<dyn HeuristicBackend>,
    mut recorder: EventRecorder,
    query: Query,
    tx: mpsc::Sender<Vec<Located>>,
) {
    if let Some(data) = lookup_precise(&*precise, &query).await {
        if !data.definition.is_empty() {
            recorder.emit_once(TelemetryEvent::PreciseDefinitions).await;
            let batch = data.definition.into_iter().map(Located::bare).collect();
            let _ = tx.send(batch).await;
            return;
        }
    }

    if let Some(protocol) = protocol {
        let mut batches = pin!(ok_batches(
            protocol.definitions(&query),
            "protocol definitions"
        ));
        while let Some(locations) = batches.next().await {
            if !locations.is_empty() {
                recorder.emit_once(TelemetryEvent::ProtocolDefinitions).await;
            }
            let batch = locations.into_iter().map(Located::bare).collect();
            if tx.send(batch).await.is_err() {
                return;
            }
        }
        // Protocol was configured: exhaustion ends the invocation, the
        // heuristic backend is never a fallback for it.
        return;
    }

    let mut batches = pin!(ok_batches(
        heuristic.definitions(&query),
        "heuristic definitions"
    ));
    while let Some(locations) = batches.next().await {
        if !locations.is_empty() {
            recorder
                .emit_once(TelemetryEvent::HeuristicDefinitions)
                .await;
        }
        let batch = locations.into_iter().map(Located::badged).collect();
        if tx.send(batch).await.is_err() {
            return;
        }
    }
}
