//! The document-highlights composer.
//!
//! Asymmetric to the other three operations: only the precise index is
//! consulted, and absence of an index answer is an empty sequence rather
//! than a fallback.

use std::sync::Arc;

use tokio::sync::mpsc;

use codenav_models::{Highlight, Query, TelemetryEvent};

use crate::backends::PreciseBackend;
use crate::composition::lookup_precise;
use crate::events::EventRecorder;

pub(crate) async fn produce(
    precise: Arc<dyn PreciseBackend>,
    mut recorder: EventRecorder,
    query: Query,
    tx: mpsc::Sender<Vec<Highlight>>,
) {
    let Some(data) = lookup_precise(&*precise, &query).await else {
        return;
    };
    let Some(batch) = data.highlights else {
        return;
    };
    if !batch.is_empty() {
        recorder
            .emit_once(TelemetryEvent::PreciseDocumentHighlights)
            .await;
    }
    let _ = tx.send(batch).await;
}
