//! The references composer.

use std::collections::HashSet;
use std::pin::pin;
use std::sync::Arc;

use futures::stream::Stream;
use futures::StreamExt;
use tokio::sync::mpsc;

use codenav_models::{BackendResult, CodeLocation, FileKey, Located, Query, TelemetryEvent};

use crate::backends::{BatchStream, HeuristicBackend, PreciseBackend, ProtocolBackend};
use crate::composition::{lookup_precise, ok_batches};
use crate::events::EventRecorder;

/// Walks the precedence protocol for one references invocation.
///
/// Precise references are yielded first and accumulated. A configured
/// protocol backend then extends them batch by batch; otherwise heuristic
/// batches are filtered so no file already covered by a precise result
/// contributes an imprecise one.
pub(crate) async fn produce(
    precise: Arc<dyn PreciseBackend>,
    protocol: Option<Arc<dyn ProtocolBackend>>,
    heuristic: Arc<dyn HeuristicBackend>,
    mut recorder: EventRecorder,
    query: Query,
    tx: mpsc::Sender<Vec<Located>>,
) {
    let precise_refs: Vec<CodeLocation> = lookup_precise(&*precise, &query)
        .await
        .map(|data| data.references)
        .unwrap_or_default();

    if !precise_refs.is_empty() {
        recorder.emit_once(TelemetryEvent::PreciseReferences).await;
        let batch = precise_refs.iter().cloned().map(Located::bare).collect();
        if tx.send(batch).await.is_err() {
            return;
        }
    }

    if let Some(protocol) = protocol {
        let mut batches = pin!(ok_batches(
            protocol.references(&query),
            "protocol references"
        ));
        while let Some(locations) = batches.next().await {
            if locations.is_empty() {
                continue;
            }
            recorder.emit_once(TelemetryEvent::ProtocolReferences).await;
            // TODO: deduplicate locations the index and the analyzer both
            // report before yielding the combined batch.
            let combined = precise_refs
                .iter()
                .cloned()
                .map(Located::bare)
                .chain(locations.into_iter().map(Located::bare))
                .collect();
            if tx.send(combined).await.is_err() {
                return;
            }
        }
        return;
    }

    let covered: HashSet<FileKey> = precise_refs.iter().map(CodeLocation::file_key).collect();
    let mut batches = pin!(ok_batches(
        heuristic.references(&query),
        "heuristic references"
    ));
    while let Some(locations) = batches.next().await {
        let filtered: Vec<CodeLocation> = locations
            .into_iter()
            .filter(|location| !covered.contains(&location.file_key()))
            .collect();
        if filtered.is_empty() {
            // Everything in this batch was already covered precisely.
            continue;
        }
        recorder.emit_once(TelemetryEvent::HeuristicReferences).await;
        let combined = precise_refs
            .iter()
            .cloned()
            .map(Located::bare)
            .chain(filtered.into_iter().map(Located::badged))
            .collect();
        if tx.send(combined).await.is_err() {
            return;
        }
    }
}

/// Adapts a supplemental reference source for merging into the composed
/// sequence: failures end its contribution, values pass through bare.
pub(crate) fn external_batches(
    batches: BatchStream<BackendResult<Vec<CodeLocation>>>,
) -> impl Stream<Item = Vec<Located>> + Send {
    ok_batches(batches, "supplemental references")
        .filter(|locations| futures::future::ready(!locations.is_empty()))
        .map(|locations| locations.into_iter().map(Located::bare).collect())
}
