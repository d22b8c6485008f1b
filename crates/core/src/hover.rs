//! The hover composer.

use std::pin::pin;
use std::sync::Arc;

use futures::StreamExt;
use tokio::sync::mpsc;

use codenav_models::{
    Alert, Badge, HoverResult, Query, SupportLevel, TelemetryEvent,
};

use crate::backends::{HeuristicBackend, PreciseBackend, ProtocolBackend};
use crate::composition::{lookup_precise, ok_batches};
use crate::events::EventRecorder;
use crate::stream_util;

/// Walks the precedence protocol for one hover invocation.
///
/// Alerts mark provenance and are attached to the first yield of an
/// invocation only, so the UI never repeats the same banner as results
/// improve.
pub(crate) async fn produce(
    precise: Arc<dyn PreciseBackend>,
    protocol: Option<Arc<dyn ProtocolBackend>>,
    heuristic: Arc<dyn HeuristicBackend>,
    support: SupportLevel,
    mut recorder: EventRecorder,
    query: Query,
    tx: mpsc::Sender<HoverResult>,
) {
    let mut has_precise_definition = false;

    if let Some(data) = lookup_precise(&*precise, &query).await {
        if let Some(content) = data.hover {
            let alert = if data.definition.is_empty() {
                // Hover text without a definition suggests the repository
                // is only partially indexed; a heuristic definition hit
                // confirms there is more out there than the index knows.
                let probe = stream_util::first_non_empty(ok_batches(
                    heuristic.definitions(&query),
                    "heuristic definition probe",
                ))
                .await;
                if probe.is_some() {
                    Alert::PartialPrecise
                } else {
                    Alert::Precise
                }
            } else {
                Alert::Precise
            };
            recorder.emit_once(TelemetryEvent::PreciseHover).await;
            let _ = tx.send(HoverResult::new(content).with_alert(alert)).await;
            return;
        }
        has_precise_definition = !data.definition.is_empty();
    }

    if let Some(protocol) = protocol {
        let mut first = true;
        let mut values = pin!(ok_batches(protocol.hover(&query), "protocol hover"));
        while let Some(value) = values.next().await {
            let Some(content) = value else {
                continue;
            };
            recorder.emit_once(TelemetryEvent::ProtocolHover).await;
            let mut result = HoverResult::new(content);
            if first {
                result = result.with_alert(Alert::Protocol);
                first = false;
            }
            if tx.send(result).await.is_err() {
                return;
            }
        }
        return;
    }

    // The initial alert is decided before any heuristic value arrives and
    // attached only to the first successful yield.
    let mut pending = Some(if has_precise_definition {
        Alert::PreciseDefinitionOnly
    } else {
        Alert::HeuristicSupport { level: support }
    });
    let mut values = pin!(ok_batches(heuristic.hover(&query), "heuristic hover"));
    while let Some(value) = values.next().await {
        let Some(content) = value else {
            continue;
        };
        recorder.emit_once(TelemetryEvent::HeuristicHover).await;
        let mut result = HoverResult::new(content).with_badge(Badge::imprecise());
        if let Some(alert) = pending.take() {
            result = result.with_alert(alert);
        }
        if tx.send(result).await.is_err() {
            return;
        }
    }
}
