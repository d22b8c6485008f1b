//! The provider composition engine.
//!
//! One [`ProviderComposition`] is built per registration (the
//! reconfiguration controller rebuilds it whenever the protocol backend's
//! availability changes). Each entry point runs one invocation: it builds
//! exactly one [`EventRecorder`], spawns a producer that walks the
//! precedence protocol, and hands back the receiving end as a stream.
//! When the caller stops consuming, the producer's next send fails and it
//! returns, dropping any in-flight backend work.

use std::sync::Arc;

use futures::stream::{BoxStream, Stream, StreamExt};
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;

use codenav_models::{
    BackendResult, Highlight, HoverResult, Located, PreciseData, Query, SupportLevel,
};
use codenav_telemetry::TelemetrySender;

use crate::backends::{
    BatchStream, HeuristicBackend, PreciseBackend, ProtocolBackend, SupplementalReferences,
};
use crate::events::EventRecorder;
use crate::stream_util;
use crate::{definition, highlights, hover, references};

/// Definition/reference result sequences.
pub type LocationResults = BoxStream<'static, Vec<Located>>;
/// Hover result sequences.
pub type HoverResults = BoxStream<'static, HoverResult>;
/// Document-highlight result sequences.
pub type HighlightResults = BoxStream<'static, Vec<Highlight>>;

/// Backpressure bound between a producer and its consumer.
const RESULT_CHANNEL_CAPACITY: usize = 16;

/// Queries the precise, protocol, and heuristic backends in precedence
/// order and yields progressively-available, precision-annotated results.
pub struct ProviderComposition {
    precise: Arc<dyn PreciseBackend>,
    heuristic: Arc<dyn HeuristicBackend>,
    protocol: Option<Arc<dyn ProtocolBackend>>,
    supplemental_references: Option<Arc<dyn SupplementalReferences>>,
    support: SupportLevel,
    telemetry: Arc<dyn TelemetrySender>,
}

impl ProviderComposition {
    pub fn new(
        precise: Arc<dyn PreciseBackend>,
        heuristic: Arc<dyn HeuristicBackend>,
        telemetry: Arc<dyn TelemetrySender>,
    ) -> Self {
        Self {
            precise,
            heuristic,
            protocol: None,
            supplemental_references: None,
            support: SupportLevel::None,
            telemetry,
        }
    }

    /// Configure the live analyzer backend. Its presence alone changes the
    /// precedence protocol: the heuristic backend is then never consulted.
    pub fn with_protocol(mut self, protocol: Arc<dyn ProtocolBackend>) -> Self {
        self.protocol = Some(protocol);
        self
    }

    /// Merge an external reference source into reference results by arrival.
    pub fn with_supplemental_references(
        mut self,
        supplemental: Arc<dyn SupplementalReferences>,
    ) -> Self {
        self.supplemental_references = Some(supplemental);
        self
    }

    /// Declare the surrounding language's precise-support level, used to
    /// pick the initial heuristic hover alert.
    pub fn with_support_level(mut self, support: SupportLevel) -> Self {
        self.support = support;
        self
    }

    /// Where is the symbol at `query` defined?
    pub fn definitions(&self, query: Query) -> LocationResults {
        let (tx, rx) = mpsc::channel(RESULT_CHANNEL_CAPACITY);
        let precise = Arc::clone(&self.precise);
        let heuristic = Arc::clone(&self.heuristic);
        let protocol = self.protocol.clone();
        let recorder = EventRecorder::new(Arc::clone(&self.telemetry));
        tokio::spawn(definition::produce(
            precise, protocol, heuristic, recorder, query, tx,
        ));
        Box::pin(ReceiverStream::new(rx))
    }

    /// Where is the symbol at `query` used?
    pub fn references(&self, query: Query) -> LocationResults {
        let (tx, rx) = mpsc::channel(RESULT_CHANNEL_CAPACITY);
        let precise = Arc::clone(&self.precise);
        let heuristic = Arc::clone(&self.heuristic);
        let protocol = self.protocol.clone();
        let recorder = EventRecorder::new(Arc::clone(&self.telemetry));
        let local = ReceiverStream::new(rx);
        tokio::spawn(references::produce(
            precise,
            protocol,
            heuristic,
            recorder,
            query.clone(),
            tx,
        ));
        match &self.supplemental_references {
            Some(supplemental) => {
                let external = references::external_batches(supplemental.references(&query));
                Box::pin(stream_util::merge(local, external))
            }
            None => Box::pin(local),
        }
    }

    /// What documentation exists for the symbol at `query`?
    pub fn hover(&self, query: Query) -> HoverResults {
        let (tx, rx) = mpsc::channel(RESULT_CHANNEL_CAPACITY);
        let precise = Arc::clone(&self.precise);
        let heuristic = Arc::clone(&self.heuristic);
        let protocol = self.protocol.clone();
        let support = self.support;
        let recorder = EventRecorder::new(Arc::clone(&self.telemetry));
        tokio::spawn(hover::produce(
            precise, protocol, heuristic, support, recorder, query, tx,
        ));
        Box::pin(ReceiverStream::new(rx))
    }

    /// Which other ranges in the document refer to the same symbol?
    ///
    /// Only the precise index is consulted; protocol and heuristic
    /// backends never are.
    pub fn document_highlights(&self, query: Query) -> HighlightResults {
        let (tx, rx) = mpsc::channel(RESULT_CHANNEL_CAPACITY);
        let precise = Arc::clone(&self.precise);
        let recorder = EventRecorder::new(Arc::clone(&self.telemetry));
        tokio::spawn(highlights::produce(precise, recorder, query, tx));
        Box::pin(ReceiverStream::new(rx))
    }
}

/// Single-shot precise lookup with the failure isolated: an erroring index
/// routes the operation to the fallback backends instead of aborting it.
pub(crate) async fn lookup_precise(
    precise: &dyn PreciseBackend,
    query: &Query,
) -> Option<PreciseData> {
    match precise.lookup(query).await {
        Ok(data) => data,
        Err(err) => {
            log::warn!("precise lookup failed, falling through: {err}");
            None
        }
    }
}

/// Unwraps a backend's `BackendResult` items, ending that backend's
/// contribution at the first stream error without propagating it.
pub(crate) fn ok_batches<T>(
    batches: BatchStream<BackendResult<T>>,
    backend: &'static str,
) -> impl Stream<Item = T> + Send
where
    T: Send + 'static,
{
    batches.scan((), move |_, item| {
        futures::future::ready(match item {
            Ok(value) => Some(value),
            Err(err) => {
                log::warn!("{backend} stream failed, dropping its remaining results: {err}");
                None
            }
        })
    })
}
