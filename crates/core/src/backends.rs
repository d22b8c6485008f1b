//! Accessor traits for the three result backends.
//!
//! The composition engine owns the precedence between these; implementors
//! only answer queries. Stream items are `BackendResult` so a source can
//! fail mid-sequence without tearing down the whole composed operation.

use async_trait::async_trait;
use futures::stream::BoxStream;

use codenav_models::{BackendResult, CodeLocation, HoverContent, PreciseData, Query};

/// A live sequence of result batches from one backend.
pub type BatchStream<T> = BoxStream<'static, T>;

/// Exact, precomputed index lookup.
///
/// A single-shot call answering every capability at once; treated as
/// authoritative whenever the relevant field is non-empty.
#[async_trait]
pub trait PreciseBackend: Send + Sync {
    /// Look up everything the index knows about the queried position.
    ///
    /// `Ok(None)` means the index has no entry there at all, which is not
    /// an error; it routes the operation to the fallback backends.
    async fn lookup(&self, query: &Query) -> BackendResult<Option<PreciseData>>;
}

/// Live language analyzer reached over a request/response protocol.
///
/// Optional at composition time: its presence is a configuration-driven
/// toggle. When configured it is authoritative and never supplemented by
/// heuristic results.
pub trait ProtocolBackend: Send + Sync {
    /// Definition batches. Empty batches are meaningful: they are
    /// forwarded to clear stale results from the UI.
    fn definitions(&self, query: &Query) -> BatchStream<BackendResult<Vec<CodeLocation>>>;

    fn references(&self, query: &Query) -> BatchStream<BackendResult<Vec<CodeLocation>>>;

    /// Hover values; `None` items signal "no documentation here".
    fn hover(&self, query: &Query) -> BatchStream<BackendResult<Option<HoverContent>>>;
}

/// Approximate pattern-search lookup. Always marked imprecise.
///
/// How the search query string is built is the implementor's concern.
pub trait HeuristicBackend: Send + Sync {
    fn definitions(&self, query: &Query) -> BatchStream<BackendResult<Vec<CodeLocation>>>;

    fn references(&self, query: &Query) -> BatchStream<BackendResult<Vec<CodeLocation>>>;

    fn hover(&self, query: &Query) -> BatchStream<BackendResult<Option<HoverContent>>>;
}

/// An externally supplied extra source of references, merged by arrival
/// into the composed reference sequence so neither side delays the other.
pub trait SupplementalReferences: Send + Sync {
    fn references(&self, query: &Query) -> BatchStream<BackendResult<Vec<CodeLocation>>>;
}
