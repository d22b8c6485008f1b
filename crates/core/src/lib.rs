//! Provider composition for code navigation queries.
//!
//! Three backends of increasing latency and decreasing precision answer
//! "where is this symbol defined / referenced / documented" queries: a
//! precomputed exact index, a live protocol-based language analyzer, and a
//! heuristic pattern-search fallback. [`composition::ProviderComposition`]
//! consults them in that order, stops as soon as a sufficient answer
//! exists, annotates results with precision metadata, and fires at most
//! one telemetry event per name per invocation.
//!
//! [`reconfigure::reregister_on_change`] rebuilds registrations when
//! tracked configuration fields change, so the protocol backend can appear
//! or disappear at runtime without leaking stale registrations.

pub mod backends;
pub mod composition;
pub mod events;
pub mod reconfigure;
pub mod stream_util;

mod definition;
mod highlights;
mod hover;
mod references;

pub use backends::{
    BatchStream, HeuristicBackend, PreciseBackend, ProtocolBackend, SupplementalReferences,
};
pub use composition::{HighlightResults, HoverResults, LocationResults, ProviderComposition};
pub use events::EventRecorder;
pub use reconfigure::{reregister_on_change, ControllerHandle};

pub use codenav_models::{
    Alert, BackendError, BackendResult, Badge, CodeLocation, DocumentRef, FileKey, Highlight,
    HighlightKind, HoverContent, HoverResult, Located, Position, PreciseData, Query, Range,
    ReferenceContext, SupportLevel, TelemetryEvent,
};
