pub mod error;
pub mod event;
pub mod hover;
pub mod location;
pub mod query;
pub mod result;

pub use error::{BackendError, BackendResult};
pub use event::TelemetryEvent;
pub use hover::{Alert, Badge, BadgeKind, HoverContent, HoverResult, SupportLevel};
pub use location::{CodeLocation, DocumentRef, FileKey, Position, Range};
pub use query::{Query, ReferenceContext};
pub use result::{Highlight, HighlightKind, Located, PreciseData};
