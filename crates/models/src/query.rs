//! The per-invocation query payload.

use serde::{Deserialize, Serialize};

use crate::location::{DocumentRef, Position};

/// Extra context for reference queries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferenceContext {
    /// Whether the declaration itself counts as a reference.
    pub include_declaration: bool,
}

/// A symbol query: one document, one cursor position, optional context.
///
/// Immutable for the lifetime of one composed operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Query {
    pub document: DocumentRef,
    pub position: Position,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<ReferenceContext>,
}

impl Query {
    pub fn new(document: DocumentRef, position: Position) -> Self {
        Self {
            document,
            position,
            context: None,
        }
    }

    pub fn with_context(mut self, context: ReferenceContext) -> Self {
        self.context = Some(context);
        self
    }
}
