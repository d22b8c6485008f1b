//! Result shapes yielded by the composed operations.

use serde::{Deserialize, Serialize};

use crate::hover::{Badge, HoverContent};
use crate::location::{CodeLocation, Range};

/// A location result with an optional imprecision marker.
///
/// Precise and protocol results are bare; heuristic results always carry
/// the imprecise badge. The badge never alters the location identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Located {
    pub location: CodeLocation,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub badge: Option<Badge>,
}

impl Located {
    /// A result from an authoritative backend, no badge.
    pub fn bare(location: CodeLocation) -> Self {
        Self {
            location,
            badge: None,
        }
    }

    /// A pattern-search result, marked imprecise.
    pub fn badged(location: CodeLocation) -> Self {
        Self {
            location,
            badge: Some(Badge::imprecise()),
        }
    }
}

/// How a highlighted occurrence is used at its site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum HighlightKind {
    Text,
    Read,
    Write,
}

/// One in-document occurrence for the document-highlights operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Highlight {
    pub range: Range,
    pub kind: HighlightKind,
}

impl Highlight {
    pub fn new(range: Range, kind: HighlightKind) -> Self {
        Self { range, kind }
    }
}

/// Everything a single precise-index lookup can answer.
///
/// The lookup as a whole may come back empty (`Option<PreciseData>`); each
/// field may independently be empty when the index covers only part of the
/// repository.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreciseData {
    #[serde(default)]
    pub definition: Vec<CodeLocation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hover: Option<HoverContent>,
    #[serde(default)]
    pub references: Vec<CodeLocation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub highlights: Option<Vec<Highlight>>,
}
