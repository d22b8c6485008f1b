//! Hover payloads and the precision annotations attached to results.

use serde::{Deserialize, Serialize};

/// Rendered hover documentation for a symbol.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HoverContent {
    /// Markdown body shown in the hover tooltip.
    pub markdown: String,
}

impl HoverContent {
    pub fn new(markdown: impl Into<String>) -> Self {
        Self {
            markdown: markdown.into(),
        }
    }
}

/// How much precise-index coverage the surrounding language declares.
///
/// A configuration-time classification, not a per-request measurement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SupportLevel {
    None,
    Experimental,
    Robust,
}

/// Provenance/quality tag attached to hover results.
///
/// At most one alert set is attached per logical hover operation; later
/// yields of the same operation omit it so the UI never repeats banners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "kind")]
pub enum Alert {
    /// Backed by the precise index.
    Precise,
    /// Precise hover text exists but the repository is not fully indexed.
    PartialPrecise,
    /// Served by the live protocol analyzer.
    Protocol,
    /// The precise index knows the definition but has no hover text.
    PreciseDefinitionOnly,
    /// Heuristic result, qualified by the language's declared support.
    HeuristicSupport { level: SupportLevel },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BadgeKind {
    Info,
}

/// A single imprecision marker attachable to a location or hover value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Badge {
    pub kind: BadgeKind,
    pub hover_message: String,
}

impl Badge {
    /// The marker attached to every pattern-search-derived result.
    pub fn imprecise() -> Self {
        Self {
            kind: BadgeKind::Info,
            hover_message: "Search-based result: this may not be the exact match".to_string(),
        }
    }
}

/// One yielded hover value with its annotations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HoverResult {
    pub content: HoverContent,
    /// Attached on the first yield of an operation, empty afterwards.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub alerts: Vec<Alert>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub badge: Option<Badge>,
}

impl HoverResult {
    pub fn new(content: HoverContent) -> Self {
        Self {
            content,
            alerts: Vec::new(),
            badge: None,
        }
    }

    pub fn with_alert(mut self, alert: Alert) -> Self {
        self.alerts.push(alert);
        self
    }

    pub fn with_badge(mut self, badge: Badge) -> Self {
        self.badge = Some(badge);
        self
    }
}
