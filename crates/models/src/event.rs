//! The fixed telemetry event vocabulary.

use serde::{Deserialize, Serialize};

/// One countable thing a composed operation did.
///
/// Each name fires at most once per operation invocation, however many
/// result batches that invocation yields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TelemetryEvent {
    PreciseDefinitions,
    ProtocolDefinitions,
    HeuristicDefinitions,
    PreciseReferences,
    ProtocolReferences,
    HeuristicReferences,
    PreciseHover,
    ProtocolHover,
    HeuristicHover,
    PreciseDocumentHighlights,
}

impl TelemetryEvent {
    pub fn as_str(&self) -> &'static str {
        match self {
            TelemetryEvent::PreciseDefinitions => "preciseDefinitions",
            TelemetryEvent::ProtocolDefinitions => "protocolDefinitions",
            TelemetryEvent::HeuristicDefinitions => "heuristicDefinitions",
            TelemetryEvent::PreciseReferences => "preciseReferences",
            TelemetryEvent::ProtocolReferences => "protocolReferences",
            TelemetryEvent::HeuristicReferences => "heuristicReferences",
            TelemetryEvent::PreciseHover => "preciseHover",
            TelemetryEvent::ProtocolHover => "protocolHover",
            TelemetryEvent::HeuristicHover => "heuristicHover",
            TelemetryEvent::PreciseDocumentHighlights => "preciseDocumentHighlights",
        }
    }
}

impl std::fmt::Display for TelemetryEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_match_serde_rename() {
        let json = serde_json::to_string(&TelemetryEvent::PreciseDocumentHighlights).unwrap();
        assert_eq!(json, "\"preciseDocumentHighlights\"");
        assert_eq!(
            TelemetryEvent::PreciseDocumentHighlights.as_str(),
            "preciseDocumentHighlights"
        );
    }
}
