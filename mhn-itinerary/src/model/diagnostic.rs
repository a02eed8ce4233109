use super::NodeId;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// categories of data-quality findings accumulated during a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    EmptyRouteId,
    UnknownMode,
    OrphanRoute,
    OrphanSegment,
    BadItineraryCoding,
    DegenerateRoute,
    UnmatchedSegment,
    MissingNetworkNode,
    PathNotFound,
    IncompleteRoute,
    QuestionableLineTime,
    CentroidConnector,
    ItineraryGap,
}

impl Display for DiagnosticKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            DiagnosticKind::EmptyRouteId => "empty_route_id",
            DiagnosticKind::UnknownMode => "unknown_mode",
            DiagnosticKind::OrphanRoute => "orphan_route",
            DiagnosticKind::OrphanSegment => "orphan_segment",
            DiagnosticKind::BadItineraryCoding => "bad_itinerary_coding",
            DiagnosticKind::DegenerateRoute => "degenerate_route",
            DiagnosticKind::UnmatchedSegment => "unmatched_segment",
            DiagnosticKind::MissingNetworkNode => "missing_network_node",
            DiagnosticKind::PathNotFound => "path_not_found",
            DiagnosticKind::IncompleteRoute => "incomplete_route",
            DiagnosticKind::QuestionableLineTime => "questionable_line_time",
            DiagnosticKind::CentroidConnector => "centroid_connector",
            DiagnosticKind::ItineraryGap => "itinerary_gap",
        };
        write!(f, "{s}")
    }
}

/// a single finding, keyed by route and node pair where known.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub line: Option<String>,
    pub route_id: Option<String>,
    pub itin_a: Option<NodeId>,
    pub itin_b: Option<NodeId>,
    pub message: String,
}

impl Diagnostic {
    pub fn new(kind: DiagnosticKind, message: impl Into<String>) -> Diagnostic {
        Diagnostic {
            kind,
            line: None,
            route_id: None,
            itin_a: None,
            itin_b: None,
            message: message.into(),
        }
    }

    pub fn with_line(mut self, line: &str) -> Diagnostic {
        self.line = Some(line.to_string());
        self
    }

    pub fn with_route_id(mut self, route_id: &str) -> Diagnostic {
        self.route_id = Some(route_id.to_string());
        self
    }

    pub fn with_nodes(mut self, itin_a: NodeId, itin_b: NodeId) -> Diagnostic {
        self.itin_a = Some(itin_a);
        self.itin_b = Some(itin_b);
        self
    }

    pub fn with_node(mut self, node: NodeId) -> Diagnostic {
        self.itin_a = Some(node);
        self
    }
}

/// diagnostics accumulated over a run and reported at the end.
#[derive(Debug, Clone, Default)]
pub struct Diagnostics(Vec<Diagnostic>);

impl Diagnostics {
    pub fn push(&mut self, diagnostic: Diagnostic) {
        log::debug!("{}: {}", diagnostic.kind, diagnostic.message);
        self.0.push(diagnostic);
    }

    pub fn of_kind(&self, kind: DiagnosticKind) -> impl Iterator<Item = &Diagnostic> {
        self.0.iter().filter(move |d| d.kind == kind)
    }

    pub fn count(&self, kind: DiagnosticKind) -> usize {
        self.of_kind(kind).count()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[Diagnostic] {
        &self.0
    }

    /// writes one log line per diagnostic category.
    pub fn log_summary(&self) {
        let counts = self.0.iter().counts_by(|d| d.kind);
        for (kind, count) in counts.into_iter().sorted() {
            log::warn!("{count} {kind} diagnostic(s)");
        }
    }
}

