pub mod clock;
mod diagnostic;
mod imputed;
mod itinerary_error;
mod node_id;
mod repair_gap;
mod route;
mod segment;
mod transit_mode;

pub use diagnostic::{Diagnostic, DiagnosticKind, Diagnostics};
pub use imputed::Imputed;
pub use itinerary_error::ItineraryError;
pub use node_id::NodeId;
pub use repair_gap::RepairGap;
pub use route::{RawRouteRow, Route};
pub use segment::{sort_segments, ItinerarySegment, RawSegmentRow};
pub use transit_mode::{is_pace_line, TransitMode};
