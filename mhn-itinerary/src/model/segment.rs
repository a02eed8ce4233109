use super::{Imputed, NodeId};
use serde::{Deserialize, Serialize};

/// itinerary segment as delivered by the feed extract. node ids may be
/// missing when a stop was not snapped to the network, and the order may be
/// fractional where pseudo-nodes were inserted upstream.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawSegmentRow {
    pub route_id: String,
    #[serde(default)]
    pub itin_a: Option<NodeId>,
    #[serde(default)]
    pub itin_b: Option<NodeId>,
    pub order: f64,
    #[serde(default)]
    pub dwell_code: i32,
    #[serde(default)]
    pub zone_fare: f64,
    #[serde(default)]
    pub line_serv_time: f64,
    #[serde(default)]
    pub ttf: i32,
    #[serde(default)]
    pub dep_time: i64,
    #[serde(default)]
    pub arr_time: i64,
    #[serde(default)]
    pub stop_count: u32,
}

/// a directed node-to-node leg of a route's itinerary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItinerarySegment {
    /// generated route code of the owning route
    pub line: String,
    pub order: f64,
    pub itin_a: NodeId,
    pub itin_b: NodeId,
    pub dwell_code: i32,
    pub zone_fare: f64,
    /// scheduled travel time in minutes
    pub line_serv_time: f64,
    /// total travel time flag
    pub ttf: i32,
    pub dep_time: i64,
    pub arr_time: i64,
    pub stop_count: u32,
    pub imputed: Imputed,
}

impl ItinerarySegment {
    pub fn node_pair(&self) -> (NodeId, NodeId) {
        (self.itin_a, self.itin_b)
    }

    /// the segment starts and ends at the same node and encodes no movement.
    pub fn is_same_node(&self) -> bool {
        self.itin_a == self.itin_b
    }

    /// true if `next` picks up where this segment ends on the same route.
    pub fn continues_into(&self, next: &ItinerarySegment) -> bool {
        self.line == next.line && self.itin_b == next.itin_a
    }

    /// `other` traverses the same node pair in the opposite direction.
    pub fn reverses(&self, other: &ItinerarySegment) -> bool {
        self.itin_a == other.itin_b && self.itin_b == other.itin_a
    }

    /// scheduled wall-clock seconds between departure and arrival.
    pub fn elapsed_seconds(&self) -> i64 {
        (self.arr_time - self.dep_time).max(0)
    }
}

/// sorts segments by route code, then by itinerary order.
pub fn sort_segments(segments: &mut [ItinerarySegment]) {
    segments.sort_by(|a, b| {
        a.line
            .cmp(&b.line)
            .then_with(|| a.order.total_cmp(&b.order))
    });
}
