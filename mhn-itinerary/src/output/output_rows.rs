use crate::model::{Imputed, NodeId, RepairGap, TransitMode};
use serde::{Deserialize, Serialize};

/// a row of the final itinerary file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItineraryRow {
    pub line: String,
    pub itin_a: NodeId,
    pub itin_b: NodeId,
    pub layover: u32,
    pub dwell_code: i32,
    pub zone_fare: f64,
    pub line_serv_time: f64,
    pub ttf: i32,
    pub itin_order: usize,
    /// sequence number of the owning route
    pub route_sequence: usize,
    /// 1-based position of the row in the file
    pub row_index: usize,
    /// canonical edge id, empty for segments left off the network
    pub edge_id: Option<i64>,
    pub batch: usize,
    pub dep_time: i64,
    pub arr_time: i64,
    pub stop_count: u32,
    pub imputed: Imputed,
    pub f_meas: f64,
    pub t_meas: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathNodeRow {
    pub line: String,
    pub node: NodeId,
    pub rank: usize,
    pub batch: usize,
}

/// rebuilt route header.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteHeaderRow {
    pub line: String,
    pub description: String,
    pub mode: TransitMode,
    #[serde(rename = "type")]
    pub type_code: u8,
    pub headway: u32,
    pub speed: f64,
    pub segment_count: usize,
    pub stop_count: u32,
    pub batch: usize,
    pub route_id: String,
    pub long_name: String,
    pub direction: String,
    pub terminal: String,
    pub start_time: Option<String>,
    pub start_hour: Option<i64>,
    pub am_share: f64,
    pub tod: Option<u8>,
    pub review: u8,
    pub vehicle: Option<String>,
}

/// a canonical link used by the final itineraries with the directions in
/// which it may be traversed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllowableLinkRow {
    pub edge_id: i64,
    pub anode: NodeId,
    pub bnode: NodeId,
    pub forward: u8,
    pub backward: u8,
}

/// a gap found by verification, written by the verify command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepairGapRow {
    pub line: String,
    pub order: f64,
    pub origin: NodeId,
    pub destination: NodeId,
    pub dep_time: i64,
    pub arr_time: i64,
    pub stop_count: u32,
    pub line_serv_time: f64,
    pub excised_segments: usize,
}

impl From<&RepairGap> for RepairGapRow {
    fn from(gap: &RepairGap) -> Self {
        RepairGapRow {
            line: gap.line.clone(),
            order: gap.order,
            origin: gap.origin,
            destination: gap.destination,
            dep_time: gap.dep_time,
            arr_time: gap.arr_time,
            stop_count: gap.stop_count,
            line_serv_time: gap.line_serv_time,
            excised_segments: gap.excised.len(),
        }
    }
}
