use crate::model::{ItinerarySegment, NodeId, RepairGap};
use std::collections::BTreeSet;

/// partition of an itinerary into segments found on the network and the
/// gaps that must be repaired.
#[derive(Debug, Clone, Default)]
pub struct VerificationResult {
    pub matched: Vec<ItinerarySegment>,
    pub gaps: Vec<RepairGap>,
    /// number of segments excised into gaps
    pub held_count: usize,
    /// itinerary nodes without network coordinates
    pub missing_nodes: BTreeSet<NodeId>,
}

impl VerificationResult {
    pub fn is_clean(&self) -> bool {
        self.gaps.is_empty()
    }
}
