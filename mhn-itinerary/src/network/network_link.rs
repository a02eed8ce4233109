use super::Directionality;
use crate::model::NodeId;
use serde::{Deserialize, Serialize};

/// multiplier used to pack a directed node pair into a single edge id.
pub const EDGE_ID_FACTOR: i64 = 100000;

/// packs a directed node pair as `a * 100000 + b`.
pub fn edge_id(a: NodeId, b: NodeId) -> i64 {
    a.0 * EDGE_ID_FACTOR + b.0
}

/// a conflated network link in its canonical (coded) direction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkLink {
    pub link_id: String,
    pub anode: NodeId,
    pub bnode: NodeId,
    pub directionality: Directionality,
    pub miles: f64,
    pub type1: i32,
    pub type2: i32,
    pub speed1: f64,
    pub speed2: f64,
}

impl NetworkLink {
    pub fn canonical(&self) -> (NodeId, NodeId) {
        (self.anode, self.bnode)
    }

    pub fn edge_id(&self) -> i64 {
        edge_id(self.anode, self.bnode)
    }
}

/// one traversable direction of a [`NetworkLink`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectedLink {
    /// index of the link in the graph's link list
    pub link_index: usize,
    pub miles: f64,
}
