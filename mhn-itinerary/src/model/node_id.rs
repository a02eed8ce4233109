use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// identifier of an MHN node. zone centroids and points of entry occupy the
/// low end of the id space, regular network nodes follow.
#[derive(
    Debug, Default, Clone, Copy, Eq, PartialEq, PartialOrd, Ord, Deserialize, Serialize, Hash,
)]
#[serde(transparent)]
pub struct NodeId(pub i64);

impl NodeId {
    /// zero and negative ids are placeholders written by the feed extract
    /// when a stop could not be snapped to a node.
    pub fn is_valid(&self) -> bool {
        self.0 > 0
    }
}

impl Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for NodeId {
    fn from(value: i64) -> Self {
        NodeId(value)
    }
}
