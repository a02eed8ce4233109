use super::ActionCode;
use crate::model::NodeId;
use serde::{Deserialize, Serialize};

/// link row of the network extract.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkRow {
    pub link_id: String,
    pub anode: NodeId,
    pub bnode: NodeId,
    pub directions: u8,
    pub miles: f64,
    #[serde(default)]
    pub type1: i32,
    #[serde(default)]
    pub type2: i32,
    #[serde(default)]
    pub speed1: f64,
    #[serde(default)]
    pub speed2: f64,
    /// 1 for links present in the base network, 0 for links that only
    /// exist once a pending project adds them
    #[serde(default = "default_baselink")]
    pub baselink: u8,
}

fn default_baselink() -> u8 {
    1
}

/// node row of the network extract, coordinates in feet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeRow {
    pub node: NodeId,
    pub x: f64,
    pub y: f64,
}

/// pending project action against a link.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PendingActionRow {
    pub link_id: String,
    pub action: ActionCode,
    #[serde(default)]
    pub speed: Option<f64>,
    #[serde(default)]
    pub directions: Option<u8>,
}
