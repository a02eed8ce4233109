use crate::model::{ItineraryError, NodeId, TransitMode};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// forces a coded segment of a route through one or two intermediate nodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PseudoNodeCorrection {
    pub mode: TransitMode,
    pub route_id: String,
    pub itin_a: NodeId,
    pub itin_b: NodeId,
    /// forced intermediate nodes, in travel order
    pub nodes: Vec<NodeId>,
}

impl PseudoNodeCorrection {
    /// number of sub-segments the corrected segment is split into.
    pub fn segment_count(&self) -> usize {
        self.nodes.len() + 1
    }
}

/// zone-based surcharge charged on boarding a Pace route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaceFare {
    pub mode: TransitMode,
    pub route_id: String,
    pub fare: f64,
}

/// static correction data reviewed independently of the pipeline logic. the
/// version tag identifies the feed release the tables were prepared for.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CorrectionTables {
    pub version: Option<String>,
    pub pseudo_nodes: Vec<PseudoNodeCorrection>,
    pub pace_fares: Vec<PaceFare>,
}

pub type PseudoNodeKey<'a> = (TransitMode, &'a str, NodeId, NodeId);

impl CorrectionTables {
    pub fn validate(&self) -> Result<(), ItineraryError> {
        for row in self.pseudo_nodes.iter() {
            if row.nodes.is_empty() || row.nodes.len() > 2 {
                return Err(ItineraryError::ConfigurationError(format!(
                    "pseudo-node correction for route {} {} ({}, {}) must list 1 or 2 nodes, found {}",
                    row.mode,
                    row.route_id,
                    row.itin_a,
                    row.itin_b,
                    row.nodes.len()
                )));
            }
        }
        for row in self.pace_fares.iter() {
            if !row.fare.is_finite() || row.fare < 0.0 {
                return Err(ItineraryError::ConfigurationError(format!(
                    "pace fare for route {} {} must be a non-negative amount, found {}",
                    row.mode, row.route_id, row.fare
                )));
            }
        }
        Ok(())
    }

    /// lookup from (mode, route id, itin_a, itin_b) to the forced nodes.
    pub fn pseudo_node_lookup(&self) -> HashMap<PseudoNodeKey<'_>, &[NodeId]> {
        self.pseudo_nodes
            .iter()
            .map(|row| {
                (
                    (row.mode, row.route_id.as_str(), row.itin_a, row.itin_b),
                    row.nodes.as_slice(),
                )
            })
            .collect()
    }

    /// lookup from (mode, route id) to the zone fare.
    pub fn pace_fare_lookup(&self) -> HashMap<(TransitMode, &str), f64> {
        self.pace_fares
            .iter()
            .map(|row| ((row.mode, row.route_id.as_str()), row.fare))
            .collect()
    }
}
