use crate::model::NodeId;
use std::fmt::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathFailureReason {
    OriginNotInNetwork,
    DestinationNotInNetwork,
    /// the endpoints are in the network but not connected inside any
    /// searched window
    NoPath,
}

impl Display for PathFailureReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            PathFailureReason::OriginNotInNetwork => "origin is not in the network",
            PathFailureReason::DestinationNotInNetwork => "destination is not in the network",
            PathFailureReason::NoPath => "no path within the search window",
        };
        write!(f, "{s}")
    }
}

/// an (origin, destination) pair that could not be repaired, with the routes
/// whose gaps it affects.
#[derive(Debug, Clone, PartialEq)]
pub struct PathFailure {
    pub origin: NodeId,
    pub destination: NodeId,
    pub reason: PathFailureReason,
    pub lines: Vec<String>,
}
