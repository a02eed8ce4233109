use serde::{Deserialize, Serialize};

/// provenance of an itinerary segment.
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(into = "u8", try_from = "u8")]
pub enum Imputed {
    /// segment as delivered by the feed
    #[default]
    Original,
    /// segment produced by a pseudo-node split
    PseudoNode,
    /// segment produced by shortest-path repair or back-and-forth collapse
    Repaired,
}

impl From<Imputed> for u8 {
    fn from(value: Imputed) -> Self {
        match value {
            Imputed::Original => 0,
            Imputed::PseudoNode => 1,
            Imputed::Repaired => 2,
        }
    }
}

impl TryFrom<u8> for Imputed {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Imputed::Original),
            1 => Ok(Imputed::PseudoNode),
            2 => Ok(Imputed::Repaired),
            other => Err(format!("invalid imputed flag {other}, expected 0, 1 or 2")),
        }
    }
}
