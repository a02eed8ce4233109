use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// MHN link directionality code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Directionality {
    /// 1: traversable from anode to bnode only
    OneWay,
    /// 2: traversable both ways with identical attributes
    TwoWay,
    /// 3: traversable both ways, attributes differ by direction
    TwoWayAsymmetric,
}

impl Directionality {
    pub fn is_two_way(&self) -> bool {
        !matches!(self, Directionality::OneWay)
    }
}

impl From<Directionality> for u8 {
    fn from(value: Directionality) -> Self {
        match value {
            Directionality::OneWay => 1,
            Directionality::TwoWay => 2,
            Directionality::TwoWayAsymmetric => 3,
        }
    }
}

impl TryFrom<u8> for Directionality {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Directionality::OneWay),
            2 => Ok(Directionality::TwoWay),
            3 => Ok(Directionality::TwoWayAsymmetric),
            other => Err(format!("invalid directions code {other}, expected 1, 2 or 3")),
        }
    }
}

impl Display for Directionality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", u8::from(*self))
    }
}
