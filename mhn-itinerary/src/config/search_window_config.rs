use crate::model::ItineraryError;
use serde::{Deserialize, Serialize};

/// sizing of the network window searched when repairing a gap.
///
/// the window is the bounding box of the gap's endpoints padded on every side
/// by `margin_miles * multiplier`, where the multiplier is the endpoint
/// separation measured in margins, clamped to
/// `[min_multiplier, max_multiplier]`. the defaults pin the multiplier at 3.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchWindowConfig {
    pub margin_miles: f64,
    pub min_multiplier: f64,
    pub max_multiplier: f64,
    /// number of times a failed search is retried with the margin doubled
    pub max_expansions: u32,
}

impl Default for SearchWindowConfig {
    fn default() -> Self {
        Self {
            margin_miles: 1.0,
            min_multiplier: 3.0,
            max_multiplier: 3.0,
            max_expansions: 0,
        }
    }
}

impl SearchWindowConfig {
    pub fn validate(&self) -> Result<(), ItineraryError> {
        if !(self.margin_miles > 0.0) {
            return Err(ItineraryError::ConfigurationError(format!(
                "search margin must be positive, found {}",
                self.margin_miles
            )));
        }
        if self.min_multiplier < 0.0 || self.min_multiplier > self.max_multiplier {
            return Err(ItineraryError::ConfigurationError(format!(
                "search multiplier bounds must satisfy 0 <= min <= max, found [{}, {}]",
                self.min_multiplier, self.max_multiplier
            )));
        }
        Ok(())
    }

    /// padding multiplier for endpoints separated by `distance_miles`.
    pub fn multiplier(&self, distance_miles: f64) -> f64 {
        (distance_miles / self.margin_miles)
            .max(self.min_multiplier)
            .min(self.max_multiplier)
    }
}
