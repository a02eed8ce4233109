use super::{clock, TransitMode};
use serde::{Deserialize, Serialize};

/// route header as delivered by the feed extract.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawRouteRow {
    pub route_id: String,
    pub mode: String,
    #[serde(default)]
    pub long_name: String,
    #[serde(default)]
    pub direction: String,
    #[serde(default)]
    pub terminal: String,
    #[serde(default)]
    pub speed: Option<f64>,
    #[serde(default)]
    pub vehicle: Option<String>,
}

/// a normalized route header. `line` is the generated route code used as the
/// join key for all of the route's itinerary segments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    pub line: String,
    pub route_id: String,
    pub mode: TransitMode,
    pub description: String,
    pub long_name: String,
    pub direction: String,
    pub terminal: String,
    /// default speed in miles per hour
    pub speed: f64,
    pub vehicle: Option<String>,
    /// 1-based position of the route in the normalized route list
    pub sequence: usize,
    pub batch: usize,
    /// headway in seconds, derived from the start hour
    pub headway: u32,
    /// first non-zero clock time of the route, seconds since midnight
    pub start_time: Option<i64>,
    pub am_share: f64,
    /// set when the itinerary could not be fully repaired
    pub review: bool,
}

impl Route {
    pub fn start_hour(&self) -> Option<i64> {
        self.start_time.map(clock::hour_of_day)
    }

    /// time-of-day period of the route's start:
    ///
    /// | period | hours |
    /// |--------|-------|
    /// | 1      | 8PM-6AM |
    /// | 2      | 6AM-7AM |
    /// | 3      | 7AM-9AM |
    /// | 4      | 9AM-10AM |
    /// | 5      | 10AM-2PM |
    /// | 6      | 2PM-4PM |
    /// | 7      | 4PM-6PM |
    /// | 8      | 6PM-8PM |
    pub fn tod_period(&self) -> Option<u8> {
        self.start_hour().map(|hour| match hour {
            h if h >= 20 || h <= 5 => 1,
            6 => 2,
            7 | 8 => 3,
            9 => 4,
            10..=13 => 5,
            14 | 15 => 6,
            16 | 17 => 7,
            _ => 8,
        })
    }

    /// routes running more than half of their segments in the AM peak are
    /// also modeled in the AM peak period.
    pub fn in_am_peak_period(&self) -> bool {
        self.am_share >= 0.5
    }
}
