//! clock-time helpers. itinerary times are integer seconds since midnight of
//! the service day and may exceed 24:00:00 for trips running past midnight.
//! travel times are minutes with one decimal place.
use chrono::NaiveTime;

pub const SECONDS_PER_MINUTE: f64 = 60.0;
pub const SECONDS_PER_HOUR: i64 = 3600;
pub const SECONDS_PER_DAY: i64 = 86400;

/// 07:00:00, first second of the AM peak
pub const AM_PEAK_START: i64 = 25200;
/// 09:00:00, last second of the AM peak
pub const AM_PEAK_END: i64 = 32400;

/// smallest travel time written for a segment, in minutes
pub const MIN_TRAVEL_MINUTES: f64 = 0.1;

/// rounds to the 0.1 minute precision of the itinerary files.
pub fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// rounds to two decimal places, used for shares.
pub fn round_to_hundredth(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// converts a travel duration in seconds to itinerary minutes, never below
/// [`MIN_TRAVEL_MINUTES`].
pub fn travel_minutes(seconds: f64) -> f64 {
    round_to_tenth(seconds / SECONDS_PER_MINUTE).max(MIN_TRAVEL_MINUTES)
}

/// hour of the day for a clock time, wrapping times past midnight.
pub fn hour_of_day(seconds: i64) -> i64 {
    seconds.rem_euclid(SECONDS_PER_DAY) / SECONDS_PER_HOUR
}

/// formats seconds since midnight as HH:MM:SS on a 24 hour clock.
pub fn format_clock(seconds: i64) -> Option<String> {
    let secs = u32::try_from(seconds.rem_euclid(SECONDS_PER_DAY)).ok()?;
    NaiveTime::from_num_seconds_from_midnight_opt(secs, 0)
        .map(|t| t.format("%H:%M:%S").to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_travel_minutes_floor() {
        assert_eq!(travel_minutes(0.0), 0.1);
        assert_eq!(travel_minutes(90.0), 1.5);
        assert_eq!(travel_minutes(125.0), 2.1);
    }

    #[test]
    fn test_format_clock_wraps_past_midnight() {
        assert_eq!(format_clock(AM_PEAK_START).as_deref(), Some("07:00:00"));
        assert_eq!(format_clock(90061).as_deref(), Some("01:01:01"));
        assert_eq!(hour_of_day(90061), 1);
    }
}
