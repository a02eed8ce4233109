//! planar distance helpers. MHN node coordinates are state plane feet.
use geo::{Coord, Distance, Euclidean, Point};
use uom::si::f64::{Length, Time, Velocity};

/// straight-line distance between two planar coordinates in feet.
pub fn straight_line_distance(a: Coord<f64>, b: Coord<f64>) -> Length {
    let feet = Euclidean.distance(Point(a), Point(b));
    Length::new::<uom::si::length::foot>(feet)
}

/// straight-line distance in miles.
pub fn straight_line_miles(a: Coord<f64>, b: Coord<f64>) -> f64 {
    straight_line_distance(a, b).get::<uom::si::length::mile>()
}

/// converts a length in miles to feet, used to size search windows.
pub fn miles_to_feet(miles: f64) -> f64 {
    Length::new::<uom::si::length::mile>(miles).get::<uom::si::length::foot>()
}

/// seconds needed to cover `distance` at `speed_mph`.
pub fn travel_seconds(distance: Length, speed_mph: f64) -> f64 {
    let speed = Velocity::new::<uom::si::velocity::mile_per_hour>(speed_mph);
    let time: Time = distance / speed;
    time.get::<uom::si::time::second>()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_straight_line_miles() {
        let a = Coord { x: 0.0, y: 0.0 };
        let b = Coord {
            x: 3.0 * 5280.0,
            y: 4.0 * 5280.0,
        };
        assert!((straight_line_miles(a, b) - 5.0).abs() < 1e-9);
        assert!((miles_to_feet(1.0) - 5280.0).abs() < 1e-9);
    }

    #[test]
    fn test_travel_seconds() {
        let distance = Length::new::<uom::si::length::mile>(15.0);
        assert!((travel_seconds(distance, 30.0) - 1800.0).abs() < 1e-6);
    }
}
