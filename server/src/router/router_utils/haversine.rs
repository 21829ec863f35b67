//! Implementation of the Haversine formula for calculating the distance
//! between two points on a sphere.
//!
//! See [Wikipedia](https://en.wikipedia.org/wiki/Haversine_formula) for
//! more.
//!
//! **Distance is returned in kilometers**.

use crate::router::router_types::location::Location;

/// Mean earth radius in kilometers.
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Calculate the great-circle distance between two airports.
pub fn distance(start: &Location, end: &Location) -> f64 {
    let d_lat: f64 = (end.latitude.into_inner() - start.latitude.into_inner()).to_radians();
    let d_lon: f64 = (end.longitude.into_inner() - start.longitude.into_inner()).to_radians();
    let lat1: f64 = (start.latitude.into_inner()).to_radians();
    let lat2: f64 = (end.latitude.into_inner()).to_radians();

    let a: f64 = ((d_lat / 2.0).sin()) * ((d_lat / 2.0).sin())
        + ((d_lon / 2.0).sin()) * ((d_lon / 2.0).sin()) * (lat1.cos()) * (lat2.cos());
    let c: f64 = 2.0 * ((a.sqrt()).atan2((1.0 - a).sqrt()));

    EARTH_RADIUS_KM * c
}

#[cfg(test)]
pub mod haversine_test {
    use super::*;

    #[test]
    fn haversine_distance_in_kilometers() {
        let start = Location::new(38.898556, -77.037852);
        let end = Location::new(38.897147, -77.043934);
        assert!((distance(&start, &end) - 0.5492).abs() < 1e-3);
    }

    #[test]
    fn haversine_same_point_is_zero() {
        let jfk = Location::new(40.639751, -73.778925);
        assert_eq!(distance(&jfk, &jfk), 0.0);
    }

    #[test]
    fn haversine_transatlantic() {
        // JFK -> LHR is roughly 5540 km
        let jfk = Location::new(40.639751, -73.778925);
        let lhr = Location::new(51.4706, -0.461941);
        let d = distance(&jfk, &lhr);
        assert!(d > 5500.0 && d < 5600.0, "unexpected distance {d}");
    }
}
