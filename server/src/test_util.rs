/// test utilities. Provides builders for itinerary fixtures.
use crate::router::{Itinerary, Segment};
use chrono::{Duration, NaiveDate, NaiveDateTime};

/// Writes a debug! message to the test logger
#[macro_export]
macro_rules! ut_debug {
    ($($arg:tt)+) => {
        log::debug!(target: "test", $($arg)+)
    };
}

/// Writes an info! message to the test logger
#[macro_export]
macro_rules! ut_info {
    ($($arg:tt)+) => {
        log::info!(target: "test", $($arg)+)
    };
}

/// Writes an warn! message to the test logger
#[macro_export]
macro_rules! ut_warn {
    ($($arg:tt)+) => {
        log::warn!(target: "test", $($arg)+)
    };
}

/// Writes an error! message to the test logger
#[macro_export]
macro_rules! ut_error {
    ($($arg:tt)+) => {
        log::error!(target: "test", $($arg)+)
    };
}

fn departure_time() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 11, 1)
        .and_then(|date| date.and_hms_opt(8, 0, 0))
        .expect("valid fixture date")
}

/// A one hour leg between two airports on a fixed date.
pub fn segment(departure: &str, arrival: &str) -> Segment {
    let departure_at = departure_time();
    Segment {
        departure: departure.to_string(),
        arrival: arrival.to_string(),
        departure_at,
        arrival_at: departure_at + Duration::hours(1),
        carrier_code: String::from("XX"),
    }
}

/// An EUR itinerary flying `hops` in order, e.g. `&["JFK", "LHR", "CDG"]`
/// gives two segments.
pub fn itinerary(duration: i64, price: &str, hops: &[&str]) -> Itinerary {
    let segments = hops
        .windows(2)
        .map(|pair| segment(pair[0], pair[1]))
        .collect::<Vec<Segment>>();

    Itinerary::new(Some(duration), Some(price.to_string()), "EUR", segments)
}
