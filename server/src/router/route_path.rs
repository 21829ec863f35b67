//! Turn a selected itinerary into drawable legs.

use super::router_types::{itinerary::Itinerary, location::Location};
use super::router_utils::haversine;
use serde::Serialize;

/// Looks up the position of an airport by IATA code.
///
/// Any `Fn(&str) -> Option<Location>` is a lookup, which keeps test
/// fixtures small.
pub trait AirportLookup {
    /// Coordinates of the airport, if it is known.
    fn coordinates(&self, iata_code: &str) -> Option<Location>;
}

impl<F> AirportLookup for F
where
    F: Fn(&str) -> Option<Location>,
{
    fn coordinates(&self, iata_code: &str) -> Option<Location> {
        self(iata_code)
    }
}

/// One drawable segment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteLeg {
    /// IATA code of the departure airport.
    pub departure: String,
    /// Position of the departure airport.
    pub departure_location: Location,
    /// IATA code of the arrival airport.
    pub arrival: String,
    /// Position of the arrival airport.
    pub arrival_location: Location,
    /// Great-circle length in kilometers.
    pub distance_km: f64,
}

/// The legs of an itinerary that can be drawn on a map.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RoutePath {
    /// Legs in flying order.
    pub legs: Vec<RouteLeg>,
}

impl RoutePath {
    /// Sum of the drawn legs, in kilometers.
    pub fn total_distance_km(&self) -> f64 {
        self.legs.iter().map(|leg| leg.distance_km).sum()
    }
}

/// Resolve every segment of `itinerary` against `lookup`.
///
/// A segment is only drawn when both of its airports have coordinates.
pub fn route_path(itinerary: &Itinerary, lookup: &dyn AirportLookup) -> RoutePath {
    let legs = itinerary
        .segments
        .iter()
        .filter_map(|segment| {
            let departure_location = lookup.coordinates(&segment.departure);
            let arrival_location = lookup.coordinates(&segment.arrival);
            let (Some(departure_location), Some(arrival_location)) =
                (departure_location, arrival_location)
            else {
                router_warn!(
                    "(route_path) Missing coordinates for {} -> {}, leg not drawn.",
                    segment.departure,
                    segment.arrival
                );
                return None;
            };

            Some(RouteLeg {
                departure: segment.departure.clone(),
                departure_location,
                arrival: segment.arrival.clone(),
                arrival_location,
                distance_km: haversine::distance(&departure_location, &arrival_location),
            })
        })
        .collect::<Vec<RouteLeg>>();

    router_debug!("(route_path) {} legs: {:?}", legs.len(), legs);
    RoutePath { legs }
}
