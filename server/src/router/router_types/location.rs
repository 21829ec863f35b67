//! Struct definitions and implementations for [`Location`].

use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

/// A [`Location`] is the geographic position of an airport, as found
/// in the airport dataset. Typically, this type is used to draw the
/// legs of a selected itinerary on a map.
#[derive(Debug, PartialEq, Hash, Eq, Copy, Clone, Serialize, Deserialize)]
pub struct Location {
    /// The latitude of the location in degrees.
    pub latitude: OrderedFloat<f64>,

    /// The longitude of the location in degrees.
    pub longitude: OrderedFloat<f64>,
}

impl Location {
    /// Creates a location from plain degree values.
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Location {
            latitude: OrderedFloat(latitude),
            longitude: OrderedFloat(longitude),
        }
    }
}

impl From<(f64, f64)> for Location {
    fn from((latitude, longitude): (f64, f64)) -> Self {
        Location::new(latitude, longitude)
    }
}
