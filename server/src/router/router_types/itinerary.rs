//! Itineraries and segments handed to the router by the offer
//! ingestion layer.
//!
//! Both types are immutable once built: an [`Itinerary`] is created once
//! per provider response and only ever read by the scorer.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// One flown leg between two airports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    /// IATA code of the departure airport.
    pub departure: String,

    /// IATA code of the arrival airport.
    pub arrival: String,

    /// Local departure time.
    pub departure_at: NaiveDateTime,

    /// Local arrival time.
    pub arrival_at: NaiveDateTime,

    /// Operating carrier code, e.g. `AF`.
    pub carrier_code: String,
}

/// A numeric attribute of an itinerary as seen by the scorer.
#[derive(Debug, Clone, PartialEq)]
pub enum NumericField {
    /// The offer did not carry the attribute.
    Absent,

    /// The attribute converted to a finite number.
    Numeric(f64),

    /// The attribute was present but is not a number.
    NonNumeric(String),
}

impl NumericField {
    /// Parses a raw provider amount. Non-finite values are not numbers
    /// as far as scoring goes.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().parse::<f64>() {
            Ok(value) if value.is_finite() => NumericField::Numeric(value),
            _ => NumericField::NonNumeric(raw.to_string()),
        }
    }

    /// The value taking part in a normalization bound, if any.
    pub fn bound_value(&self) -> Option<f64> {
        match self {
            NumericField::Numeric(value) => Some(*value),
            _ => None,
        }
    }

    /// The value used while relaxing. A missing attribute weighs 0,
    /// a non-numeric one makes the route unusable.
    pub fn relaxation_value(&self) -> Option<f64> {
        match self {
            NumericField::Absent => Some(0.0),
            NumericField::Numeric(value) => Some(*value),
            NumericField::NonNumeric(_) => None,
        }
    }
}

/// One candidate flight offer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Itinerary {
    /// Total travel time in minutes, already converted from the
    /// provider's representation.
    pub duration: Option<i64>,

    /// Number of stops, one less than the number of segments.
    pub stops: usize,

    /// Total price exactly as the provider sent it.
    pub price: Option<String>,

    /// Currency of `price`. Not used for scoring.
    pub currency: String,

    /// Ordered legs of the itinerary.
    pub segments: Vec<Segment>,
}

impl Itinerary {
    /// Builds an itinerary, deriving the stop count from the segments.
    pub fn new(
        duration: Option<i64>,
        price: Option<String>,
        currency: impl Into<String>,
        segments: Vec<Segment>,
    ) -> Self {
        Itinerary {
            duration,
            stops: segments.len().saturating_sub(1),
            price,
            currency: currency.into(),
            segments,
        }
    }

    /// Duration as a scoring attribute.
    pub fn duration_field(&self) -> NumericField {
        match self.duration {
            Some(minutes) => NumericField::Numeric(minutes as f64),
            None => NumericField::Absent,
        }
    }

    /// Price as a scoring attribute.
    pub fn price_field(&self) -> NumericField {
        match &self.price {
            Some(raw) => NumericField::parse(raw),
            None => NumericField::Absent,
        }
    }

    /// Airport the itinerary leaves from.
    pub fn origin(&self) -> Option<&str> {
        self.segments.first().map(|s| s.departure.as_str())
    }

    /// Airport the last segment lands on.
    pub fn final_arrival(&self) -> Option<&str> {
        self.segments.last().map(|s| s.arrival.as_str())
    }
}
