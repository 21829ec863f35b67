//! Flight offer ingestion
//!
//! Decodes a flight-offers search response and flattens it into the
//! [`Itinerary`] list the router scores. This is the boundary where raw
//! provider durations are turned into minutes.

#[macro_use]
pub mod macros;

use crate::router::{parse_raw_duration, Itinerary, ScoringObserver, Segment};
use chrono::NaiveDateTime;
use serde::Deserialize;
use serde_json::Value;
use std::fmt::{Display, Formatter, Result as FmtResult};

/// Errors that may occur while reading a provider response
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum OffersError {
    /// The response is not valid JSON for a flight-offers search
    Json,

    /// The response decoded but describes an unusable itinerary
    InvalidData,
}

impl Display for OffersError {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        match self {
            OffersError::Json => write!(f, "Invalid flight offers response."),
            OffersError::InvalidData => write!(f, "Invalid data."),
        }
    }
}

impl std::error::Error for OffersError {}

/// Top level of a flight-offers search response.
#[derive(Debug, Deserialize)]
pub struct FlightOffersResponse {
    /// Offers found, absent when the search matched nothing.
    #[serde(default)]
    pub data: Option<Vec<FlightOffer>>,
}

/// One priced offer. All of its itineraries share the price.
#[derive(Debug, Deserialize)]
pub struct FlightOffer {
    /// Itineraries of the offer, usually one for a one-way search.
    pub itineraries: Vec<OfferItinerary>,

    /// Price of the whole offer.
    #[serde(default)]
    pub price: Option<OfferPrice>,
}

/// Price block of an offer.
#[derive(Debug, Deserialize)]
pub struct OfferPrice {
    /// Total price, sent as a string such as `"512.20"`.
    #[serde(default)]
    pub total: Option<Value>,

    /// ISO-4217 currency code.
    #[serde(default)]
    pub currency: Option<String>,
}

/// One itinerary of an offer.
#[derive(Debug, Deserialize)]
pub struct OfferItinerary {
    /// Raw duration: ISO-8601 text or minutes.
    #[serde(default)]
    pub duration: Option<Value>,

    /// Legs in flying order.
    pub segments: Vec<OfferSegment>,
}

/// One leg of an offer itinerary.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OfferSegment {
    /// Where the leg leaves from.
    pub departure: OfferEndpoint,

    /// Where the leg lands.
    pub arrival: OfferEndpoint,

    /// Marketing carrier.
    pub carrier_code: String,
}

/// Airport and local time of a departure or arrival.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OfferEndpoint {
    /// IATA code of the airport.
    pub iata_code: String,

    /// Local time, e.g. `2024-11-01T10:35:00`.
    pub at: NaiveDateTime,
}

impl From<OfferSegment> for Segment {
    fn from(segment: OfferSegment) -> Self {
        Segment {
            departure: segment.departure.iata_code,
            arrival: segment.arrival.iata_code,
            departure_at: segment.departure.at,
            arrival_at: segment.arrival.at,
            carrier_code: segment.carrier_code,
        }
    }
}

/// The provider total as text, kept verbatim for the scorer to judge.
fn price_text(total: Option<Value>) -> Option<String> {
    match total? {
        Value::Null => None,
        Value::String(text) => Some(text),
        other => Some(other.to_string()),
    }
}

/// Flatten a decoded response into itineraries.
///
/// Every itinerary of an offer gets the offer's price and currency;
/// `default_currency` fills in a missing currency.
pub fn to_itineraries(
    response: FlightOffersResponse,
    default_currency: &str,
    observer: &mut dyn ScoringObserver,
) -> Result<Vec<Itinerary>, OffersError> {
    let Some(offers) = response.data else {
        offers_info!("(to_itineraries) Response has no data, no flights found.");
        return Ok(vec![]);
    };

    let mut itineraries: Vec<Itinerary> = vec![];
    for (offer_index, offer) in offers.into_iter().enumerate() {
        let (price, currency) = match offer.price {
            Some(price) => (price_text(price.total), price.currency),
            None => (None, None),
        };
        let currency = currency.unwrap_or_else(|| default_currency.to_string());

        for itinerary in offer.itineraries {
            if itinerary.segments.is_empty() {
                offers_error!(
                    "(to_itineraries) Offer {} has an itinerary without segments.",
                    offer_index
                );
                return Err(OffersError::InvalidData);
            }

            let duration = match &itinerary.duration {
                Some(raw) => Some(parse_raw_duration(raw, observer)),
                None => None,
            };

            let segments: Vec<Segment> =
                itinerary.segments.into_iter().map(Segment::from).collect();
            itineraries.push(Itinerary::new(
                duration,
                price.clone(),
                currency.clone(),
                segments,
            ));
        }
    }

    offers_debug!("(to_itineraries) {} itineraries.", itineraries.len());
    Ok(itineraries)
}

/// Decode a flight-offers search response into itineraries.
pub fn parse_offers(
    json: &str,
    default_currency: &str,
    observer: &mut dyn ScoringObserver,
) -> Result<Vec<Itinerary>, OffersError> {
    let response: FlightOffersResponse = serde_json::from_str(json).map_err(|e| {
        offers_error!("(parse_offers) Could not decode response: {}", e);
        OffersError::Json
    })?;

    to_itineraries(response, default_currency, observer)
}
