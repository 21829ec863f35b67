//! Diagnostics emitted while parsing durations and scoring itineraries.
//!
//! Scoring never fails on a malformed record. Instead, every soft
//! failure and every relaxation step is reported to a
//! [`ScoringObserver`]. The default [`LogObserver`] writes the events to
//! the `app::router` log target; [`RecordingObserver`] keeps them in
//! memory so callers can inspect them.

use std::fmt::{Display, Formatter, Result as FmtResult};

/// Something worth reporting happened during scoring.
#[derive(Debug, Clone, PartialEq)]
pub enum ScoringEvent {
    /// A raw duration was neither an integer nor a string. It was
    /// coerced to 0 minutes.
    DurationTypeMismatch {
        /// JSON type that was found instead.
        found: String,
    },

    /// A duration string could not be read. It was coerced to 0 minutes.
    InvalidDurationText {
        /// The offending text.
        text: String,
    },

    /// A value could not be normalized because the maximum was zero or
    /// absent. The ratio was coerced to 0.
    ZeroMaxNormalization {
        /// Value that was being normalized.
        value: f64,
        /// Maximum it was normalized against.
        max_value: Option<f64>,
    },

    /// Normalization bounds computed for the batch.
    Bounds {
        /// Largest duration among itineraries that have one.
        max_time: Option<f64>,
        /// Largest numeric price among itineraries that have one.
        max_price: Option<f64>,
    },

    /// A segment was not relaxed because its itinerary has a
    /// non-numeric duration or price.
    RouteSkipped {
        /// Position of the itinerary in the candidate list.
        route_index: usize,
        /// Departure airport of the segment.
        source: String,
        /// Arrival airport of the segment.
        destination: String,
    },

    /// A segment was relaxed.
    Relaxation {
        /// Position of the itinerary in the candidate list.
        route_index: usize,
        /// Departure airport of the segment.
        source: String,
        /// Arrival airport of the segment.
        destination: String,
        /// Duration over `max_time`.
        normalized_time: f64,
        /// Price over `max_price`.
        normalized_price: f64,
        /// Sum of both ratios.
        combined_weight: f64,
        /// Whether the arrival airport got a smaller distance.
        updated: bool,
    },

    /// The best itinerary was chosen.
    Selected {
        /// Position of the itinerary in the candidate list.
        route_index: usize,
        /// Distance recorded for its final arrival airport.
        distance: f64,
    },
}

impl Display for ScoringEvent {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        match self {
            ScoringEvent::DurationTypeMismatch { found } => write!(
                f,
                "Duration is neither a string nor an integer, found {found}; using 0 minutes."
            ),
            ScoringEvent::InvalidDurationText { text } => {
                write!(f, "Could not read duration [{text}]; using 0 minutes.")
            }
            ScoringEvent::ZeroMaxNormalization { value, max_value } => write!(
                f,
                "Max value is {max_value:?} for {value}, can not normalize; using 0."
            ),
            ScoringEvent::Bounds {
                max_time,
                max_price,
            } => write!(f, "max_time: {max_time:?}, max_price: {max_price:?}"),
            ScoringEvent::RouteSkipped {
                route_index,
                source,
                destination,
            } => write!(
                f,
                "Route {route_index} has a non-numeric duration or price, skipping {source} -> {destination}."
            ),
            ScoringEvent::Relaxation {
                route_index,
                source,
                destination,
                normalized_time,
                normalized_price,
                combined_weight,
                updated,
            } => write!(
                f,
                "Route {route_index} {source} -> {destination}: time {normalized_time}, price {normalized_price}, combined weight {combined_weight}, updated: {updated}"
            ),
            ScoringEvent::Selected {
                route_index,
                distance,
            } => write!(f, "Best route is {route_index} with distance {distance}."),
        }
    }
}

/// Receives the events of a scoring call.
pub trait ScoringObserver {
    /// Called at every decision point.
    fn on_event(&mut self, event: ScoringEvent);
}

/// Writes events to the `app::router` log target.
#[derive(Debug, Default, Copy, Clone)]
pub struct LogObserver;

impl ScoringObserver for LogObserver {
    fn on_event(&mut self, event: ScoringEvent) {
        match event {
            ScoringEvent::DurationTypeMismatch { .. }
            | ScoringEvent::InvalidDurationText { .. }
            | ScoringEvent::ZeroMaxNormalization { .. }
            | ScoringEvent::RouteSkipped { .. } => router_warn!("(on_event) {}", event),
            ScoringEvent::Bounds { .. } | ScoringEvent::Relaxation { .. } => {
                router_debug!("(on_event) {}", event)
            }
            ScoringEvent::Selected { .. } => router_info!("(on_event) {}", event),
        }
    }
}

/// Keeps every event in memory.
#[derive(Debug, Default, Clone)]
pub struct RecordingObserver {
    /// Events in the order they were emitted.
    pub events: Vec<ScoringEvent>,
}

impl RecordingObserver {
    /// Count the events matching a predicate.
    pub fn count(&self, predicate: impl Fn(&ScoringEvent) -> bool) -> usize {
        self.events.iter().filter(|event| predicate(event)).count()
    }
}

impl ScoringObserver for RecordingObserver {
    fn on_event(&mut self, event: ScoringEvent) {
        self.events.push(event);
    }
}
