//! Router module
//!
//! Scores candidate itineraries and selects the best one.

#[macro_use]
pub mod macros;
pub mod diagnostics;
pub mod duration;
pub mod normalize;
pub mod route_path;
pub mod router_types;
pub mod router_utils;
pub mod scorer;

pub use diagnostics::{LogObserver, RecordingObserver, ScoringEvent, ScoringObserver};
pub use duration::{parse_duration, parse_raw_duration, DurationError, DurationValue};
pub use normalize::normalize;
pub use route_path::{route_path, AirportLookup, RouteLeg, RoutePath};
pub use router_types::itinerary::{Itinerary, NumericField, Segment};
pub use router_types::location::Location;
pub use scorer::{
    relax_distances, select_best, select_best_batch, select_best_with, try_select_best,
    DistanceTable, NormalizationBounds, ScoreError, Search,
};
