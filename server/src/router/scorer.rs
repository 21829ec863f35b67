//! Pick the best itinerary out of a batch of flight offers.
//!
//! Every itinerary is treated as a set of edges (one per segment) that
//! all carry the same cost: the itinerary's normalized duration plus its
//! normalized price. Distances from the origin are relaxed
//! `node_count - 1` times, the way Bellman-Ford does, and the itinerary
//! whose final arrival airport ends up closest to the origin wins.
//!
//! Segments do not refine the score. They only decide which airports an
//! itinerary's cost is propagated between. No path is reconstructed:
//! only whole itineraries are selected.

use super::diagnostics::{LogObserver, ScoringEvent, ScoringObserver};
use super::normalize::normalize;
use super::router_types::itinerary::Itinerary;
use super::router_utils::graph::FlightGraph;
use ordered_float::OrderedFloat;
use rayon::prelude::*;
use std::collections::HashMap;
use std::fmt::{Display, Formatter, Result as FmtResult};

/// Distance of an airport that has not been reached.
pub const UNREACHED: f64 = f64::INFINITY;

/// Errors that may occur while scoring
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ScoreError {
    /// No itinerary was provided
    NoRoutes,
}

impl Display for ScoreError {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        match self {
            ScoreError::NoRoutes => write!(f, "No routes to score."),
        }
    }
}

impl std::error::Error for ScoreError {}

/// Best combined score reached so far per airport, and the itinerary
/// that reached it.
///
/// Built for one scoring call and dropped afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceTable {
    distances: HashMap<String, f64>,
    predecessors: HashMap<String, Option<usize>>,
}

impl DistanceTable {
    /// Every airport of the graph starts unreached.
    pub fn new(graph: &FlightGraph) -> Self {
        let mut table = DistanceTable {
            distances: HashMap::with_capacity(graph.node_count()),
            predecessors: HashMap::with_capacity(graph.node_count()),
        };

        for airport in graph.airports() {
            table.distances.insert(airport.to_string(), UNREACHED);
            table.predecessors.insert(airport.to_string(), None);
        }

        table
    }

    /// Set the origin's distance to 0, adding it if needed.
    pub fn seed(&mut self, origin: &str) {
        self.distances.insert(origin.to_string(), 0.0);
        self.predecessors.entry(origin.to_string()).or_insert(None);
    }

    /// Distance recorded for an airport, [`UNREACHED`] if unknown.
    pub fn distance(&self, airport: &str) -> f64 {
        self.distances.get(airport).copied().unwrap_or(UNREACHED)
    }

    /// Index of the itinerary that last lowered an airport's distance.
    pub fn predecessor(&self, airport: &str) -> Option<usize> {
        self.predecessors.get(airport).copied().flatten()
    }

    /// Number of airports in the table.
    pub fn len(&self) -> usize {
        self.distances.len()
    }

    /// True if no airport is known.
    pub fn is_empty(&self) -> bool {
        self.distances.is_empty()
    }

    /// Lower `destination` through `source` if that is shorter.
    fn relax(&mut self, source: &str, destination: &str, weight: f64, route_index: usize) -> bool {
        let candidate = self.distance(source) + weight;
        if candidate < self.distance(destination) {
            self.distances.insert(destination.to_string(), candidate);
            self.predecessors
                .insert(destination.to_string(), Some(route_index));
            return true;
        }

        false
    }
}

/// Largest duration and price in a batch.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct NormalizationBounds {
    /// Largest duration, `None` if no itinerary has one.
    pub max_time: Option<f64>,

    /// Largest numeric price, `None` if no itinerary has one.
    pub max_price: Option<f64>,
}

impl NormalizationBounds {
    /// Itineraries without the attribute are left out of its maximum,
    /// they do not count as 0.
    pub fn from_routes(routes: &[Itinerary]) -> Self {
        let max_time = routes
            .iter()
            .filter_map(|route| route.duration_field().bound_value())
            .map(OrderedFloat)
            .max();

        let max_price = routes
            .iter()
            .filter_map(|route| route.price_field().bound_value())
            .map(OrderedFloat)
            .max();

        NormalizationBounds {
            max_time: max_time.map(OrderedFloat::into_inner),
            max_price: max_price.map(OrderedFloat::into_inner),
        }
    }
}

/// Relax the distances of every airport referenced by `routes`.
///
/// The returned table is local to the call.
pub fn relax_distances(
    routes: &[Itinerary],
    origin: &str,
    observer: &mut dyn ScoringObserver,
) -> DistanceTable {
    let mut graph = FlightGraph::build(routes);
    let mut table = DistanceTable::new(&graph);
    graph.ensure_node(origin);
    table.seed(origin);

    let bounds = NormalizationBounds::from_routes(routes);
    observer.on_event(ScoringEvent::Bounds {
        max_time: bounds.max_time,
        max_price: bounds.max_price,
    });

    let passes = table.len().saturating_sub(1);
    router_debug!(
        "(relax_distances) {} airports, {} segments, {} passes.",
        table.len(),
        graph.edge_count(),
        passes
    );

    for _ in 0..passes {
        for edge in graph.edges() {
            let route = &routes[edge.route_index];
            let (Some(source), Some(destination)) =
                (graph.get_airport(edge.from), graph.get_airport(edge.to))
            else {
                router_error!("(relax_distances) Edge references an unknown airport.");
                continue;
            };

            let (Some(duration), Some(price)) = (
                route.duration_field().relaxation_value(),
                route.price_field().relaxation_value(),
            ) else {
                observer.on_event(ScoringEvent::RouteSkipped {
                    route_index: edge.route_index,
                    source: source.to_string(),
                    destination: destination.to_string(),
                });
                continue;
            };

            let normalized_time = normalize(duration, bounds.max_time, observer);
            let normalized_price = normalize(price, bounds.max_price, observer);
            let combined_weight = normalized_time + normalized_price;

            let updated = table.relax(source, destination, combined_weight, edge.route_index);
            observer.on_event(ScoringEvent::Relaxation {
                route_index: edge.route_index,
                source: source.to_string(),
                destination: destination.to_string(),
                normalized_time,
                normalized_price,
                combined_weight,
                updated,
            });
        }
    }

    table
}

/// Return the best itinerary, or [`ScoreError::NoRoutes`] for an empty
/// batch.
///
/// The winner is the itinerary whose last segment lands on the airport
/// with the smallest distance. Ties go to the earliest itinerary.
pub fn try_select_best<'a>(
    routes: &'a [Itinerary],
    origin: &str,
    observer: &mut dyn ScoringObserver,
) -> Result<&'a Itinerary, ScoreError> {
    if routes.is_empty() {
        router_error!("(try_select_best) No routes provided.");
        return Err(ScoreError::NoRoutes);
    }

    let table = relax_distances(routes, origin, observer);

    // min_by_key keeps the first of several equal minimums
    let (route_index, distance) = routes
        .iter()
        .enumerate()
        .map(|(index, route)| {
            let distance = route
                .final_arrival()
                .map(|airport| table.distance(airport))
                .unwrap_or(UNREACHED);
            (index, distance)
        })
        .min_by_key(|(_, distance)| OrderedFloat(*distance))
        .ok_or(ScoreError::NoRoutes)?;

    observer.on_event(ScoringEvent::Selected {
        route_index,
        distance,
    });

    Ok(&routes[route_index])
}

/// Like [`select_best`], reporting to the given observer.
///
/// # Panics
/// If `routes` is empty.
pub fn select_best_with<'a>(
    routes: &'a [Itinerary],
    origin: &str,
    observer: &mut dyn ScoringObserver,
) -> &'a Itinerary {
    match try_select_best(routes, origin, observer) {
        Ok(route) => route,
        Err(e) => panic!("(select_best) {e} Callers must pass at least one route."),
    }
}

/// Return the best itinerary leaving `origin`, logging diagnostics to
/// the `app::router` target.
///
/// # Panics
/// If `routes` is empty. Use [`try_select_best`] when the batch may be
/// empty.
pub fn select_best<'a>(routes: &'a [Itinerary], origin: &str) -> &'a Itinerary {
    select_best_with(routes, origin, &mut LogObserver)
}

/// One independent search: its candidates and the airport it leaves from.
#[derive(Debug, Clone, PartialEq)]
pub struct Search {
    /// Candidate itineraries.
    pub routes: Vec<Itinerary>,

    /// IATA code of the origin airport.
    pub origin: String,
}

/// Score several searches in parallel.
///
/// Searches share nothing, so each one runs on its own with its own
/// distance table. Results are in input order.
pub fn select_best_batch(searches: &[Search]) -> Vec<Result<&Itinerary, ScoreError>> {
    searches
        .par_iter()
        .map(|search| try_select_best(&search.routes, &search.origin, &mut LogObserver))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::router::diagnostics::RecordingObserver;
    use crate::test_util::{itinerary, segment};

    #[test]
    fn test_single_route_is_always_selected() {
        // Leaves from an airport other than the origin, so it is never reached
        let routes = vec![itinerary(900, "2500", &["LAX", "NRT"])];
        let best = select_best(&routes, "JFK");
        assert_eq!(best, &routes[0]);
    }

    #[test]
    fn test_tie_goes_to_first_route() {
        let routes = vec![
            itinerary(60, "100", &["JFK", "LHR"]),
            itinerary(120, "50", &["JFK", "LHR"]),
        ];

        let mut observer = RecordingObserver::default();
        let table = relax_distances(&routes, "JFK", &mut observer);
        assert_eq!(table.distance("LHR"), 1.5);
        assert_eq!(table.predecessor("LHR"), Some(0));

        let best = select_best(&routes, "JFK");
        assert!(std::ptr::eq(best, &routes[0]));
    }

    #[test]
    fn test_tie_between_destinations() {
        let routes = vec![
            itinerary(300, "400", &["JFK", "LHR"]),
            itinerary(600, "200", &["JFK", "CDG"]),
        ];

        let mut observer = RecordingObserver::default();
        let best = try_select_best(&routes, "JFK", &mut observer);
        assert_eq!(best, Ok(&routes[0]));
        assert_eq!(best.map(|r| r.final_arrival()), Ok(Some("LHR")));

        assert_eq!(
            observer.events[0],
            ScoringEvent::Bounds {
                max_time: Some(600.0),
                max_price: Some(400.0)
            }
        );
        assert_eq!(
            observer.events.last(),
            Some(&ScoringEvent::Selected {
                route_index: 0,
                distance: 1.5
            })
        );
    }

    #[test]
    fn test_cheaper_and_faster_route_wins() {
        let routes = vec![
            itinerary(600, "900", &["JFK", "CDG"]),
            itinerary(300, "300", &["JFK", "FCO"]),
        ];

        let best = select_best(&routes, "JFK");
        assert!(std::ptr::eq(best, &routes[1]));
    }

    #[test]
    fn test_non_numeric_price_is_skipped() {
        let routes = vec![
            itinerary(300, "N/A", &["JFK", "LHR"]),
            itinerary(200, "400", &["JFK", "CDG"]),
            itinerary(100, "100", &["JFK", "MAD"]),
        ];

        let mut observer = RecordingObserver::default();
        let best = try_select_best(&routes, "JFK", &mut observer);
        assert_eq!(best, Ok(&routes[2]));

        assert_eq!(
            observer.events[0],
            ScoringEvent::Bounds {
                max_time: Some(300.0),
                max_price: Some(400.0)
            }
        );
        // 4 airports, 3 passes, one skipped segment per pass
        assert_eq!(
            observer.count(|e| matches!(e, ScoringEvent::RouteSkipped { route_index: 0, .. })),
            3
        );

        let table = relax_distances(&routes, "JFK", &mut RecordingObserver::default());
        assert_eq!(table.distance("LHR"), UNREACHED);
        assert_eq!(table.predecessor("LHR"), None);
    }

    #[test]
    fn test_only_malformed_routes_fall_back_to_input_order() {
        let routes = vec![
            itinerary(300, "N/A", &["JFK", "LHR"]),
            itinerary(200, "unknown", &["JFK", "CDG"]),
        ];

        let best = select_best(&routes, "JFK");
        assert!(std::ptr::eq(best, &routes[0]));
    }

    #[test]
    fn test_distances_propagate_across_passes() {
        // The second route reaches ORD in the first pass, the first route
        // can only be relaxed from ORD in the second pass.
        let routes = vec![
            itinerary(100, "100", &["ORD", "LAX"]),
            itinerary(100, "100", &["JFK", "ORD"]),
        ];

        let mut observer = RecordingObserver::default();
        let table = relax_distances(&routes, "JFK", &mut observer);
        assert_eq!(table.len(), 3);
        assert_eq!(table.distance("JFK"), 0.0);
        assert_eq!(table.distance("ORD"), 2.0);
        assert_eq!(table.distance("LAX"), 4.0);
        assert_eq!(table.predecessor("LAX"), Some(0));
        assert_eq!(table.predecessor("ORD"), Some(1));

        // 2 passes over 2 segments
        assert_eq!(
            observer.count(|e| matches!(e, ScoringEvent::Relaxation { .. })),
            4
        );

        let best = select_best(&routes, "JFK");
        assert!(std::ptr::eq(best, &routes[1]));
    }

    #[test]
    fn test_multi_segment_route_applies_weight_per_segment() {
        let routes = vec![
            itinerary(400, "200", &["JFK", "ORD", "LAX"]),
            itinerary(200, "200", &["JFK", "LAX"]),
        ];

        let table = relax_distances(&routes, "JFK", &mut RecordingObserver::default());
        // first route weighs 1 + 1 on each of its segments
        assert_eq!(table.distance("ORD"), 2.0);
        // second route weighs 0.5 + 1 and wins LAX
        assert_eq!(table.distance("LAX"), 1.5);
        assert_eq!(table.predecessor("LAX"), Some(1));

        let best = select_best(&routes, "JFK");
        // both land on LAX, so the tie goes to the first route
        assert!(std::ptr::eq(best, &routes[0]));
    }

    #[test]
    fn test_origin_outside_the_graph_is_seeded() {
        let routes = vec![
            itinerary(300, "400", &["JFK", "LHR"]),
            itinerary(200, "100", &["JFK", "CDG"]),
        ];

        let mut observer = RecordingObserver::default();
        let table = relax_distances(&routes, "BOS", &mut observer);
        assert_eq!(table.len(), 4);
        assert_eq!(table.distance("BOS"), 0.0);
        assert_eq!(table.distance("LHR"), UNREACHED);
        assert_eq!(table.distance("CDG"), UNREACHED);

        let best = select_best(&routes, "BOS");
        assert!(std::ptr::eq(best, &routes[0]));
    }

    #[test]
    fn test_missing_fields_are_left_out_of_bounds() {
        let mut no_price = itinerary(100, "0", &["JFK", "LHR"]);
        no_price.price = None;
        let mut no_duration = itinerary(0, "300", &["JFK", "CDG"]);
        no_duration.duration = None;
        let routes = vec![no_price, no_duration, itinerary(400, "150", &["JFK", "MAD"])];

        assert_eq!(
            NormalizationBounds::from_routes(&routes),
            NormalizationBounds {
                max_time: Some(400.0),
                max_price: Some(300.0)
            }
        );

        // missing values weigh 0 while relaxing
        let table = relax_distances(&routes, "JFK", &mut RecordingObserver::default());
        assert_eq!(table.distance("LHR"), 0.25);
        assert_eq!(table.distance("CDG"), 1.0);
        assert_eq!(table.distance("MAD"), 1.5);
    }

    #[test]
    fn test_no_durations_normalize_to_zero() {
        let routes: Vec<Itinerary> = [("500", "JFK", "LHR"), ("250", "JFK", "CDG")]
            .into_iter()
            .map(|(price, from, to)| {
                Itinerary::new(None, Some(price.to_string()), "EUR", vec![segment(from, to)])
            })
            .collect();

        let mut observer = RecordingObserver::default();
        let best = try_select_best(&routes, "JFK", &mut observer);
        assert_eq!(best, Ok(&routes[1]));
        assert!(
            observer.count(|e| matches!(
                e,
                ScoringEvent::ZeroMaxNormalization {
                    max_value: None,
                    ..
                }
            )) > 0
        );
    }

    #[test]
    fn test_selection_is_idempotent() {
        let routes = vec![
            itinerary(430, "612.40", &["MAD", "JFK"]),
            itinerary(610, "380.00", &["MAD", "LIS", "JFK"]),
            itinerary(520, "455.10", &["MAD", "LHR", "JFK"]),
        ];

        let first = select_best(&routes, "MAD");
        let second = select_best(&routes, "MAD");
        assert!(std::ptr::eq(first, second));
    }

    #[test]
    fn test_empty_batch_is_an_error() {
        let mut observer = RecordingObserver::default();
        assert_eq!(
            try_select_best(&[], "JFK", &mut observer),
            Err(ScoreError::NoRoutes)
        );
        assert!(observer.events.is_empty());
    }

    #[test]
    #[should_panic]
    fn test_select_best_panics_on_empty_batch() {
        select_best(&[], "JFK");
    }

    #[test]
    fn test_batch_keeps_input_order() {
        let searches = vec![
            Search {
                routes: vec![
                    itinerary(300, "400", &["JFK", "LHR"]),
                    itinerary(200, "100", &["JFK", "CDG"]),
                ],
                origin: "JFK".to_string(),
            },
            Search {
                routes: vec![],
                origin: "SFO".to_string(),
            },
            Search {
                routes: vec![itinerary(95, "80", &["MAD", "BCN"])],
                origin: "MAD".to_string(),
            },
        ];

        let results = select_best_batch(&searches);
        assert_eq!(results.len(), 3);
        assert_eq!(results[0], Ok(&searches[0].routes[1]));
        assert_eq!(results[1], Err(ScoreError::NoRoutes));
        assert_eq!(results[2], Ok(&searches[2].routes[0]));
    }
}
