//! Helper functions for working with the airport graph.

use std::collections::HashMap;

use petgraph::{graph::NodeIndex, stable_graph::StableDiGraph};

use crate::router::router_types::{edge::Edge, itinerary::Itinerary};

/// Airports referenced by a batch of itineraries, with one edge per
/// segment.
///
/// Nodes are kept in discovery order and edges in the order
/// `for route in routes { for segment in route.segments }`, which is
/// the order the scorer relaxes them in.
#[derive(Debug, Default)]
pub struct FlightGraph {
    pub(crate) graph: StableDiGraph<String, usize>,
    pub(crate) node_indices: HashMap<String, NodeIndex>,
    pub(crate) edges: Vec<Edge>,
}

impl FlightGraph {
    /// Build the graph for the given itineraries.
    ///
    /// Both endpoints of every segment become nodes the first time they
    /// are seen.
    ///
    /// # Time Complexity
    /// *O*(*s*) where *s* is the total number of segments.
    pub fn build(routes: &[Itinerary]) -> FlightGraph {
        router_debug!("(build) starting function call.");
        let mut graph = FlightGraph::default();

        for (route_index, route) in routes.iter().enumerate() {
            for segment in &route.segments {
                let from = graph.ensure_node(&segment.departure);
                let to = graph.ensure_node(&segment.arrival);
                graph.graph.add_edge(from, to, route_index);
                graph.edges.push(Edge {
                    from,
                    to,
                    route_index,
                });
            }
        }

        router_debug!(
            "(build) {} airports, {} segments.",
            graph.node_count(),
            graph.edge_count()
        );
        graph
    }

    /// Get the node for an airport, adding it if it is not known yet.
    pub fn ensure_node(&mut self, code: &str) -> NodeIndex {
        if let Some(index) = self.node_indices.get(code) {
            return *index;
        }

        let index = self.graph.add_node(code.to_string());
        self.node_indices.insert(code.to_string(), index);
        index
    }

    /// Get the node for an airport.
    pub fn get_node_index(&self, code: &str) -> Option<NodeIndex> {
        self.node_indices.get(code).cloned()
    }

    /// Get an airport code by node.
    pub fn get_airport(&self, index: NodeIndex) -> Option<&str> {
        self.graph.node_weight(index).map(|code| code.as_str())
    }

    /// Airports in discovery order.
    pub fn airports(&self) -> impl Iterator<Item = &str> + '_ {
        self.graph
            .node_indices()
            .filter_map(|index| self.get_airport(index))
    }

    /// Return the number of airports in the graph.
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Return the number of segments in the graph.
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Get all the edges in relaxation order.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }
}
