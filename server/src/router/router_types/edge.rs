//! Definition of the `Edge` type.
use petgraph::graph::NodeIndex;

/// An edge is one segment of a candidate itinerary, connecting its
/// departure airport to its arrival airport.
///
/// The edge does not carry a cost of its own: every segment of an
/// itinerary is weighted with the itinerary's combined weight.
#[derive(Debug, PartialEq, Hash, Eq, Copy, Clone)]
pub struct Edge {
    /// Departure airport node.
    pub from: NodeIndex,

    /// Arrival airport node.
    pub to: NodeIndex,

    /// Position of the owning itinerary in the candidate list.
    pub route_index: usize,
}
