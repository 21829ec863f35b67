//! Types shared by the router.

pub mod edge;
pub mod itinerary;
pub mod location;
