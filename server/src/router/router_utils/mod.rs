//! Helpers for the router.

pub mod graph;
pub mod haversine;
