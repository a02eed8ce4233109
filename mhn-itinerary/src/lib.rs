//! reconciles GTFS-derived bus itineraries with the Master Highway Network (MHN).
//!
//! raw route headers and stop-to-stop itinerary segments are normalized,
//! repaired and verified against the network link graph. segments that do not
//! match a network link are replaced by shortest paths found within a bounded
//! window of the network, and the result is written as a gapless, timed
//! itinerary per route for downstream network-building tools.
pub mod app;
pub mod config;
pub mod io;
pub mod itinerary;
pub mod model;
pub mod network;
pub mod output;
pub mod pipeline;
pub mod repair;
pub mod route;
pub mod splice;
pub mod verify;
