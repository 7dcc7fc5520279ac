//! delivery-planner core
//!
//! Clusters delivery stops across drivers and sequences each driver's stops
//! over a precomputed distance/duration matrix.

pub mod traits;
pub mod models;
pub mod matrix;
pub mod sequencer;
pub mod cluster;
pub mod solver;
pub mod cost;
pub mod error;
pub mod osrm;
pub mod haversine;
pub mod fallback;
