//! Test fixtures for delivery-planner.
//!
//! Provides São Paulo delivery locations grouped by neighbourhood, plus
//! helpers to turn them into stops and a depot-first matrix.

pub mod sao_paulo_locations;

pub use sao_paulo_locations::*;
