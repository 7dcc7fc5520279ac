//! Haversine distance matrix provider (fallback when no routing service is
//! reachable).
//!
//! Uses great-circle distance and an assumed urban speed to estimate travel
//! time. Less accurate than a road network, but always available.

use rayon::prelude::*;

use crate::error::MatrixError;
use crate::matrix::{DistanceMatrix, MatrixEntry};
use crate::models::Coordinates;
use crate::traits::DistanceMatrixProvider;

/// Average urban driving speed assumption for time estimation.
const DEFAULT_SPEED_KMH: f64 = 40.0;

/// Earth radius in meters.
const EARTH_RADIUS_M: f64 = 6_371_000.0;

#[derive(Debug, Clone)]
pub struct HaversineMatrix {
    /// Assumed average driving speed in km/h.
    pub speed_kmh: f64,
}

impl Default for HaversineMatrix {
    fn default() -> Self {
        Self {
            speed_kmh: DEFAULT_SPEED_KMH,
        }
    }
}

impl HaversineMatrix {
    pub fn new(speed_kmh: f64) -> Self {
        Self { speed_kmh }
    }

    /// Great-circle distance between two points in meters.
    pub fn haversine_meters(from: Coordinates, to: Coordinates) -> f64 {
        let lat1_rad = from.lat.to_radians();
        let lat2_rad = to.lat.to_radians();
        let delta_lat = (to.lat - from.lat).to_radians();
        let delta_lng = (to.lng - from.lng).to_radians();

        let a = (delta_lat / 2.0).sin().powi(2)
            + lat1_rad.cos() * lat2_rad.cos() * (delta_lng / 2.0).sin().powi(2);
        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

        EARTH_RADIUS_M * c
    }

    fn meters_to_seconds(&self, meters: f64) -> f64 {
        meters / 1000.0 / self.speed_kmh * 3600.0
    }

    fn entry(&self, from: Coordinates, to: Coordinates) -> MatrixEntry {
        let meters = Self::haversine_meters(from, to);
        MatrixEntry::ok(meters, self.meters_to_seconds(meters))
    }
}

impl DistanceMatrixProvider for HaversineMatrix {
    fn matrix_for(&self, locations: &[Coordinates]) -> Result<DistanceMatrix, MatrixError> {
        let rows = locations
            .par_iter()
            .map(|&from| locations.iter().map(|&to| self.entry(from, to)).collect())
            .collect();

        Ok(DistanceMatrix::from_rows(rows))
    }
}
