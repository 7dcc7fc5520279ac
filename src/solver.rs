//! Route planner entry points.
//!
//! Single-driver planning sequences every stop for one vehicle. Multi-driver
//! planning partitions the stops with k-means, slices the matrix per cluster
//! and sequences each cluster independently. The partition is final: stops
//! are never moved between clusters afterwards.

use std::ops::Deref;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::cluster::assign_clusters;
use crate::error::MatrixError;
use crate::matrix::DistanceMatrix;
use crate::models::Coordinates;
use crate::sequencer::{SequencedRoute, sequence_route};
use crate::traits::{DistanceMatrixProvider, Driver, Stop};

#[derive(Debug, Clone)]
pub struct SolveOptions {
    /// Score multiplier applied to high-priority stops during construction.
    /// Values below 1.0 make them look closer than they are.
    pub high_priority_multiplier: f64,
    /// Maximum k-means refinement rounds. At least one round always runs.
    pub kmeans_rounds: usize,
    /// Maximum full 2-opt passes per route.
    pub max_two_opt_passes: usize,
}

impl Default for SolveOptions {
    fn default() -> Self {
        Self {
            high_priority_multiplier: 0.8,
            kmeans_rounds: 8,
            max_two_opt_passes: 1000,
        }
    }
}

/// How a request distributes its stops.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OptimizeMode {
    /// Every stop goes to the first driver.
    SingleDriver,
    /// Stops are clustered across all drivers.
    AutoDistribution,
}

/// A sequenced route bound to the driver that runs it.
///
/// Serializes flat: `driverId` next to the route fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizedRoute<DriverId, S> {
    pub driver_id: DriverId,
    #[serde(flatten)]
    pub route: SequencedRoute<S>,
}

impl<DriverId, S> OptimizedRoute<DriverId, S> {
    pub fn idle(driver_id: DriverId) -> Self {
        SequencedRoute::empty().for_driver(driver_id)
    }
}

impl<DriverId, S> Deref for OptimizedRoute<DriverId, S> {
    type Target = SequencedRoute<S>;

    fn deref(&self) -> &Self::Target {
        &self.route
    }
}

/// Sequences all `stops` for a single vehicle.
///
/// `matrix` must be depot-first with one row per stop in input order. An
/// empty stop list returns an empty route without touching the matrix.
pub fn optimize_single<S>(stops: &[S], matrix: &DistanceMatrix, options: SolveOptions) -> SequencedRoute<S>
where
    S: Stop + Clone,
{
    sequence_route(stops, matrix, &options)
}

/// Clusters `stops` across `drivers` and sequences each cluster.
///
/// Returns one route per driver in driver order. Cluster `i` goes to driver
/// `i`; drivers beyond the number of clusters get an empty route.
pub fn optimize_multi<R, S>(
    stops: &[S],
    drivers: &[R],
    matrix: &DistanceMatrix,
    options: SolveOptions,
) -> Vec<OptimizedRoute<R::Id, S>>
where
    R: Driver,
    S: Stop + Clone,
{
    if drivers.is_empty() {
        return Vec::new();
    }

    let mut routes: Vec<OptimizedRoute<R::Id, S>> = drivers
        .iter()
        .map(|driver| OptimizedRoute::idle(driver.id().clone()))
        .collect();

    if stops.is_empty() {
        return routes;
    }

    let k = drivers.len().min(stops.len());
    let clusters = assign_clusters(stops, k, options.kmeans_rounds);

    debug!(
        stops = stops.len(),
        drivers = drivers.len(),
        clusters = clusters.len(),
        "partitioned stops"
    );

    for (route, stop_indexes) in routes.iter_mut().zip(&clusters) {
        let cluster_stops: Vec<S> = stop_indexes.iter().map(|&index| stops[index].clone()).collect();
        let cluster_matrix = matrix.submatrix(stop_indexes);

        route.route = sequence_route(&cluster_stops, &cluster_matrix, &options);
    }

    routes
}

/// Dispatches on `mode`. Single-driver mode assigns everything to the first
/// driver and returns no routes when there is none.
pub fn optimize<R, S>(
    mode: OptimizeMode,
    stops: &[S],
    drivers: &[R],
    matrix: &DistanceMatrix,
    options: SolveOptions,
) -> Vec<OptimizedRoute<R::Id, S>>
where
    R: Driver,
    S: Stop + Clone,
{
    match mode {
        OptimizeMode::SingleDriver => drivers
            .first()
            .map(|driver| vec![optimize_single(stops, matrix, options).for_driver(driver.id().clone())])
            .unwrap_or_default(),
        OptimizeMode::AutoDistribution => optimize_multi(stops, drivers, matrix, options),
    }
}

/// Fetches the depot-first matrix the planner expects: point 0 is `depot`,
/// point `i + 1` is `stops[i]`.
pub fn matrix_for_stops<S, M>(provider: &M, depot: Coordinates, stops: &[S]) -> Result<DistanceMatrix, MatrixError>
where
    S: Stop,
    M: DistanceMatrixProvider + ?Sized,
{
    let locations: Vec<Coordinates> = std::iter::once(depot)
        .chain(stops.iter().map(|stop| stop.location()))
        .collect();

    let matrix = provider.matrix_for(&locations)?;
    if matrix.dimension() != locations.len() {
        return Err(MatrixError::Dimension {
            expected: locations.len(),
            actual: matrix.dimension(),
        });
    }

    Ok(matrix)
}
