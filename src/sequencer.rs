//! Single-vehicle stop sequencing.
//!
//! A route is built greedily from the depot (nearest neighbour with a soft
//! bias towards high-priority stops) and then refined with 2-opt.
//!
//! All orders in this module are 0-based stop indexes; the matrix index of
//! stop `i` is `i + 1` because the depot occupies index 0.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::cost::CostSettings;
use crate::matrix::{DistanceMatrix, LegCost};
use crate::solver::{OptimizedRoute, SolveOptions};
use crate::traits::Stop;

const DEPOT: usize = 0;

/// An ordered route for one vehicle, not yet bound to a driver.
///
/// `legs[i]` is the leg arriving at `ordered_stops[i]`; the first leg leaves
/// the depot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SequencedRoute<S> {
    pub ordered_stops: Vec<S>,
    pub legs: Vec<LegCost>,
    pub distance_km: f64,
    pub duration_minutes: f64,
}

impl<S> SequencedRoute<S> {
    pub fn empty() -> Self {
        Self {
            ordered_stops: Vec::new(),
            legs: Vec::new(),
            distance_km: 0.0,
            duration_minutes: 0.0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.ordered_stops.is_empty()
    }

    /// True if any leg fell back to the unreachable sentinel.
    pub fn has_unreachable_leg(&self) -> bool {
        self.legs.iter().any(LegCost::is_unreachable)
    }

    pub fn cost(&self, settings: &CostSettings) -> f64 {
        settings.estimate(self.distance_km, self.duration_minutes)
    }

    pub fn for_driver<DriverId>(self, driver_id: DriverId) -> OptimizedRoute<DriverId, S> {
        OptimizedRoute { driver_id, route: self }
    }
}

impl<S: Stop> SequencedRoute<S> {
    pub fn stop_ids(&self) -> Vec<&S::Id> {
        self.ordered_stops.iter().map(|stop| stop.id()).collect()
    }
}

/// Sequences `stops` over `matrix`, which must be laid out depot-first with
/// one row per stop in input order.
pub fn sequence_route<S>(stops: &[S], matrix: &DistanceMatrix, options: &SolveOptions) -> SequencedRoute<S>
where
    S: Stop + Clone,
{
    if stops.is_empty() {
        return SequencedRoute::empty();
    }

    let mut order = nearest_neighbor_order(stops, matrix, options.high_priority_multiplier);
    let passes = two_opt(&mut order, matrix, options.max_two_opt_passes);
    let legs = route_legs(&order, matrix);
    let totals = sum_legs(&legs);

    debug!(
        stops = stops.len(),
        two_opt_passes = passes,
        distance_meters = totals.distance_meters,
        "sequenced route"
    );

    SequencedRoute {
        ordered_stops: order.iter().map(|&index| stops[index].clone()).collect(),
        legs,
        distance_km: totals.distance_meters / 1000.0,
        duration_minutes: totals.duration_seconds / 60.0,
    }
}

/// Greedy construction from the depot.
///
/// Each candidate scores `leg distance * multiplier`, where the multiplier
/// applies only to high-priority stops. The lowest score wins; ties go to the
/// stop that comes first in input order.
pub fn nearest_neighbor_order<S: Stop>(stops: &[S], matrix: &DistanceMatrix, high_priority_multiplier: f64) -> Vec<usize> {
    let mut remaining: Vec<usize> = (0..stops.len()).collect();
    let mut order = Vec::with_capacity(stops.len());
    let mut current = DEPOT;

    while !remaining.is_empty() {
        let mut best_position = 0;
        let mut best_score = f64::INFINITY;

        for (position, &stop_index) in remaining.iter().enumerate() {
            let multiplier = if stops[stop_index].priority().is_high() {
                high_priority_multiplier
            } else {
                1.0
            };
            let score = matrix.distance(current, stop_index + 1) * multiplier;

            if score < best_score {
                best_score = score;
                best_position = position;
            }
        }

        // `remove` keeps input order among the rest, which the tie-break relies on.
        let next = remaining.remove(best_position);
        order.push(next);
        current = next + 1;
    }

    order
}

/// 2-opt refinement in place. Returns the number of passes made.
///
/// Considers segment reversals `order[i..=k]` for `1 <= i < k <= n - 2`,
/// judged on the two boundary legs by distance alone. Passes repeat until one
/// makes no improvement or `max_passes` is reached. Orders shorter than four
/// stops are left untouched.
pub fn two_opt(order: &mut [usize], matrix: &DistanceMatrix, max_passes: usize) -> usize {
    let n = order.len();
    if n < 4 {
        return 0;
    }

    let dist = |from: usize, to: usize| matrix.distance(from + 1, to + 1);
    let mut passes = 0;

    loop {
        if passes >= max_passes {
            warn!(stops = n, passes, "2-opt stopped at pass limit");
            break;
        }
        passes += 1;

        let mut improved = false;
        for i in 1..n - 2 {
            for k in i + 1..n - 1 {
                let (prev, a, b, next) = (order[i - 1], order[i], order[k], order[k + 1]);

                let current = dist(prev, a) + dist(b, next);
                let swapped = dist(prev, b) + dist(a, next);

                if swapped < current {
                    order[i..=k].reverse();
                    improved = true;
                }
            }
        }

        if !improved {
            break;
        }
    }

    passes
}

/// Leg costs along `order`, starting with depot -> first stop.
pub fn route_legs(order: &[usize], matrix: &DistanceMatrix) -> Vec<LegCost> {
    let mut legs = Vec::with_capacity(order.len());
    let mut previous = DEPOT;

    for &stop_index in order {
        let current = stop_index + 1;
        legs.push(matrix.lookup(previous, current));
        previous = current;
    }

    legs
}

pub fn sum_legs(legs: &[LegCost]) -> LegCost {
    legs.iter().fold(LegCost::ZERO, |acc, leg| LegCost {
        distance_meters: acc.distance_meters + leg.distance_meters,
        duration_seconds: acc.duration_seconds + leg.duration_seconds,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::MatrixEntry;
    use crate::models::{Coordinates, DeliveryStop, Priority};

    fn stop(id: &str) -> DeliveryStop {
        DeliveryStop::new(id, Coordinates::new(0.0, 0.0))
    }

    /// Symmetric matrix for points on a line at the given offsets.
    fn line_matrix(positions: &[f64]) -> DistanceMatrix {
        DistanceMatrix::from_fn(positions.len(), |from, to| {
            let meters = (positions[from] - positions[to]).abs();
            MatrixEntry::ok(meters, meters / 10.0)
        })
    }

    fn total_distance(order: &[usize], matrix: &DistanceMatrix) -> f64 {
        sum_legs(&route_legs(order, matrix)).distance_meters
    }

    #[test]
    fn test_nearest_neighbor_along_line() {
        let stops = vec![stop("far"), stop("near"), stop("mid")];
        let matrix = line_matrix(&[0.0, 30.0, 10.0, 20.0]);
        let order = nearest_neighbor_order(&stops, &matrix, 0.8);
        assert_eq!(order, vec![1, 2, 0]);
    }

    #[test]
    fn test_priority_bias_is_soft() {
        // A: HIGH at 10, B: NORMAL at 5, A-B = 3.
        let stops = vec![stop("A").with_priority(Priority::High), stop("B")];
        let meters = [[0.0, 10.0, 5.0], [10.0, 0.0, 3.0], [5.0, 3.0, 0.0]];
        let matrix = DistanceMatrix::from_fn(3, |from, to| MatrixEntry::ok(meters[from][to], 0.0));

        let order = nearest_neighbor_order(&stops, &matrix, 0.8);
        assert_eq!(order, vec![1, 0]);
        assert_eq!(total_distance(&order, &matrix), 8.0);
    }

    #[test]
    fn test_priority_bias_can_win_when_close() {
        // A: HIGH at 6 scores 4.8 and beats B: NORMAL at 5.
        let stops = vec![stop("A").with_priority(Priority::High), stop("B")];
        let matrix = line_matrix(&[0.0, 6.0, -5.0]);
        let order = nearest_neighbor_order(&stops, &matrix, 0.8);
        assert_eq!(order[0], 0);
    }

    #[test]
    fn test_ties_go_to_first_stop() {
        let stops = vec![stop("a"), stop("b"), stop("c")];
        let matrix = line_matrix(&[0.0, 5.0, -5.0, 5.0]);
        let order = nearest_neighbor_order(&stops, &matrix, 0.8);
        assert_eq!(order[0], 0);
    }

    #[test]
    fn test_two_opt_skips_short_orders() {
        let matrix = line_matrix(&[0.0, 1.0, 2.0, 3.0]);
        let mut order = vec![2, 0, 1];
        assert_eq!(two_opt(&mut order, &matrix, 100), 0);
        assert_eq!(order, vec![2, 0, 1]);
    }

    #[test]
    fn test_two_opt_uncrosses_interior_segment() {
        // Points on a line: stops at 1, 2, 3, 4, 5. Start from a crossed order.
        let matrix = line_matrix(&[0.0, 1.0, 2.0, 3.0, 4.0, 5.0]);
        let mut order = vec![0, 3, 2, 1, 4];
        let before = total_distance(&order, &matrix);

        two_opt(&mut order, &matrix, 100);

        assert_eq!(order, vec![0, 1, 2, 3, 4]);
        assert!(total_distance(&order, &matrix) < before);
    }

    #[test]
    fn test_two_opt_respects_pass_limit() {
        let matrix = line_matrix(&[0.0, 1.0, 2.0, 3.0, 4.0, 5.0]);
        let mut order = vec![0, 3, 2, 1, 4];
        assert_eq!(two_opt(&mut order, &matrix, 0), 0);
        assert_eq!(order, vec![0, 3, 2, 1, 4]);
    }

    #[test]
    fn test_two_opt_keeps_first_and_last_positions() {
        // Reversing the last two stops would save distance, but the final
        // position is outside the reversal range.
        let matrix = line_matrix(&[0.0, 1.0, 2.0, 4.0, 3.0]);
        let mut order = vec![0, 1, 2, 3];
        assert!(total_distance(&[0, 1, 3, 2], &matrix) < total_distance(&order, &matrix));
        assert_eq!(two_opt(&mut order, &matrix, 100), 1);
        assert_eq!(order, vec![0, 1, 2, 3]);

        // Same for the first position.
        let matrix = line_matrix(&[0.0, 2.0, 1.0, 3.0, 4.0]);
        let mut order = vec![0, 1, 2, 3];
        assert!(total_distance(&[1, 0, 2, 3], &matrix) < total_distance(&order, &matrix));
        assert_eq!(two_opt(&mut order, &matrix, 100), 1);
        assert_eq!(order, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_for_driver_keeps_route() {
        let stops = vec![stop("a"), stop("b")];
        let matrix = line_matrix(&[0.0, 1.0, 2.0]);
        let route = sequence_route(&stops, &matrix, &SolveOptions::default()).for_driver("d1");
        assert_eq!(route.driver_id, "d1");
        assert_eq!(route.stop_ids(), vec!["a", "b"]);
        assert!((route.distance_km - 0.002).abs() < 1e-12);
    }

    #[test]
    fn test_route_legs_include_depot_leg() {
        let matrix = line_matrix(&[0.0, 4.0, 1.0]);
        let legs = route_legs(&[1, 0], &matrix);
        assert_eq!(legs.len(), 2);
        assert_eq!(legs[0].distance_meters, 1.0);
        assert_eq!(legs[1].distance_meters, 3.0);
    }

    #[test]
    fn test_sequence_route_empty_stops() {
        let stops: Vec<DeliveryStop> = Vec::new();
        let route = sequence_route(&stops, &DistanceMatrix::default(), &SolveOptions::default());
        assert!(route.ordered_stops.is_empty());
        assert_eq!(route.distance_km, 0.0);
        assert_eq!(route.duration_minutes, 0.0);
    }

    #[test]
    fn test_sequence_route_totals_in_km_and_minutes() {
        let stops = vec![stop("a"), stop("b")];
        let matrix = DistanceMatrix::from_fn(3, |from, to| {
            let offsets = [0.0, 1500.0, 4000.0];
            let meters = f64::abs(offsets[from] - offsets[to]);
            MatrixEntry::ok(meters, meters / 10.0)
        });

        let route = sequence_route(&stops, &matrix, &SolveOptions::default());

        assert_eq!(route.stop_ids(), vec!["a", "b"]);
        assert!((route.distance_km - 4.0).abs() < 1e-9);
        assert!((route.duration_minutes - 400.0 / 60.0).abs() < 1e-9);
    }

    #[test]
    fn test_sequence_route_unreachable_leg_inflates_totals() {
        let stops = vec![stop("a"), stop("b")];
        let mut matrix = line_matrix(&[0.0, 1.0, 2.0]).rows().to_vec();
        matrix[1][2] = MatrixEntry::unreachable();
        matrix[2][1] = MatrixEntry::unreachable();
        let matrix = DistanceMatrix::from_rows(matrix);

        let route = sequence_route(&stops, &matrix, &SolveOptions::default());

        assert_eq!(route.ordered_stops.len(), 2);
        assert!(route.has_unreachable_leg());
        assert!(route.distance_km >= 1.0e6);
    }
}
