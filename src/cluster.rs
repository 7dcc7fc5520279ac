//! Geographic partitioning of stops with k-means.
//!
//! Seeding is deterministic (the first `k` stops), distances are planar on
//! raw latitude/longitude, and a centroid with no members keeps its previous
//! position. The round cap is the real termination guarantee; the
//! exact-equality convergence check only ends things earlier.

use crate::models::Coordinates;
use crate::traits::Stop;

/// Partitions `stops` into `min(k, stops.len())` groups of stop indexes.
///
/// Every stop lands in exactly one group; indexes within a group are in
/// ascending input order. Groups are returned by cluster index and may be
/// empty when seeds coincide.
pub fn assign_clusters<S: Stop>(stops: &[S], k: usize, max_rounds: usize) -> Vec<Vec<usize>> {
    let k = k.min(stops.len());
    if k == 0 {
        return Vec::new();
    }

    let locations: Vec<Coordinates> = stops.iter().map(Stop::location).collect();
    let mut centroids: Vec<Coordinates> = locations[..k].to_vec();
    let mut assignments: Vec<Vec<usize>> = vec![Vec::new(); k];

    for _ in 0..max_rounds.max(1) {
        assignments = vec![Vec::new(); k];

        for (stop_index, location) in locations.iter().enumerate() {
            assignments[nearest_centroid(location, &centroids)].push(stop_index);
        }

        let updated: Vec<Coordinates> = centroids
            .iter()
            .zip(&assignments)
            .map(|(centroid, members)| mean_location(members, &locations).unwrap_or(*centroid))
            .collect();

        let stable = updated == centroids;
        centroids = updated;
        if stable {
            break;
        }
    }

    assignments
}

/// Ties go to the lowest cluster index. A NaN distance never wins, so a stop
/// with unusable coordinates falls back to cluster 0.
fn nearest_centroid(location: &Coordinates, centroids: &[Coordinates]) -> usize {
    let mut best_cluster = 0;
    let mut best_distance = f64::INFINITY;

    for (cluster_index, centroid) in centroids.iter().enumerate() {
        let distance = location.planar_distance(centroid);
        if distance < best_distance {
            best_distance = distance;
            best_cluster = cluster_index;
        }
    }

    best_cluster
}

fn mean_location(members: &[usize], locations: &[Coordinates]) -> Option<Coordinates> {
    if members.is_empty() {
        return None;
    }

    let (lat, lng) = members.iter().fold((0.0, 0.0), |(lat, lng), &index| {
        (lat + locations[index].lat, lng + locations[index].lng)
    });
    let count = members.len() as f64;

    Some(Coordinates::new(lat / count, lng / count))
}
