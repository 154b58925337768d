//! Multi-day clustering of a selection.
//!
//! # Algorithm
//!
//! 1. Build one nearest-neighbor tour over every stop, from the start point.
//! 2. Cut that tour into contiguous, balanced day-sized chunks of
//!    `ceil(n / ceil(n / max_per_day))` stops.
//! 3. Re-order every chunk independently: nearest-neighbor from the start
//!    point again, then 2-opt on the round trip.
//!
//! Consecutive stops of a nearest-neighbor tour tend to be close, so the
//! chunks follow geography without an explicit clustering step.

use tracing::debug;

use super::nearest_neighbor_tour;
use crate::distance::DistanceMatrix;
use crate::error::OptimizeError;
use crate::local_search::two_opt_improve;
use crate::models::{DayCluster, GeoPoint, SelectedPractitioner, MAX_VISITS_PER_DAY_LIMIT};

/// Balanced day size: the fewest days that respect `max_per_day`, with the
/// stops spread as evenly as contiguous slicing allows.
///
/// # Examples
///
/// ```
/// use territory_routing::constructive::balanced_day_size;
///
/// assert_eq!(balanced_day_size(12, 6), 6);
/// assert_eq!(balanced_day_size(7, 6), 4);  // 4 + 3 rather than 6 + 1
/// assert_eq!(balanced_day_size(13, 6), 5); // 5 + 5 + 3
/// assert_eq!(balanced_day_size(0, 6), 0);
/// ```
pub fn balanced_day_size(n: usize, max_per_day: usize) -> usize {
    if n == 0 {
        return 0;
    }
    let max = max_per_day.max(1);
    let days = n.div_ceil(max);
    n.div_ceil(days)
}

/// Splits `items` into contiguous chunks of [`balanced_day_size`].
pub fn split_balanced<T: Clone>(items: &[T], max_per_day: usize) -> Vec<Vec<T>> {
    let size = balanced_day_size(items.len(), max_per_day);
    if size == 0 {
        return Vec::new();
    }
    items.chunks(size).map(<[T]>::to_vec).collect()
}

/// Steps 1 and 2: the global nearest-neighbor tour cut into day chunks.
///
/// Index 0 of `distances` is the start point; `1..size` are the stops.
pub fn cluster_tour(distances: &DistanceMatrix, max_per_day: usize) -> Vec<Vec<usize>> {
    let stops: Vec<usize> = (1..distances.size()).collect();
    let tour = nearest_neighbor_tour(&stops, 0, distances);
    split_balanced(&tour, max_per_day)
}

/// Step 3: nearest-neighbor from the start point, then 2-opt.
///
/// Returns the day's order and its round-trip distance.
pub fn optimize_day(chunk: &[usize], distances: &DistanceMatrix) -> (Vec<usize>, f64) {
    let initial = nearest_neighbor_tour(chunk, 0, distances);
    two_opt_improve(&initial, 0, distances)
}

/// Partitions the selection into day clusters with locally optimal order.
///
/// Every practitioner ends up in exactly one cluster, clusters hold between
/// 1 and `max_per_day` stops, and each cluster's order is a 2-opt local
/// optimum for the round trip from `start`.
///
/// # Errors
///
/// [`OptimizeError::InvalidMaxVisitsPerDay`] if `max_per_day` is zero or
/// above [`MAX_VISITS_PER_DAY_LIMIT`].
///
/// # Examples
///
/// ```
/// use territory_routing::constructive::build_day_clusters;
/// use territory_routing::models::{GeoPoint, Practitioner, SelectedPractitioner};
///
/// let start = GeoPoint::new(45.76, 4.84);
/// let selected: Vec<_> = (0..7)
///     .map(|i| SelectedPractitioner::new(
///         Practitioner::new(format!("p{i}"), "X", "Lyon"),
///         GeoPoint::new(45.70 + 0.01 * i as f64, 4.84),
///     ))
///     .collect();
///
/// let clusters = build_day_clusters(&selected, start, 6).unwrap();
/// let sizes: Vec<usize> = clusters.iter().map(|c| c.len()).collect();
/// assert_eq!(sizes, vec![4, 3]);
/// ```
pub fn build_day_clusters(
    selected: &[SelectedPractitioner],
    start: GeoPoint,
    max_per_day: u32,
) -> Result<Vec<DayCluster>, OptimizeError> {
    if max_per_day == 0 || max_per_day > MAX_VISITS_PER_DAY_LIMIT {
        return Err(OptimizeError::InvalidMaxVisitsPerDay {
            value: max_per_day,
            max: MAX_VISITS_PER_DAY_LIMIT,
        });
    }
    if selected.is_empty() {
        return Ok(Vec::new());
    }

    let distances = selection_matrix(selected, start);
    let chunks = cluster_tour(&distances, max_per_day as usize);
    debug!(stops = selected.len(), days = chunks.len(), "sliced global tour");

    Ok(chunks
        .iter()
        .map(|chunk| {
            let (route, dist) = optimize_day(chunk, &distances);
            to_cluster(selected, &route, dist)
        })
        .collect())
}

/// Distance matrix over the start point (index 0) and the selection
/// (index `i + 1` for `selected[i]`).
pub fn selection_matrix(selected: &[SelectedPractitioner], start: GeoPoint) -> DistanceMatrix {
    let points: Vec<GeoPoint> = std::iter::once(start)
        .chain(selected.iter().map(|s| s.location))
        .collect();
    DistanceMatrix::from_points(&points)
}

/// Maps matrix indices of a route back to practitioners.
pub fn to_cluster(selected: &[SelectedPractitioner], route: &[usize], round_trip_km: f64) -> DayCluster {
    let stops = route.iter().map(|&idx| selected[idx - 1].clone()).collect();
    DayCluster::new(stops, round_trip_km)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::local_search::route_distance;
    use crate::models::Practitioner;
    use std::collections::BTreeSet;

    fn practitioner_at(id: &str, lat: f64, lng: f64) -> SelectedPractitioner {
        SelectedPractitioner::new(Practitioner::new(id, id, "Lyon"), GeoPoint::new(lat, lng))
    }

    fn grid(n: usize) -> Vec<SelectedPractitioner> {
        (0..n)
            .map(|i| {
                let row = (i / 4) as f64;
                let col = (i % 4) as f64;
                practitioner_at(&format!("p{i}"), 45.7 + row * 0.02, 4.8 + col * 0.03)
            })
            .collect()
    }

    #[test]
    fn test_balanced_day_size_exact_fit() {
        assert_eq!(balanced_day_size(6, 6), 6);
        assert_eq!(balanced_day_size(18, 6), 6);
    }

    #[test]
    fn test_balanced_day_size_spreads() {
        assert_eq!(balanced_day_size(10, 3), 3); // 3 + 3 + 3 + 1
        assert_eq!(balanced_day_size(11, 4), 4); // 4 + 4 + 3
        assert_eq!(balanced_day_size(5, 1), 1);
    }

    #[test]
    fn test_split_balanced() {
        let chunks = split_balanced(&[1, 2, 3, 4, 5, 6, 7], 6);
        assert_eq!(chunks, vec![vec![1, 2, 3, 4], vec![5, 6, 7]]);
        assert!(split_balanced::<u8>(&[], 6).is_empty());
    }

    #[test]
    fn test_rejects_zero_cap() {
        let err = build_day_clusters(&grid(3), GeoPoint::new(45.7, 4.8), 0).unwrap_err();
        assert!(matches!(err, OptimizeError::InvalidMaxVisitsPerDay { value: 0, .. }));
    }

    #[test]
    fn test_empty_selection() {
        let clusters = build_day_clusters(&[], GeoPoint::new(45.7, 4.8), 6).expect("valid");
        assert!(clusters.is_empty());
    }

    #[test]
    fn test_every_practitioner_once() {
        let selected = grid(13);
        let clusters = build_day_clusters(&selected, GeoPoint::new(45.72, 4.85), 5).expect("valid");
        let ids: Vec<&str> = clusters
            .iter()
            .flat_map(|c| c.stops().iter().map(|s| s.id()))
            .collect();
        assert_eq!(ids.len(), 13);
        let unique: BTreeSet<&str> = ids.iter().copied().collect();
        assert_eq!(unique.len(), 13);
    }

    #[test]
    fn test_cluster_sizes_bounded() {
        let selected = grid(13);
        let clusters = build_day_clusters(&selected, GeoPoint::new(45.72, 4.85), 5).expect("valid");
        assert_eq!(clusters.len(), 3);
        for c in &clusters {
            assert!(!c.is_empty() && c.len() <= 5);
        }
    }

    #[test]
    fn test_single_practitioner_round_trip() {
        let selected = vec![practitioner_at("solo", 45.8, 4.9)];
        let start = GeoPoint::new(45.7, 4.8);
        let clusters = build_day_clusters(&selected, start, 1).expect("valid");
        assert_eq!(clusters.len(), 1);
        let expected = 2.0 * crate::distance::distance_km(start, selected[0].location);
        assert!((clusters[0].round_trip_km() - expected).abs() < 1e-9);
    }

    #[test]
    fn test_day_order_not_worse_than_nearest_neighbor() {
        let selected = grid(12);
        let start = GeoPoint::new(45.70, 4.80);
        let dm = selection_matrix(&selected, start);
        for chunk in cluster_tour(&dm, 6) {
            let nn = nearest_neighbor_tour(&chunk, 0, &dm);
            let (_, optimized) = optimize_day(&chunk, &dm);
            assert!(optimized <= route_distance(&nn, 0, &dm) + 1e-9);
        }
    }

    #[test]
    fn test_round_trip_matches_stops() {
        let selected = grid(8);
        let start = GeoPoint::new(45.70, 4.80);
        let clusters = build_day_clusters(&selected, start, 4).expect("valid");
        for c in &clusters {
            let mut dist = 0.0;
            let mut prev = start;
            for s in c.stops() {
                dist += crate::distance::distance_km(prev, s.location);
                prev = s.location;
            }
            dist += crate::distance::distance_km(prev, start);
            assert!((dist - c.round_trip_km()).abs() < 1e-9);
        }
    }
}
