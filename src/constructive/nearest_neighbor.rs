//! Nearest-neighbor tour construction.
//!
//! Starting from the start point, always travel to the closest unvisited
//! stop. Used twice: once over the whole selection to get a
//! geography-aware ordering, and once per day before 2-opt.
//!
//! # Complexity
//!
//! O(n²) where n = number of stops.
//!
//! # Reference
//!
//! The simplest constructive heuristic for the TSP. Tours are typically
//! 15-25% above optimal, which 2-opt then narrows.

use crate::distance::DistanceMatrix;

/// Orders `stops` greedily by proximity, starting from `start`.
///
/// The result is a permutation of `stops`: nothing is dropped or duplicated.
/// Ties go to the stop listed first.
///
/// # Arguments
///
/// * `stops`: Matrix indices to visit (excluding the start point)
/// * `start`: Matrix index of the start point
/// * `distances`: Distance matrix
///
/// # Examples
///
/// ```
/// use territory_routing::distance::DistanceMatrix;
/// use territory_routing::constructive::nearest_neighbor_tour;
///
/// // start at 0; stop 1 is far, stop 2 is near
/// let dm = DistanceMatrix::from_data(3, vec![
///     0.0, 10.0, 1.0,
///     10.0, 0.0, 9.0,
///     1.0, 9.0, 0.0,
/// ]).unwrap();
/// assert_eq!(nearest_neighbor_tour(&[1, 2], 0, &dm), vec![2, 1]);
/// ```
pub fn nearest_neighbor_tour(stops: &[usize], start: usize, distances: &DistanceMatrix) -> Vec<usize> {
    let mut remaining = stops.to_vec();
    let mut tour = Vec::with_capacity(stops.len());
    let mut current = start;

    while let Some(next) = distances.nearest_neighbor(current, &remaining) {
        if let Some(pos) = remaining.iter().position(|&s| s == next) {
            remaining.remove(pos);
        }
        tour.push(next);
        current = next;
    }

    tour
}
