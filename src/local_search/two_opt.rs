//! Intra-route 2-opt improvement on a round trip from the start point.
//!
//! # Algorithm
//!
//! For each pair of positions (i, j) in a day's route, compute how much
//! round-trip distance is saved by reversing the segment `route[i..=j]`:
//!
//! ```text
//! gain = d(before, r[i]) + d(r[j], after) - d(before, r[j]) - d(r[i], after)
//! ```
//!
//! where `before` / `after` fall back to the start point at either end of
//! the route. A positive gain is applied at once and the scan continues.
//! Repeat until a full pass finds no improving reversal.
//!
//! Every accepted move strictly shortens the route and there are finitely
//! many orders, so the search always terminates in a local optimum.
//!
//! # Complexity
//!
//! O(n²) per pass, O(n³) worst case for convergence.
//!
//! # Reference
//!
//! Croes, G.A. (1958). "A method for solving traveling salesman problems",
//! *Operations Research* 6(6), 791-812.

use tracing::trace;

use crate::distance::DistanceMatrix;

/// Minimum gain for a reversal to count as an improvement.
const IMPROVEMENT_EPSILON: f64 = 1e-10;

/// Applies 2-opt improvement to a single day's route (matrix indices).
///
/// The route is a round trip that starts and ends at `depot`. Returns the
/// improved sequence and its round-trip distance.
///
/// # Arguments
///
/// * `route`: Ordered stop indices (excluding the start point)
/// * `depot`: Matrix index of the start point
/// * `distances`: Distance matrix
///
/// # Examples
///
/// ```
/// use territory_routing::distance::DistanceMatrix;
/// use territory_routing::local_search::{route_distance, two_opt_improve};
///
/// // start at 0; stops 1..=3 on a line at 1, 2, 3 km
/// let dm = DistanceMatrix::from_data(4, vec![
///     0.0, 1.0, 2.0, 3.0,
///     1.0, 0.0, 1.0, 2.0,
///     2.0, 1.0, 0.0, 1.0,
///     3.0, 2.0, 1.0, 0.0,
/// ]).unwrap();
///
/// let (improved, dist) = two_opt_improve(&[2, 1, 3], 0, &dm);
/// assert!(dist <= route_distance(&[2, 1, 3], 0, &dm));
/// assert!((dist - 6.0).abs() < 1e-10);
/// assert_eq!(improved.len(), 3);
/// ```
pub fn two_opt_improve(
    route: &[usize],
    depot: usize,
    distances: &DistanceMatrix,
) -> (Vec<usize>, f64) {
    if route.len() < 2 {
        return (route.to_vec(), route_distance(route, depot, distances));
    }

    let mut current = route.to_vec();
    let last = current.len() - 1;
    let mut passes = 0usize;

    loop {
        passes += 1;
        let mut reversals = 0usize;
        for i in 0..last {
            for j in i + 1..=last {
                if reversal_gain(&current, depot, distances, i, j) > IMPROVEMENT_EPSILON {
                    current[i..=j].reverse();
                    reversals += 1;
                }
            }
        }
        if reversals == 0 {
            break;
        }
    }

    let dist = route_distance(&current, depot, distances);
    trace!(stops = current.len(), passes, distance_km = dist, "2-opt converged");
    (current, dist)
}

/// Kilometres saved by visiting `route[i..=j]` backwards.
///
/// Inside the segment every leg is driven in the opposite direction over the
/// same road, so on a symmetric matrix only the leg entering the segment and
/// the leg leaving it change. Uncrossing those two legs is the whole point of
/// the move, and the gain is read from four matrix lookups.
fn reversal_gain(
    route: &[usize],
    depot: usize,
    distances: &DistanceMatrix,
    i: usize,
    j: usize,
) -> f64 {
    let before = if i == 0 { depot } else { route[i - 1] };
    let after = route.get(j + 1).copied().unwrap_or(depot);
    let (first, last) = (route[i], route[j]);

    let kept = distances.get(before, first) + distances.get(last, after);
    let swapped = distances.get(before, last) + distances.get(first, after);
    kept - swapped
}

/// Round-trip distance: `depot → route[0] → ... → route[n-1] → depot`.
///
/// An empty route has zero distance.
pub fn route_distance(route: &[usize], depot: usize, distances: &DistanceMatrix) -> f64 {
    let (Some(&first), Some(&last)) = (route.first(), route.last()) else {
        return 0.0;
    };
    let inner: f64 = route.windows(2).map(|w| distances.get(w[0], w[1])).sum();
    distances.get(depot, first) + inner + distances.get(last, depot)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::GeoPoint;

    /// Start at 0, stops at 1, 2, 3 on a line.
    fn line_matrix() -> DistanceMatrix {
        let mut dm = DistanceMatrix::new(4);
        for i in 0..4 {
            for j in 0..4 {
                dm.set(i, j, (i as f64 - j as f64).abs());
            }
        }
        dm
    }

    #[test]
    fn test_2opt_already_optimal() {
        let dm = line_matrix();
        let (improved, dist) = two_opt_improve(&[1, 2, 3], 0, &dm);
        assert_eq!(improved, vec![1, 2, 3]);
        assert!((dist - 6.0).abs() < 1e-10);
    }

    #[test]
    fn test_2opt_reverses_crossing() {
        // square around the start: (1,1), (2,0), (1,-1) visited out of order
        let points = vec![
            GeoPoint::new(45.0, 4.0),
            GeoPoint::new(45.01, 4.01),
            GeoPoint::new(45.0, 4.02),
            GeoPoint::new(44.99, 4.01),
        ];
        let dm = DistanceMatrix::from_points(&points);
        let original = route_distance(&[1, 3, 2], 0, &dm);
        let (_, improved) = two_opt_improve(&[1, 3, 2], 0, &dm);
        assert!(improved < original - 1e-6);
    }

    #[test]
    fn test_2opt_empty_route() {
        let dm = line_matrix();
        let (improved, dist) = two_opt_improve(&[], 0, &dm);
        assert!(improved.is_empty());
        assert_eq!(dist, 0.0);
    }

    #[test]
    fn test_2opt_single_stop() {
        let dm = line_matrix();
        let (improved, dist) = two_opt_improve(&[2], 0, &dm);
        assert_eq!(improved, vec![2]);
        assert!((dist - 4.0).abs() < 1e-10); // 0→2→0
    }

    #[test]
    fn test_route_distance() {
        let dm = line_matrix();
        assert!((route_distance(&[1, 2, 3], 0, &dm) - 6.0).abs() < 1e-10);
        assert!((route_distance(&[3, 1, 2], 0, &dm) - 8.0).abs() < 1e-10);
    }

    #[test]
    fn test_2opt_does_not_worsen() {
        let points = vec![
            GeoPoint::new(45.05, 4.05),
            GeoPoint::new(45.0, 4.0),
            GeoPoint::new(45.0, 4.1),
            GeoPoint::new(45.1, 4.0),
            GeoPoint::new(45.1, 4.1),
        ];
        let dm = DistanceMatrix::from_points(&points);
        let initial = vec![1, 4, 2, 3];
        let initial_dist = route_distance(&initial, 0, &dm);
        let (improved, improved_dist) = two_opt_improve(&initial, 0, &dm);
        assert!(improved_dist <= initial_dist + 1e-10);
        let mut sorted = improved.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_2opt_result_is_local_optimum() {
        let points = vec![
            GeoPoint::new(45.76, 4.83),
            GeoPoint::new(45.80, 4.90),
            GeoPoint::new(45.70, 4.80),
            GeoPoint::new(45.78, 4.70),
            GeoPoint::new(45.72, 4.95),
            GeoPoint::new(45.75, 4.85),
        ];
        let dm = DistanceMatrix::from_points(&points);
        let (route, _) = two_opt_improve(&[1, 2, 3, 4, 5], 0, &dm);
        for i in 0..route.len() - 1 {
            for j in i + 1..route.len() {
                assert!(reversal_gain(&route, 0, &dm, i, j) <= IMPROVEMENT_EPSILON);
            }
        }
    }

    #[test]
    fn test_reversal_gain_matches_full_recount() {
        let points = vec![
            GeoPoint::new(45.764, 4.8357),
            GeoPoint::new(45.7719, 4.8902),
            GeoPoint::new(45.7386, 4.9131),
            GeoPoint::new(45.7144, 4.8075),
            GeoPoint::new(45.7797, 4.8000),
        ];
        let dm = DistanceMatrix::from_points(&points);
        let route = [3, 1, 4, 2];
        let before = route_distance(&route, 0, &dm);
        for i in 0..route.len() - 1 {
            for j in i + 1..route.len() {
                let mut reversed = route.to_vec();
                reversed[i..=j].reverse();
                let saved = before - route_distance(&reversed, 0, &dm);
                assert!((reversal_gain(&route, 0, &dm, i, j) - saved).abs() < 1e-9);
            }
        }
    }
}
