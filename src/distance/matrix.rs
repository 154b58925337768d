//! Dense road-distance matrix.

use super::distance_km;
use crate::models::GeoPoint;

/// A dense n×n distance matrix (km) stored in row-major order.
///
/// By convention index 0 is the start point and `1..=n` are the stops, in
/// the order they were passed in.
///
/// # Examples
///
/// ```
/// use territory_routing::distance::DistanceMatrix;
/// use territory_routing::models::GeoPoint;
///
/// let points = vec![
///     GeoPoint::new(45.76, 4.83),
///     GeoPoint::new(45.77, 4.84),
///     GeoPoint::new(45.19, 5.72),
/// ];
/// let dm = DistanceMatrix::from_points(&points);
/// assert_eq!(dm.size(), 3);
/// assert_eq!(dm.get(0, 0), 0.0);
/// assert_eq!(dm.nearest_neighbor(0, &[1, 2]), Some(1));
/// ```
#[derive(Debug, Clone)]
pub struct DistanceMatrix {
    data: Vec<f64>,
    size: usize,
}

impl DistanceMatrix {
    /// Creates a distance matrix of the given size, initialized to zero.
    pub fn new(size: usize) -> Self {
        Self {
            data: vec![0.0; size * size],
            size,
        }
    }

    /// Computes road distances between every pair of points.
    pub fn from_points(points: &[GeoPoint]) -> Self {
        let n = points.len();
        let mut dm = Self::new(n);
        for i in 0..n {
            for j in (i + 1)..n {
                let d = distance_km(points[i], points[j]);
                dm.set(i, j, d);
                dm.set(j, i, d);
            }
        }
        dm
    }

    /// Creates a distance matrix from an explicit n×n grid.
    ///
    /// Returns `None` if the data length doesn't match `size * size`.
    pub fn from_data(size: usize, data: Vec<f64>) -> Option<Self> {
        if data.len() != size * size {
            return None;
        }
        Some(Self { data, size })
    }

    /// Returns the distance from location `from` to location `to`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.data[from * self.size + to]
    }

    /// Sets the distance from location `from` to location `to`.
    pub fn set(&mut self, from: usize, to: usize, distance: f64) {
        self.data[from * self.size + to] = distance;
    }

    /// Number of locations in this matrix.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns the candidate closest to `from`; on ties the earliest
    /// candidate wins.
    ///
    /// Returns `None` if `candidates` is empty.
    pub fn nearest_neighbor(&self, from: usize, candidates: &[usize]) -> Option<usize> {
        candidates
            .iter()
            .copied()
            .min_by(|&a, &b| self.get(from, a).total_cmp(&self.get(from, b)))
    }
}
