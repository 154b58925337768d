//! Constructive heuristics for building day routes.
//!
//! - [`nearest_neighbor_tour`]: Greedy nearest-neighbor tour, O(n²)
//! - [`build_day_clusters`]: Global tour, balanced slicing, per-day re-optimization

mod clustering;
mod nearest_neighbor;

pub use clustering::{
    balanced_day_size, build_day_clusters, cluster_tour, optimize_day, selection_matrix,
    split_balanced, to_cluster,
};
pub use nearest_neighbor::nearest_neighbor_tour;
