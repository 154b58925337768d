//! Local search operators for improving day routes.
//!
//! - [`two_opt_improve`]: Intra-route 2-opt segment reversal on the round trip

mod two_opt;

pub use two_opt::{route_distance, two_opt_improve};
