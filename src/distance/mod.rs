//! Distance and travel time model.
//!
//! Haversine distance scaled by a road factor, a piecewise speed model for
//! travel minutes, and a dense matrix over the start point and stops.

mod matrix;
mod travel;

pub use matrix::DistanceMatrix;
pub use travel::{distance_km, haversine_km, travel_minutes, EARTH_RADIUS_KM, ROAD_FACTOR};
