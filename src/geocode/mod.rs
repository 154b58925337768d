//! Coordinate resolution for practitioners.
//!
//! A practitioner's free-text city is matched against a fixed table of base
//! coordinates (exact, then word-boundary prefix, then a metropolitan
//! fallback) and shifted by a deterministic identity-derived offset.
//!
//! Unknown cities never fail resolution; the match kind is exposed through
//! [`CityTable::resolve`] so callers can surface a warning instead.

mod cities;
mod jitter;

pub use cities::{normalize_city, CityMatch, CityTable, MatchKind, DEFAULT_METRO_POINT};
pub use jitter::{identity_hash, jitter_offsets, MAX_JITTER_DEGREES};

use tracing::warn;

use crate::models::{GeoPoint, Practitioner};

/// Resolves a practitioner to a stable coordinate.
///
/// # Examples
///
/// ```
/// use territory_routing::geocode::{resolve_coordinates, CityTable, MAX_JITTER_DEGREES};
/// use territory_routing::models::Practitioner;
///
/// let p = Practitioner::new("hcp-1", "Martin", "Lyon 7e");
/// let a = resolve_coordinates(&p);
/// let b = resolve_coordinates(&p);
/// assert_eq!(a, b);
///
/// let base = CityTable::french().resolve("Lyon").point();
/// assert!((a.lat - base.lat).abs() <= MAX_JITTER_DEGREES);
/// assert!((a.lng - base.lng).abs() <= MAX_JITTER_DEGREES);
/// ```
pub fn resolve_coordinates(practitioner: &Practitioner) -> GeoPoint {
    let city = CityTable::french().resolve(practitioner.city());
    if city.is_fallback() {
        warn!(
            practitioner = practitioner.id(),
            city = practitioner.city(),
            "unknown city, using default metropolitan coordinate"
        );
    }
    let (d_lat, d_lng) = jitter_offsets(identity_hash(practitioner.id(), practitioner.name()));
    city.point().offset(d_lat, d_lng)
}
