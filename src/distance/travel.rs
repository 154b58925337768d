//! Road distance and travel-time estimates between coordinates.

use crate::models::GeoPoint;

/// Mean Earth radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Straight-line to road distance multiplier.
pub const ROAD_FACTOR: f64 = 1.3;

/// Speed bands: (upper distance bound in km, average speed in km/h).
const SPEED_BANDS: [(f64, f64); 2] = [(5.0, 25.0), (30.0, 45.0)];

/// Average speed beyond the last band.
const INTER_URBAN_SPEED_KMH: f64 = 70.0;

/// Great-circle distance in kilometers.
///
/// # Examples
///
/// ```
/// use territory_routing::distance::haversine_km;
/// use territory_routing::models::GeoPoint;
///
/// let lyon = GeoPoint::new(45.7640, 4.8357);
/// let paris = GeoPoint::new(48.8566, 2.3522);
/// let d = haversine_km(lyon, paris);
/// assert!(d > 385.0 && d < 400.0);
/// ```
pub fn haversine_km(from: GeoPoint, to: GeoPoint) -> f64 {
    let lat1 = from.lat.to_radians();
    let lat2 = to.lat.to_radians();
    let d_lat = (to.lat - from.lat).to_radians();
    let d_lng = (to.lng - from.lng).to_radians();

    let a = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lng / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().min(1.0).asin();

    EARTH_RADIUS_KM * c
}

/// Estimated road distance in kilometers: Haversine × [`ROAD_FACTOR`].
pub fn distance_km(from: GeoPoint, to: GeoPoint) -> f64 {
    haversine_km(from, to) * ROAD_FACTOR
}

/// Estimated travel minutes for a road distance, rounded up.
///
/// Hops up to 5 km drive at 25 km/h, up to 30 km at 45 km/h, longer ones at
/// 70 km/h. Non-finite or non-positive distances take no time.
///
/// # Examples
///
/// ```
/// use territory_routing::distance::travel_minutes;
///
/// assert_eq!(travel_minutes(5.0), 12);   // urban
/// assert_eq!(travel_minutes(30.0), 40);  // peri-urban
/// assert_eq!(travel_minutes(70.0), 60);  // inter-urban
/// assert_eq!(travel_minutes(0.0), 0);
/// ```
pub fn travel_minutes(distance_km: f64) -> u32 {
    if !distance_km.is_finite() || distance_km <= 0.0 {
        return 0;
    }
    let speed = SPEED_BANDS
        .iter()
        .find(|(limit, _)| distance_km <= *limit)
        .map_or(INTER_URBAN_SPEED_KMH, |&(_, speed)| speed);
    (distance_km * 60.0 / speed).ceil() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_haversine_same_point() {
        let p = GeoPoint::new(45.76, 4.83);
        assert!(haversine_km(p, p) < 1e-9);
    }

    #[test]
    fn test_haversine_one_degree_latitude() {
        // 1° of latitude = R·π/180 ≈ 111.195 km
        let d = haversine_km(GeoPoint::new(45.0, 4.0), GeoPoint::new(46.0, 4.0));
        assert!((d - 111.1949).abs() < 1e-3, "got {d}");
    }

    #[test]
    fn test_haversine_symmetric() {
        let a = GeoPoint::new(45.76, 4.83);
        let b = GeoPoint::new(45.19, 5.72);
        assert!((haversine_km(a, b) - haversine_km(b, a)).abs() < 1e-12);
    }

    #[test]
    fn test_road_factor_applied() {
        let a = GeoPoint::new(45.0, 4.0);
        let b = GeoPoint::new(46.0, 4.0);
        let d = distance_km(a, b);
        assert!((d - 111.1949 * 1.3).abs() < 1e-2, "got {d}");
    }

    #[test]
    fn test_travel_minutes_bands() {
        assert_eq!(travel_minutes(1.0), 3); // 2.4 → 3
        assert_eq!(travel_minutes(5.0), 12);
        assert_eq!(travel_minutes(5.1), 7); // 6.8 → 7 at 45 km/h
        assert_eq!(travel_minutes(30.0), 40);
        assert_eq!(travel_minutes(35.0), 30);
        assert_eq!(travel_minutes(140.0), 120);
    }

    #[test]
    fn test_travel_minutes_rounds_up() {
        // 0.01 km at 25 km/h is 0.024 min → 1
        assert_eq!(travel_minutes(0.01), 1);
    }

    #[test]
    fn test_travel_minutes_degenerate() {
        assert_eq!(travel_minutes(-3.0), 0);
        assert_eq!(travel_minutes(f64::NAN), 0);
        assert_eq!(travel_minutes(f64::INFINITY), 0);
    }
}
