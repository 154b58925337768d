//! Google encoded polylines for drawing a day on the map.
//!
//! See: <https://developers.google.com/maps/documentation/utilities/polylinealgorithm>

use crate::models::{GeoPoint, OptimizedDay};

/// Encodes points with the Google Polyline Algorithm (5 decimal places,
/// each point stored as the delta from the previous one).
///
/// # Examples
///
/// ```
/// use territory_routing::export::encode_polyline;
/// use territory_routing::models::GeoPoint;
///
/// let points = [
///     GeoPoint::new(38.5, -120.2),
///     GeoPoint::new(40.7, -120.95),
///     GeoPoint::new(43.252, -126.453),
/// ];
/// assert_eq!(encode_polyline(&points), "_p~iF~ps|U_ulLnnqC_mqNvxq`@");
/// assert!(encode_polyline(&[]).is_empty());
/// ```
pub fn encode_polyline(points: &[GeoPoint]) -> String {
    let mut out = String::new();
    let mut prev_lat = 0i64;
    let mut prev_lng = 0i64;

    for p in points {
        let lat = (p.lat * 1e5).round() as i64;
        let lng = (p.lng * 1e5).round() as i64;
        encode_value(lat - prev_lat, &mut out);
        encode_value(lng - prev_lng, &mut out);
        prev_lat = lat;
        prev_lng = lng;
    }
    out
}

fn encode_value(value: i64, out: &mut String) {
    let mut encoded = if value < 0 { !(value << 1) } else { value << 1 };
    // 5-bit chunks, 0x20 marks a continuation
    while encoded >= 0x20 {
        out.push(char::from((((encoded & 0x1f) | 0x20) + 63) as u8));
        encoded >>= 5;
    }
    out.push(char::from((encoded + 63) as u8));
}

/// Decodes a Google polyline.
///
/// Decoding stops at the first malformed value: a truncated trailing pair,
/// a byte outside the polyline alphabet, a value longer than 64 bits, or a
/// coordinate sum that overflows. The points read up to there are returned.
pub fn decode_polyline(encoded: &str) -> Vec<GeoPoint> {
    let bytes = encoded.as_bytes();
    let mut points = Vec::new();
    let mut lat = 0i64;
    let mut lng = 0i64;
    let mut i = 0;

    while i < bytes.len() {
        let Some((d_lat, used)) = decode_value(&bytes[i..]) else {
            break;
        };
        i += used;
        let Some((d_lng, used)) = decode_value(&bytes[i..]) else {
            break;
        };
        i += used;
        let (Some(next_lat), Some(next_lng)) = (lat.checked_add(d_lat), lng.checked_add(d_lng)) else {
            break;
        };
        lat = next_lat;
        lng = next_lng;
        points.push(GeoPoint::new(lat as f64 / 1e5, lng as f64 / 1e5));
    }
    points
}

/// Reads one zigzag value and the number of bytes it took.
///
/// `None` when the input ends mid-value or the value does not fit in 64 bits.
fn decode_value(bytes: &[u8]) -> Option<(i64, usize)> {
    let mut result = 0u64;
    let mut shift = 0u32;
    for (used, &b) in bytes.iter().enumerate() {
        let chunk = u64::from(b.checked_sub(63)?);
        if chunk > 0x3f || shift >= u64::BITS {
            return None;
        }
        let bits = chunk & 0x1f;
        if bits.checked_shl(shift)? >> shift != bits {
            return None;
        }
        result |= bits << shift;
        shift += 5;
        if chunk < 0x20 {
            let value = (result >> 1) as i64;
            let value = if result & 1 != 0 { !value } else { value };
            return Some((value, used + 1));
        }
    }
    None
}

/// The day's round trip, start → visits → start, as an encoded polyline.
/// Empty for a day without visits.
pub fn day_polyline(day: &OptimizedDay, start: GeoPoint) -> String {
    if day.is_empty() {
        return String::new();
    }
    let points: Vec<GeoPoint> = std::iter::once(start)
        .chain(day.visits().iter().map(|v| v.stop.location))
        .chain(std::iter::once(start))
        .collect();
    encode_polyline(&points)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluation::recompute_day_times;
    use crate::models::{Practitioner, SelectedPractitioner};
    use chrono::NaiveDate;

    #[test]
    fn test_decode_known_line() {
        let points = decode_polyline("_p~iF~ps|U_ulLnnqC_mqNvxq`@");
        assert_eq!(points.len(), 3);
        assert!((points[2].lat - 43.252).abs() < 1e-5);
        assert!((points[2].lng + 126.453).abs() < 1e-5);
    }

    #[test]
    fn test_lyon_points_survive_encoding() {
        let points = vec![GeoPoint::new(45.764, 4.8357), GeoPoint::new(45.7719, 4.8902)];
        let decoded = decode_polyline(&encode_polyline(&points));
        assert_eq!(decoded.len(), 2);
        for (a, b) in points.iter().zip(&decoded) {
            assert!((a.lat - b.lat).abs() < 1e-5);
            assert!((a.lng - b.lng).abs() < 1e-5);
        }
    }

    #[test]
    fn test_day_polyline_closes_loop() {
        let start = GeoPoint::new(45.764, 4.8357);
        let stops = vec![
            SelectedPractitioner::new(Practitioner::new("a", "A", "Bron"), GeoPoint::new(45.7386, 4.9131)),
            SelectedPractitioner::new(Practitioner::new("b", "B", "Oullins"), GeoPoint::new(45.7144, 4.8075)),
        ];
        let date = NaiveDate::from_ymd_opt(2024, 3, 4).expect("valid date");
        let day = OptimizedDay::new(0, date, recompute_day_times(&stops, start, 30));

        let decoded = decode_polyline(&day_polyline(&day, start));
        assert_eq!(decoded.len(), 4);
        assert!((decoded[0].lat - decoded[3].lat).abs() < 1e-9);
        assert!((decoded[1].lng - 4.9131).abs() < 1e-5);
    }

    #[test]
    fn test_malformed_input_does_not_panic() {
        assert!(decode_polyline(&"~".repeat(30)).is_empty());
        assert!(decode_polyline(&"~".repeat(200)).is_empty());
        assert!(decode_polyline(" !\"#").is_empty());
        assert!(decode_polyline("é").is_empty());

        // a valid pair followed by an endless continuation
        let mut encoded = encode_polyline(&[GeoPoint::new(45.764, 4.8357)]);
        encoded.push_str(&"~".repeat(30));
        let points = decode_polyline(&encoded);
        assert_eq!(points.len(), 1);
        assert!((points[0].lat - 45.764).abs() < 1e-5);
    }

    #[test]
    fn test_coordinate_overflow_stops_decoding() {
        // 12 full chunks then 0x0f: every bit set, which decodes to i64::MIN
        let mut huge = String::new();
        for _ in 0..12 {
            huge.push(char::from(0x3f + 63));
        }
        huge.push(char::from(0x0f + 63));
        let encoded = huge.repeat(4);
        let points = decode_polyline(&encoded);
        assert_eq!(points.len(), 1);
    }

    #[test]
    fn test_empty_day() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 4).expect("valid date");
        let start = GeoPoint::new(45.0, 4.0);
        let day = OptimizedDay::new(0, date, recompute_day_times(&[], start, 30));
        assert!(day_polyline(&day, start).is_empty());
    }
}
