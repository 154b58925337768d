//! Unoptimized reference plan used for savings reporting.
//!
//! The baseline keeps the selection in its original order, cuts it into the
//! same day size as the optimized plan, and drives each chunk as a round
//! trip from the start point. No reordering is applied.

use crate::evaluation::recompute_day_times;
use crate::models::{Baseline, GeoPoint, SelectedPractitioner};

/// Distance and travel time of the original-order plan.
///
/// # Examples
///
/// ```
/// use territory_routing::models::{GeoPoint, Practitioner, SelectedPractitioner};
/// use territory_routing::planning::baseline_for;
///
/// let start = GeoPoint::new(45.0, 4.0);
/// let stop = SelectedPractitioner::new(Practitioner::new("a", "A", "Lyon"), GeoPoint::new(45.1, 4.0));
/// let b = baseline_for(&[stop], start, 6);
/// assert_eq!(b.travel_minutes, 40); // 20 min there, 20 back
///
/// assert_eq!(baseline_for(&[], start, 6).distance_km, 0.0);
/// ```
pub fn baseline_for(selection: &[SelectedPractitioner], start: GeoPoint, day_size: usize) -> Baseline {
    if selection.is_empty() || day_size == 0 {
        return Baseline::default();
    }
    selection
        .chunks(day_size)
        .map(|chunk| recompute_day_times(chunk, start, 0))
        .fold(Baseline::default(), |acc, day| Baseline {
            distance_km: acc.distance_km + day.total_distance_km,
            travel_minutes: acc.travel_minutes + day.total_travel_minutes,
        })
}
