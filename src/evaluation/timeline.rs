//! Clock-time walk through a day's stops.

use chrono::NaiveTime;

use crate::distance::{distance_km, travel_minutes};
use crate::models::{DayTimeline, GeoPoint, ScheduledVisit, SelectedPractitioner};

/// Departure from the start point, minutes after midnight (09:00).
pub const DAY_START_MINUTES: u32 = 9 * 60;

/// Lunch window, minutes after midnight: arrivals in `[12:00, 13:00)` wait
/// until 13:00.
pub const LUNCH_START_MINUTES: u32 = 12 * 60;
pub const LUNCH_END_MINUTES: u32 = 13 * 60;

/// Minutes in one calendar day.
pub const MINUTES_PER_DAY: u32 = 24 * 60;

/// Defers an arrival that falls in the lunch hour to 13:00.
///
/// # Examples
///
/// ```
/// use territory_routing::evaluation::apply_lunch_rule;
///
/// assert_eq!(apply_lunch_rule(12 * 60 + 30), 13 * 60);
/// assert_eq!(apply_lunch_rule(11 * 60), 11 * 60);
/// assert_eq!(apply_lunch_rule(14 * 60), 14 * 60);
/// ```
pub fn apply_lunch_rule(arrival_minutes: u32) -> u32 {
    if (LUNCH_START_MINUTES..LUNCH_END_MINUTES).contains(&arrival_minutes) {
        LUNCH_END_MINUTES
    } else {
        arrival_minutes
    }
}

/// Converts minutes after midnight to a wall-clock time. Minutes past
/// midnight wrap into the next day; the walk keeps the exact minute count
/// alongside.
pub fn clock_time(minutes: u32) -> NaiveTime {
    let m = minutes % MINUTES_PER_DAY;
    NaiveTime::from_hms_opt(m / 60, m % 60, 0).unwrap_or_default()
}

/// Walks `stops` in order from `start`, assigning arrival and departure
/// times.
///
/// The day leaves `start` at 09:00. Each stop adds the travel time from the
/// previous position, the lunch rule, then the fixed visit duration. After
/// the last stop the return leg to `start` gives the end-of-day time. Used
/// both when materializing a plan and after a manual reorder.
///
/// # Examples
///
/// ```
/// use territory_routing::evaluation::recompute_day_times;
/// use territory_routing::models::{GeoPoint, Practitioner, SelectedPractitioner};
/// use chrono::NaiveTime;
///
/// let start = GeoPoint::new(45.76, 4.84);
/// let stop = SelectedPractitioner::new(
///     Practitioner::new("a", "A", "Lyon"),
///     GeoPoint::new(45.86, 4.84),
/// );
/// let day = recompute_day_times(&[stop], start, 30);
/// let visit = &day.visits[0];
/// assert_eq!(visit.order, 1);
/// assert_eq!(
///     visit.arrival,
///     NaiveTime::from_hms_opt(9, 0, 0).unwrap() + chrono::Duration::minutes(visit.travel_minutes as i64),
/// );
/// assert_eq!(day.total_travel_minutes, visit.travel_minutes + day.return_minutes);
/// ```
pub fn recompute_day_times(
    stops: &[SelectedPractitioner],
    start: GeoPoint,
    visit_minutes: u32,
) -> DayTimeline {
    let mut clock = DAY_START_MINUTES;
    let mut position = start;
    let mut visits = Vec::with_capacity(stops.len());
    let mut total_distance_km = 0.0;
    let mut total_travel_minutes = 0;

    for (i, stop) in stops.iter().enumerate() {
        let leg_km = distance_km(position, stop.location);
        let leg_minutes = travel_minutes(leg_km);
        let arrival = apply_lunch_rule(clock + leg_minutes);
        let departure = arrival + visit_minutes;

        visits.push(ScheduledVisit {
            stop: stop.clone(),
            order: i + 1,
            arrival: clock_time(arrival),
            departure: clock_time(departure),
            arrival_minute: arrival,
            departure_minute: departure,
            travel_minutes: leg_minutes,
            distance_km: leg_km,
            visit_minutes,
        });

        total_distance_km += leg_km;
        total_travel_minutes += leg_minutes;
        clock = departure;
        position = stop.location;
    }

    let (return_distance_km, return_minutes) = if stops.is_empty() {
        (0.0, 0)
    } else {
        let km = distance_km(position, start);
        (km, travel_minutes(km))
    };
    clock += return_minutes;

    DayTimeline {
        total_visit_minutes: visit_minutes * visits.len() as u32,
        visits,
        total_distance_km: total_distance_km + return_distance_km,
        total_travel_minutes: total_travel_minutes + return_minutes,
        return_distance_km,
        return_minutes,
        end_time: clock_time(clock),
        end_minute: clock,
    }
}
