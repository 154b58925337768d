//! Day clusters, scheduled visits, and materialized days.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use super::{GeoPoint, SelectedPractitioner};
use crate::distance::distance_km;
use crate::evaluation::recompute_day_times;

/// Practitioners assigned to one working day, in visiting order.
///
/// # Examples
///
/// ```
/// use territory_routing::models::{DayCluster, GeoPoint, Practitioner, SelectedPractitioner};
///
/// let stop = SelectedPractitioner::new(
///     Practitioner::new("a", "A", "Lyon").with_kol(true).with_volume(500.0),
///     GeoPoint::new(45.76, 4.84),
/// );
/// let cluster = DayCluster::new(vec![stop], 2.0);
/// assert_eq!(cluster.len(), 1);
/// assert_eq!(cluster.kol_count(), 1);
/// assert_eq!(cluster.total_volume(), 500.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayCluster {
    stops: Vec<SelectedPractitioner>,
    round_trip_km: f64,
}

impl DayCluster {
    /// Creates a cluster from ordered stops and their round-trip distance.
    pub fn new(stops: Vec<SelectedPractitioner>, round_trip_km: f64) -> Self {
        Self {
            stops,
            round_trip_km,
        }
    }

    /// Stops in visiting order.
    pub fn stops(&self) -> &[SelectedPractitioner] {
        &self.stops
    }

    pub fn into_stops(self) -> Vec<SelectedPractitioner> {
        self.stops
    }

    pub fn len(&self) -> usize {
        self.stops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    /// Start → stops → start distance in km.
    pub fn round_trip_km(&self) -> f64 {
        self.round_trip_km
    }

    pub fn kol_count(&self) -> usize {
        self.stops.iter().filter(|s| s.practitioner.is_kol()).count()
    }

    pub fn at_risk_count(&self) -> usize {
        self.stops
            .iter()
            .filter(|s| s.practitioner.is_at_risk())
            .count()
    }

    /// Sum of annual volumes in liters.
    pub fn total_volume(&self) -> f64 {
        self.stops.iter().map(|s| s.practitioner.volume_liters()).sum()
    }

    /// Mean distance from `start` to each stop; 0 for an empty cluster.
    pub fn mean_distance_from(&self, start: GeoPoint) -> f64 {
        if self.stops.is_empty() {
            return 0.0;
        }
        let sum: f64 = self.stops.iter().map(|s| distance_km(start, s.location)).sum();
        sum / self.stops.len() as f64
    }
}

/// One stop of a materialized day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledVisit {
    /// Practitioner visited.
    pub stop: SelectedPractitioner,
    /// 1-based position within the day.
    pub order: usize,
    /// Arrival clock time (after any lunch deferral).
    pub arrival: NaiveTime,
    /// Departure clock time (arrival + visit duration).
    pub departure: NaiveTime,
    /// Arrival in minutes after midnight of the day's date; may exceed 24h.
    pub arrival_minute: u32,
    /// Departure in minutes after midnight of the day's date; may exceed 24h.
    pub departure_minute: u32,
    /// Travel minutes from the previous stop (or the start).
    pub travel_minutes: u32,
    /// Road distance from the previous stop (or the start), km.
    pub distance_km: f64,
    /// Fixed visit duration.
    pub visit_minutes: u32,
}

impl ScheduledVisit {
    /// Arrival as a date-time, rolling into the next date past midnight.
    pub fn starts_at(&self, date: NaiveDate) -> NaiveDateTime {
        at_minute(date, self.arrival_minute)
    }

    /// Departure as a date-time, rolling into the next date past midnight.
    pub fn ends_at(&self, date: NaiveDate) -> NaiveDateTime {
        at_minute(date, self.departure_minute)
    }
}

fn at_minute(date: NaiveDate, minute: u32) -> NaiveDateTime {
    date.and_time(NaiveTime::default()) + Duration::minutes(i64::from(minute))
}

/// Timing of one day's walk through its stops.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayTimeline {
    pub visits: Vec<ScheduledVisit>,
    /// Distance including the return leg, km.
    pub total_distance_km: f64,
    /// Travel minutes including the return leg.
    pub total_travel_minutes: u32,
    pub total_visit_minutes: u32,
    pub return_distance_km: f64,
    pub return_minutes: u32,
    /// Clock time when back at the start point.
    pub end_time: NaiveTime,
    /// End of day in minutes after midnight; may exceed 24h.
    pub end_minute: u32,
}

/// A working day of the optimized plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizedDay {
    index: usize,
    date: NaiveDate,
    #[serde(flatten)]
    timeline: DayTimeline,
}

impl OptimizedDay {
    /// Creates a day from its 0-based index, calendar date, and timeline.
    pub fn new(index: usize, date: NaiveDate, timeline: DayTimeline) -> Self {
        Self {
            index,
            date,
            timeline,
        }
    }

    /// 0-based position of this day in the plan.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Working day assigned to this cluster.
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn visits(&self) -> &[ScheduledVisit] {
        &self.timeline.visits
    }

    pub fn len(&self) -> usize {
        self.timeline.visits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timeline.visits.is_empty()
    }

    pub fn timeline(&self) -> &DayTimeline {
        &self.timeline
    }

    pub fn total_distance_km(&self) -> f64 {
        self.timeline.total_distance_km
    }

    pub fn total_travel_minutes(&self) -> u32 {
        self.timeline.total_travel_minutes
    }

    pub fn total_visit_minutes(&self) -> u32 {
        self.timeline.total_visit_minutes
    }

    pub fn return_distance_km(&self) -> f64 {
        self.timeline.return_distance_km
    }

    pub fn return_minutes(&self) -> u32 {
        self.timeline.return_minutes
    }

    pub fn end_time(&self) -> NaiveTime {
        self.timeline.end_time
    }

    pub fn kol_count(&self) -> usize {
        self.visits()
            .iter()
            .filter(|v| v.stop.practitioner.is_kol())
            .count()
    }

    pub fn total_volume(&self) -> f64 {
        self.visits()
            .iter()
            .map(|v| v.stop.practitioner.volume_liters())
            .sum()
    }

    /// Practitioner ids in visiting order.
    pub fn practitioner_ids(&self) -> Vec<&str> {
        self.visits().iter().map(|v| v.stop.id()).collect()
    }

    /// Stops in visiting order.
    pub fn stops(&self) -> Vec<SelectedPractitioner> {
        self.visits().iter().map(|v| v.stop.clone()).collect()
    }

    /// Moves the visit at `from` to position `to` and recomputes the day's
    /// times. Other days are unaffected.
    ///
    /// Returns `false` (and leaves the day unchanged) when either position is
    /// out of range.
    pub fn move_visit(&mut self, from: usize, to: usize, start: GeoPoint, visit_minutes: u32) -> bool {
        let n = self.len();
        if from >= n || to >= n {
            return false;
        }
        let mut stops = self.stops();
        let moved = stops.remove(from);
        stops.insert(to, moved);
        self.timeline = recompute_day_times(&stops, start, visit_minutes);
        true
    }
}
