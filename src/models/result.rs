//! Optimization result, baseline, and savings.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{OptimizationCriteria, OptimizedDay};

/// Distance and travel time of the unoptimized plan.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Baseline {
    pub distance_km: f64,
    pub travel_minutes: u32,
}

/// Improvement of the optimized plan over the baseline.
///
/// Absolute savings are clamped at zero; percentages are zero when the
/// baseline is zero.
///
/// # Examples
///
/// ```
/// use territory_routing::models::{Baseline, Savings};
///
/// let baseline = Baseline { distance_km: 200.0, travel_minutes: 240 };
/// let s = Savings::between(baseline, 150.0, 180);
/// assert_eq!(s.km_saved, 50.0);
/// assert_eq!(s.minutes_saved, 60);
/// assert_eq!(s.km_percent, 25.0);
///
/// // never negative
/// let s = Savings::between(baseline, 260.0, 300);
/// assert_eq!(s.km_saved, 0.0);
/// assert_eq!(s.minutes_saved, 0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Savings {
    pub km_saved: f64,
    pub minutes_saved: u32,
    pub km_percent: f64,
    pub minutes_percent: f64,
}

impl Savings {
    /// Compares an optimized distance/time against the baseline.
    pub fn between(baseline: Baseline, optimized_km: f64, optimized_minutes: u32) -> Self {
        let km_saved = (baseline.distance_km - optimized_km).max(0.0);
        let minutes_saved = baseline.travel_minutes.saturating_sub(optimized_minutes);
        Self {
            km_saved,
            minutes_saved,
            km_percent: percent(km_saved, baseline.distance_km),
            minutes_percent: percent(f64::from(minutes_saved), f64::from(baseline.travel_minutes)),
        }
    }
}

fn percent(part: f64, whole: f64) -> f64 {
    if whole > 0.0 && whole.is_finite() {
        part / whole * 100.0
    } else {
        0.0
    }
}

/// Aggregates over every optimized day.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Totals {
    pub days: usize,
    pub visits: usize,
    pub kol_count: usize,
    pub volume_liters: f64,
    pub distance_km: f64,
    pub travel_minutes: u32,
    pub visit_minutes: u32,
}

impl Totals {
    /// Sums the per-day figures.
    pub fn from_days(days: &[OptimizedDay]) -> Self {
        days.iter().fold(
            Self {
                days: days.len(),
                ..Self::default()
            },
            |acc, day| Self {
                days: acc.days,
                visits: acc.visits + day.len(),
                kol_count: acc.kol_count + day.kol_count(),
                volume_liters: acc.volume_liters + day.total_volume(),
                distance_km: acc.distance_km + day.total_distance_km(),
                travel_minutes: acc.travel_minutes + day.total_travel_minutes(),
                visit_minutes: acc.visit_minutes + day.total_visit_minutes(),
            },
        )
    }
}

/// Output of one optimization run. Read-only; a new run produces a new value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizationResult {
    days: Vec<OptimizedDay>,
    baseline: Baseline,
    savings: Savings,
    totals: Totals,
    criteria: OptimizationCriteria,
    start_date: NaiveDate,
}

impl OptimizationResult {
    /// Assembles a result, computing totals and savings from the days.
    pub fn new(
        days: Vec<OptimizedDay>,
        baseline: Baseline,
        criteria: OptimizationCriteria,
        start_date: NaiveDate,
    ) -> Self {
        let totals = Totals::from_days(&days);
        let savings = Savings::between(baseline, totals.distance_km, totals.travel_minutes);
        Self {
            days,
            baseline,
            savings,
            totals,
            criteria,
            start_date,
        }
    }

    /// A result with no days, for an empty selection.
    pub fn empty(criteria: OptimizationCriteria, start_date: NaiveDate) -> Self {
        Self::new(Vec::new(), Baseline::default(), criteria, start_date)
    }

    pub fn days(&self) -> &[OptimizedDay] {
        &self.days
    }

    pub fn baseline(&self) -> Baseline {
        self.baseline
    }

    pub fn savings(&self) -> Savings {
        self.savings
    }

    pub fn totals(&self) -> Totals {
        self.totals
    }

    pub fn criteria(&self) -> &OptimizationCriteria {
        &self.criteria
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}
