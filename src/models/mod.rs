//! Domain model types for territory route planning.
//!
//! Practitioners and their resolved coordinates come in; day clusters,
//! scheduled visits, and the optimization result come out.

mod criteria;
mod practitioner;
mod result;
mod schedule;

pub use criteria::{
    Objective, OptimizationCriteria, StartLocation, MAX_VISITS_PER_DAY_LIMIT,
    MAX_VISIT_DURATION_MINUTES,
};
pub use practitioner::{resolve_selection, GeoPoint, Loyalty, Practitioner, SelectedPractitioner};
pub use result::{Baseline, OptimizationResult, Savings, Totals};
pub use schedule::{DayCluster, DayTimeline, OptimizedDay, ScheduledVisit};
