//! # territory-routing
//!
//! Multi-day visit planning for a field sales representative: practitioners
//! are located from their city, grouped into working days, ordered within
//! each day, and scheduled from 09:00 with a lunch break.
//!
//! ## Modules
//!
//! - [`models`]: Domain types (Practitioner, OptimizationCriteria, OptimizedDay, OptimizationResult)
//! - [`geocode`]: City table lookup and deterministic per-practitioner jitter
//! - [`distance`]: Road distance (Haversine × 1.3), travel time, distance matrix
//! - [`constructive`]: Nearest-neighbor tours and balanced multi-day clustering
//! - [`local_search`]: 2-opt improvement of a day's round trip
//! - [`evaluation`]: Day timelines: clock times, lunch deferral, return leg
//! - [`planning`]: The optimization pipeline, day ordering, calendar, baseline
//! - [`export`]: iCalendar, visit records, JSON, map polylines
//!
//! ## Example
//!
//! ```
//! use chrono::NaiveDate;
//! use territory_routing::{optimize, Objective, OptimizationCriteria, Practitioner};
//!
//! let practitioners = vec![
//!     Practitioner::new("p1", "Martin", "Villeurbanne").with_kol(true),
//!     Practitioner::new("p2", "Bernard", "Grenoble"),
//!     Practitioner::new("p3", "Durand", "Bron"),
//! ];
//! let criteria = OptimizationCriteria::default()
//!     .with_objective(Objective::KolFirst)
//!     .with_max_visits_per_day(2);
//! let start = NaiveDate::from_ymd_opt(2024, 3, 4).unwrap();
//!
//! let plan = optimize(&practitioners, &criteria, start).unwrap();
//! assert_eq!(plan.totals().visits, 3);
//! assert_eq!(plan.days().len(), 2);
//! ```

pub mod constructive;
pub mod distance;
pub mod error;
pub mod evaluation;
pub mod export;
pub mod geocode;
pub mod local_search;
pub mod models;
pub mod planning;
#[cfg(feature = "wasm")]
pub mod wasm;

pub use error::{ConfigError, OptimizeError};
pub use models::{
    GeoPoint, Objective, OptimizationCriteria, OptimizationResult, OptimizedDay, Practitioner,
};
pub use planning::{optimize, optimize_with_progress, PlanSession};
