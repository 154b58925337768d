//! Multi-day planning: the optimization pipeline and what surrounds it.
//!
//! # Pipeline
//!
//! 1. [`Phase::ResolveCoordinates`]: city lookup plus identity jitter.
//! 2. [`Phase::DistanceMatrix`]: road distances over start + selection.
//! 3. [`Phase::Clustering`]: global nearest-neighbor tour cut into days.
//! 4. [`Phase::LocalSearch`]: per-day nearest-neighbor and 2-opt.
//! 5. [`Phase::Schedule`]: [`order_days`], [`working_days`], timelines,
//!    and the [`baseline_for`] comparison.
//!
//! # Complexity
//!
//! O(n²) for the matrix and the global tour; 2-opt is bounded by the day
//! size, which never exceeds 20 stops.

mod baseline;
mod calendar;
mod day_order;
mod optimizer;
mod progress;
mod session;

pub use baseline::baseline_for;
pub use calendar::{is_working_day, next_working_day, working_days};
pub use day_order::{balanced_score, order_days, BalancedWeights};
pub use optimizer::{materialize_schedule, optimize, optimize_selection, optimize_with_progress};
pub use progress::{never_cancel, Phase, ProgressObserver};
pub use session::PlanSession;
