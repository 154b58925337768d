//! The optimization entry point: clustering, day ordering, and schedule
//! materialization in one run.

use std::collections::HashSet;
use std::ops::ControlFlow;

use chrono::NaiveDate;
use tracing::{debug, info};

use super::{baseline_for, never_cancel, order_days, working_days, Phase, ProgressObserver};
use crate::constructive::{balanced_day_size, cluster_tour, optimize_day, selection_matrix, to_cluster};
use crate::error::OptimizeError;
use crate::evaluation::recompute_day_times;
use crate::models::{
    DayCluster, GeoPoint, OptimizationCriteria, OptimizationResult, OptimizedDay, Practitioner,
    SelectedPractitioner,
};

/// Plans visits to `practitioners` over successive working days.
///
/// `practitioners` is the read-only selection snapshot; its order is the
/// baseline order. An empty selection yields an empty result.
///
/// # Errors
///
/// Invalid criteria or a repeated practitioner id.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use territory_routing::models::{OptimizationCriteria, Practitioner};
/// use territory_routing::planning::optimize;
///
/// let practitioners: Vec<_> = (0..8)
///     .map(|i| Practitioner::new(format!("hcp-{i}"), format!("Dr {i}"), "Villeurbanne"))
///     .collect();
/// let criteria = OptimizationCriteria::default().with_max_visits_per_day(5);
/// let monday = NaiveDate::from_ymd_opt(2024, 3, 4).unwrap();
///
/// let result = optimize(&practitioners, &criteria, monday).unwrap();
/// assert_eq!(result.days().len(), 2);
/// assert_eq!(result.totals().visits, 8);
/// assert!(result.savings().km_saved >= 0.0);
/// ```
pub fn optimize(
    practitioners: &[Practitioner],
    criteria: &OptimizationCriteria,
    start_date: NaiveDate,
) -> Result<OptimizationResult, OptimizeError> {
    optimize_with_progress(practitioners, criteria, start_date, &mut never_cancel)
}

/// [`optimize`], reporting each phase to `observer` before it starts.
///
/// # Errors
///
/// As [`optimize`], plus [`OptimizeError::Cancelled`] when the observer
/// breaks.
pub fn optimize_with_progress<P>(
    practitioners: &[Practitioner],
    criteria: &OptimizationCriteria,
    start_date: NaiveDate,
    observer: &mut P,
) -> Result<OptimizationResult, OptimizeError>
where
    P: ProgressObserver + ?Sized,
{
    criteria.validate()?;
    ensure_unique(practitioners.iter().map(Practitioner::id))?;

    checkpoint(observer, Phase::ResolveCoordinates)?;
    let selected: Vec<SelectedPractitioner> =
        practitioners.iter().map(SelectedPractitioner::resolve).collect();

    run_pipeline(&selected, criteria, start_date, observer)
}

/// Plans the practitioners flagged `selected`, using their already resolved
/// locations.
///
/// # Errors
///
/// As [`optimize_with_progress`].
pub fn optimize_selection<P>(
    selection: &[SelectedPractitioner],
    criteria: &OptimizationCriteria,
    start_date: NaiveDate,
    observer: &mut P,
) -> Result<OptimizationResult, OptimizeError>
where
    P: ProgressObserver + ?Sized,
{
    criteria.validate()?;
    let selected: Vec<SelectedPractitioner> =
        selection.iter().filter(|s| s.selected).cloned().collect();
    ensure_unique(selected.iter().map(SelectedPractitioner::id))?;

    checkpoint(observer, Phase::ResolveCoordinates)?;
    run_pipeline(&selected, criteria, start_date, observer)
}

fn run_pipeline<P>(
    selected: &[SelectedPractitioner],
    criteria: &OptimizationCriteria,
    start_date: NaiveDate,
    observer: &mut P,
) -> Result<OptimizationResult, OptimizeError>
where
    P: ProgressObserver + ?Sized,
{
    if selected.is_empty() {
        debug!("empty selection, nothing to plan");
        return Ok(OptimizationResult::empty(criteria.clone(), start_date));
    }
    let start = criteria.start.resolve();
    let max_per_day = criteria.max_visits_per_day as usize;

    checkpoint(observer, Phase::DistanceMatrix)?;
    let distances = selection_matrix(selected, start);

    checkpoint(observer, Phase::Clustering)?;
    let chunks = cluster_tour(&distances, max_per_day);
    debug!(practitioners = selected.len(), days = chunks.len(), "clustered selection");

    checkpoint(observer, Phase::LocalSearch)?;
    let clusters: Vec<DayCluster> = chunks
        .iter()
        .map(|chunk| {
            let (route, dist) = optimize_day(chunk, &distances);
            to_cluster(selected, &route, dist)
        })
        .collect();

    checkpoint(observer, Phase::Schedule)?;
    let result = materialize_schedule(clusters, selected, start, criteria, start_date);

    info!(
        days = result.totals().days,
        visits = result.totals().visits,
        distance_km = result.totals().distance_km,
        km_saved = result.savings().km_saved,
        objective = %criteria.optimize_for,
        "optimized territory plan"
    );
    Ok(result)
}

/// Orders the clusters, assigns working days, walks each day's timeline,
/// and compares against the original-order baseline of `selection`.
pub fn materialize_schedule(
    clusters: Vec<DayCluster>,
    selection: &[SelectedPractitioner],
    start: GeoPoint,
    criteria: &OptimizationCriteria,
    start_date: NaiveDate,
) -> OptimizationResult {
    let day_size = balanced_day_size(selection.len(), criteria.max_visits_per_day as usize);
    let baseline = baseline_for(selection, start, day_size);

    let ordered = order_days(clusters, start, criteria);
    let dates = working_days(start_date, ordered.len());
    let days = ordered
        .into_iter()
        .zip(dates)
        .enumerate()
        .map(|(index, (cluster, date))| {
            let timeline = recompute_day_times(cluster.stops(), start, criteria.visit_duration_minutes);
            OptimizedDay::new(index, date, timeline)
        })
        .collect();

    OptimizationResult::new(days, baseline, criteria.clone(), start_date)
}

fn checkpoint<P>(observer: &mut P, phase: Phase) -> Result<(), OptimizeError>
where
    P: ProgressObserver + ?Sized,
{
    match observer.on_phase(phase) {
        ControlFlow::Continue(()) => Ok(()),
        ControlFlow::Break(()) => {
            debug!(%phase, "optimization cancelled");
            Err(OptimizeError::Cancelled(phase))
        }
    }
}

fn ensure_unique<'a>(ids: impl Iterator<Item = &'a str>) -> Result<(), OptimizeError> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(OptimizeError::DuplicatePractitioner(id.to_string()));
        }
    }
    Ok(())
}
