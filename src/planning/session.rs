//! A planning session holding the latest result.

use chrono::NaiveDate;
use tracing::warn;

use super::{never_cancel, optimize_with_progress, ProgressObserver};
use crate::error::OptimizeError;
use crate::models::{OptimizationCriteria, OptimizationResult, Practitioner};

/// Keeps the most recent successful [`OptimizationResult`].
///
/// Each run replaces the stored result wholesale. A failed or cancelled
/// run leaves the previous result in place.
#[derive(Debug, Clone, Default)]
pub struct PlanSession {
    current: Option<OptimizationResult>,
}

impl PlanSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// The latest successful result, if any.
    pub fn current(&self) -> Option<&OptimizationResult> {
        self.current.as_ref()
    }

    /// Runs a new optimization and stores its result.
    ///
    /// # Errors
    ///
    /// See [`optimize_with_progress`](super::optimize_with_progress).
    pub fn run(
        &mut self,
        practitioners: &[Practitioner],
        criteria: &OptimizationCriteria,
        start_date: NaiveDate,
    ) -> Result<&OptimizationResult, OptimizeError> {
        self.run_with_progress(practitioners, criteria, start_date, &mut never_cancel)
    }

    /// [`PlanSession::run`] with phase reporting and cancellation.
    ///
    /// # Errors
    ///
    /// See [`optimize_with_progress`](super::optimize_with_progress).
    pub fn run_with_progress<P>(
        &mut self,
        practitioners: &[Practitioner],
        criteria: &OptimizationCriteria,
        start_date: NaiveDate,
        observer: &mut P,
    ) -> Result<&OptimizationResult, OptimizeError>
    where
        P: ProgressObserver + ?Sized,
    {
        match optimize_with_progress(practitioners, criteria, start_date, observer) {
            Ok(result) => Ok(self.current.insert(result)),
            Err(err) => {
                warn!(error = %err, "optimization failed, keeping previous plan");
                Err(err)
            }
        }
    }

    /// Discards the stored result.
    pub fn clear(&mut self) {
        self.current = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ops::ControlFlow;

    use crate::planning::Phase;

    fn monday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 4).expect("valid date")
    }

    fn practitioners() -> Vec<Practitioner> {
        vec![
            Practitioner::new("a", "Martin", "Villeurbanne"),
            Practitioner::new("b", "Bernard", "Bron"),
            Practitioner::new("c", "Durand", "Caluire-et-Cuire"),
        ]
    }

    #[test]
    fn test_new_session_is_empty() {
        assert!(PlanSession::new().current().is_none());
    }

    #[test]
    fn test_run_stores_result() {
        let mut session = PlanSession::new();
        let visits = session
            .run(&practitioners(), &OptimizationCriteria::default(), monday())
            .expect("valid")
            .totals()
            .visits;
        assert_eq!(visits, 3);
        assert!(session.current().is_some());
    }

    #[test]
    fn test_failure_keeps_previous() {
        let mut session = PlanSession::new();
        session
            .run(&practitioners(), &OptimizationCriteria::default(), monday())
            .expect("valid");
        let before = session.current().cloned();

        let bad = OptimizationCriteria::default().with_visit_duration(0);
        assert!(session.run(&practitioners(), &bad, monday()).is_err());
        assert_eq!(session.current().cloned(), before);
    }

    #[test]
    fn test_cancel_keeps_previous() {
        let mut session = PlanSession::new();
        session
            .run(&practitioners(), &OptimizationCriteria::default(), monday())
            .expect("valid");
        let before = session.current().cloned();

        let criteria = OptimizationCriteria::default().with_max_visits_per_day(1);
        let err = session
            .run_with_progress(&practitioners(), &criteria, monday(), &mut |_: Phase| ControlFlow::<()>::Break(()))
            .unwrap_err();
        assert_eq!(err, OptimizeError::Cancelled(Phase::ResolveCoordinates));
        assert_eq!(session.current().cloned(), before);
    }

    #[test]
    fn test_rerun_replaces_result() {
        let mut session = PlanSession::new();
        session
            .run(&practitioners(), &OptimizationCriteria::default(), monday())
            .expect("valid");
        let criteria = OptimizationCriteria::default().with_max_visits_per_day(1);
        session.run(&practitioners(), &criteria, monday()).expect("valid");
        assert_eq!(session.current().map(|r| r.days().len()), Some(3));

        session.clear();
        assert!(session.current().is_none());
    }
}
