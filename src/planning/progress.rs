//! Pipeline phases and progress reporting between them.

use std::fmt;
use std::ops::ControlFlow;

use serde::{Deserialize, Serialize};

/// Stages of one optimization run, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Phase {
    ResolveCoordinates,
    DistanceMatrix,
    Clustering,
    LocalSearch,
    Schedule,
}

impl Phase {
    /// All phases in execution order.
    pub const ALL: [Phase; 5] = [
        Phase::ResolveCoordinates,
        Phase::DistanceMatrix,
        Phase::Clustering,
        Phase::LocalSearch,
        Phase::Schedule,
    ];

    /// 0-based position of the phase in [`Phase::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }

    /// Fraction of the run completed when this phase starts.
    pub fn progress(self) -> f64 {
        self.index() as f64 / Self::ALL.len() as f64
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::ResolveCoordinates => "resolve-coordinates",
            Self::DistanceMatrix => "distance-matrix",
            Self::Clustering => "clustering",
            Self::LocalSearch => "local-search",
            Self::Schedule => "schedule",
        };
        f.write_str(name)
    }
}

/// Receives a callback before each phase starts.
///
/// Returning [`ControlFlow::Break`] abandons the run before that phase;
/// phases themselves always run to completion.
pub trait ProgressObserver {
    fn on_phase(&mut self, phase: Phase) -> ControlFlow<()>;
}

impl<F> ProgressObserver for F
where
    F: FnMut(Phase) -> ControlFlow<()>,
{
    fn on_phase(&mut self, phase: Phase) -> ControlFlow<()> {
        self(phase)
    }
}

/// Observer that lets every phase run.
pub fn never_cancel(_phase: Phase) -> ControlFlow<()> {
    ControlFlow::Continue(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_order() {
        let indices: Vec<usize> = Phase::ALL.iter().map(|p| p.index()).collect();
        assert_eq!(indices, vec![0, 1, 2, 3, 4]);
        assert_eq!(Phase::ResolveCoordinates.progress(), 0.0);
        assert!((Phase::Schedule.progress() - 0.8).abs() < 1e-12);
    }

    #[test]
    fn test_phase_display() {
        assert_eq!(Phase::LocalSearch.to_string(), "local-search");
    }

    #[test]
    fn test_closure_observer() {
        let mut seen = Vec::new();
        let mut observer = |phase: Phase| {
            seen.push(phase);
            ControlFlow::Continue(())
        };
        assert_eq!(observer.on_phase(Phase::Clustering), ControlFlow::Continue(()));
        assert_eq!(seen, vec![Phase::Clustering]);
    }

    #[test]
    fn test_never_cancel() {
        for phase in Phase::ALL {
            assert_eq!(never_cancel.on_phase(phase), ControlFlow::Continue(()));
        }
    }
}
