//! Error types.

use thiserror::Error;

use crate::planning::Phase;

/// Errors that abort an optimization run before a result is produced.
///
/// A failed run never yields a partial result.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OptimizeError {
    /// The visits-per-day cap is outside the accepted range.
    #[error("max visits per day must be between 1 and {max}, got {value}")]
    InvalidMaxVisitsPerDay { value: u32, max: u32 },

    /// The fixed visit duration is outside the accepted range.
    #[error("visit duration must be between 1 and {max} minutes, got {value}")]
    InvalidVisitDuration { value: u32, max: u32 },

    /// The same practitioner id was selected twice.
    #[error("practitioner {0} appears more than once in the selection")]
    DuplicatePractitioner(String),

    /// The progress observer cancelled the run before the given phase.
    #[error("optimization cancelled before phase {0}")]
    Cancelled(Phase),
}

/// Errors raised while reading optimization criteria from a payload.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed parsing criteria: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid criteria: {0}")]
    Invalid(#[from] OptimizeError),
}
