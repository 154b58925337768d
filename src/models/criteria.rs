//! Optimization criteria: objective, daily cap, visit duration, start point.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::GeoPoint;
use crate::error::{ConfigError, OptimizeError};
use crate::geocode::CityTable;

/// Largest accepted visits-per-day cap.
pub const MAX_VISITS_PER_DAY_LIMIT: u32 = 20;

/// Longest accepted fixed visit duration, in minutes.
pub const MAX_VISIT_DURATION_MINUTES: u32 = 480;

/// Strategy used to order the day clusters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Objective {
    /// Weighted mix of KOL density and volume share.
    #[default]
    Balanced,
    /// Closest days first.
    Time,
    /// Days with the most KOLs first.
    KolFirst,
    /// Days with the most volume first.
    Volume,
    /// Closest days first.
    Distance,
}

impl fmt::Display for Objective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Balanced => "balanced",
            Self::Time => "time",
            Self::KolFirst => "kol-first",
            Self::Volume => "volume",
            Self::Distance => "distance",
        };
        f.write_str(name)
    }
}

/// Where each working day starts and ends.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StartLocation {
    /// A city name resolved through the city table, without jitter.
    City(String),
    /// An explicit coordinate.
    Point(GeoPoint),
}

impl Default for StartLocation {
    fn default() -> Self {
        Self::City("Lyon".to_string())
    }
}

impl StartLocation {
    /// Resolves the start location to a coordinate. Unknown cities fall back
    /// to the default metropolitan coordinate.
    pub fn resolve(&self) -> GeoPoint {
        match self {
            Self::City(name) => CityTable::french().resolve(name).point(),
            Self::Point(point) => *point,
        }
    }
}

/// User-chosen knobs for one optimization run.
///
/// Deserializes from the dashboard's camelCase payload; every field has a
/// default.
///
/// # Examples
///
/// ```
/// use territory_routing::models::{Objective, OptimizationCriteria};
///
/// let criteria = OptimizationCriteria::default()
///     .with_objective(Objective::KolFirst)
///     .with_max_visits_per_day(5);
/// assert_eq!(criteria.max_visits_per_day, 5);
/// assert!(criteria.validate().is_ok());
///
/// let parsed = OptimizationCriteria::from_json(r#"{"optimizeFor": "volume"}"#).unwrap();
/// assert_eq!(parsed.optimize_for, Objective::Volume);
/// assert_eq!(parsed.max_visits_per_day, 6);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizationCriteria {
    #[serde(default)]
    pub optimize_for: Objective,
    #[serde(default = "default_max_visits_per_day")]
    pub max_visits_per_day: u32,
    #[serde(default = "default_visit_duration_minutes")]
    pub visit_duration_minutes: u32,
    #[serde(default)]
    pub prioritize_kol: bool,
    #[serde(default)]
    pub prioritize_at_risk: bool,
    #[serde(default)]
    pub start: StartLocation,
}

fn default_max_visits_per_day() -> u32 {
    6
}

fn default_visit_duration_minutes() -> u32 {
    30
}

impl Default for OptimizationCriteria {
    fn default() -> Self {
        Self {
            optimize_for: Objective::default(),
            max_visits_per_day: default_max_visits_per_day(),
            visit_duration_minutes: default_visit_duration_minutes(),
            prioritize_kol: false,
            prioritize_at_risk: false,
            start: StartLocation::default(),
        }
    }
}

impl OptimizationCriteria {
    pub fn with_objective(mut self, objective: Objective) -> Self {
        self.optimize_for = objective;
        self
    }

    pub fn with_max_visits_per_day(mut self, max: u32) -> Self {
        self.max_visits_per_day = max;
        self
    }

    pub fn with_visit_duration(mut self, minutes: u32) -> Self {
        self.visit_duration_minutes = minutes;
        self
    }

    pub fn with_prioritize_kol(mut self, on: bool) -> Self {
        self.prioritize_kol = on;
        self
    }

    pub fn with_prioritize_at_risk(mut self, on: bool) -> Self {
        self.prioritize_at_risk = on;
        self
    }

    pub fn with_start(mut self, start: StartLocation) -> Self {
        self.start = start;
        self
    }

    /// Checks the numeric knobs before any clustering happens.
    pub fn validate(&self) -> Result<(), OptimizeError> {
        if self.max_visits_per_day == 0 || self.max_visits_per_day > MAX_VISITS_PER_DAY_LIMIT {
            return Err(OptimizeError::InvalidMaxVisitsPerDay {
                value: self.max_visits_per_day,
                max: MAX_VISITS_PER_DAY_LIMIT,
            });
        }
        if self.visit_duration_minutes == 0
            || self.visit_duration_minutes > MAX_VISIT_DURATION_MINUTES
        {
            return Err(OptimizeError::InvalidVisitDuration {
                value: self.visit_duration_minutes,
                max: MAX_VISIT_DURATION_MINUTES,
            });
        }
        Ok(())
    }

    /// Parses and validates criteria from a JSON payload.
    pub fn from_json(payload: &str) -> Result<Self, ConfigError> {
        let criteria: Self = serde_json::from_str(payload)?;
        criteria.validate()?;
        Ok(criteria)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let c = OptimizationCriteria::default();
        assert_eq!(c.optimize_for, Objective::Balanced);
        assert_eq!(c.max_visits_per_day, 6);
        assert_eq!(c.visit_duration_minutes, 30);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn test_zero_max_visits_rejected() {
        let c = OptimizationCriteria::default().with_max_visits_per_day(0);
        assert_eq!(
            c.validate(),
            Err(OptimizeError::InvalidMaxVisitsPerDay {
                value: 0,
                max: MAX_VISITS_PER_DAY_LIMIT
            })
        );
    }

    #[test]
    fn test_oversized_max_visits_rejected() {
        let c = OptimizationCriteria::default().with_max_visits_per_day(21);
        assert!(matches!(
            c.validate(),
            Err(OptimizeError::InvalidMaxVisitsPerDay { value: 21, .. })
        ));
    }

    #[test]
    fn test_zero_visit_duration_rejected() {
        let c = OptimizationCriteria::default().with_visit_duration(0);
        assert!(matches!(
            c.validate(),
            Err(OptimizeError::InvalidVisitDuration { value: 0, .. })
        ));
    }

    #[test]
    fn test_objective_kebab_case() {
        let o: Objective = serde_json::from_str("\"kol-first\"").expect("valid");
        assert_eq!(o, Objective::KolFirst);
        assert_eq!(o.to_string(), "kol-first");
        assert_eq!(serde_json::to_string(&Objective::Volume).expect("ser"), "\"volume\"");
    }

    #[test]
    fn test_from_json_full() {
        let json = r#"{
            "optimizeFor": "distance",
            "maxVisitsPerDay": 4,
            "visitDurationMinutes": 45,
            "prioritizeKol": true,
            "prioritizeAtRisk": true,
            "start": {"point": {"lat": 45.75, "lng": 4.85}}
        }"#;
        let c = OptimizationCriteria::from_json(json).expect("valid");
        assert_eq!(c.optimize_for, Objective::Distance);
        assert_eq!(c.max_visits_per_day, 4);
        assert_eq!(c.visit_duration_minutes, 45);
        assert!(c.prioritize_kol && c.prioritize_at_risk);
        assert_eq!(c.start, StartLocation::Point(GeoPoint::new(45.75, 4.85)));
    }

    #[test]
    fn test_from_json_rejects_invalid_cap() {
        let err = OptimizationCriteria::from_json(r#"{"maxVisitsPerDay": 0}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_from_json_rejects_negative_cap() {
        let err = OptimizationCriteria::from_json(r#"{"maxVisitsPerDay": -3}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }

    #[test]
    fn test_start_city_resolves_without_jitter() {
        let start = StartLocation::City("Lyon".into()).resolve();
        let again = StartLocation::City("LYON".into()).resolve();
        assert_eq!(start, again);
    }
}
