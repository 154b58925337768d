//! Flat visit records and JSON serialization of a plan.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::models::OptimizationResult;

/// One planned visit as stored by the visit log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisitRecord {
    pub practitioner_id: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
}

/// Every visit of the plan, day by day in visiting order.
pub fn visit_records(result: &OptimizationResult) -> Vec<VisitRecord> {
    result
        .days()
        .iter()
        .flat_map(|day| {
            day.visits().iter().map(move |v| {
                let starts = v.starts_at(day.date());
                VisitRecord {
                    practitioner_id: v.stop.id().to_string(),
                    date: starts.date(),
                    time: starts.time(),
                }
            })
        })
        .collect()
}

/// Pretty-printed JSON of the whole result.
///
/// # Errors
///
/// Propagates serialization failures from `serde_json`.
pub fn to_json(result: &OptimizationResult) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(result)
}
