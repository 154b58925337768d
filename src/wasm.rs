//! JavaScript bindings for the browser dashboard.

use chrono::NaiveDate;
use wasm_bindgen::prelude::*;

use crate::models::{OptimizationCriteria, Practitioner};
use crate::planning::optimize;

/// `optimizeRoute(practitioners, criteria, startDate)`.
///
/// `practitioners` is an array of practitioner objects (camelCase fields),
/// `criteria` an optimization criteria object (missing fields take their
/// defaults), and `startDate` an ISO `YYYY-MM-DD` string. Returns the
/// optimization result as a plain object.
#[wasm_bindgen(js_name = optimizeRoute)]
pub fn optimize_route(
    practitioners: JsValue,
    criteria: JsValue,
    start_date: &str,
) -> Result<JsValue, JsValue> {
    let practitioners: Vec<Practitioner> = serde_wasm_bindgen::from_value(practitioners)
        .map_err(|e| js_error(&format!("invalid practitioners: {e}")))?;
    let criteria: OptimizationCriteria = if criteria.is_undefined() || criteria.is_null() {
        OptimizationCriteria::default()
    } else {
        serde_wasm_bindgen::from_value(criteria)
            .map_err(|e| js_error(&format!("invalid criteria: {e}")))?
    };
    let start_date = NaiveDate::parse_from_str(start_date, "%Y-%m-%d")
        .map_err(|e| js_error(&format!("invalid start date: {e}")))?;

    let result = optimize(&practitioners, &criteria, start_date).map_err(|e| js_error(&e.to_string()))?;
    serde_wasm_bindgen::to_value(&result).map_err(|e| js_error(&e.to_string()))
}

fn js_error(message: &str) -> JsValue {
    js_sys::Error::new(message).into()
}
