//! Serializations of an optimized plan for calendars, the visit log, and
//! the map view.
//!
//! - [`to_icalendar`]: RFC 5545 calendar, one event per visit
//! - [`visit_records`] / [`to_json`]: flat records and full JSON
//! - [`day_polyline`]: Google encoded polyline of a day's round trip

mod ics;
mod polyline;
mod records;

pub use ics::to_icalendar;
pub use polyline::{day_polyline, decode_polyline, encode_polyline};
pub use records::{to_json, visit_records, VisitRecord};
