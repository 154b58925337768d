//! iCalendar (RFC 5545) export of an optimized plan.

use chrono::{NaiveDate, NaiveDateTime};

use crate::models::{OptimizationResult, ScheduledVisit};

const PRODUCT_ID: &str = "-//territory-routing//visit planner//FR";

/// One `VEVENT` per visit, with floating local times.
///
/// Output is deterministic: `DTSTAMP` is midnight UTC of the plan's start
/// date and `UID` is derived from the date and practitioner id.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use territory_routing::export::to_icalendar;
/// use territory_routing::models::{OptimizationCriteria, Practitioner};
/// use territory_routing::planning::optimize;
///
/// let monday = NaiveDate::from_ymd_opt(2024, 3, 4).unwrap();
/// let plan = optimize(
///     &[Practitioner::new("p1", "Martin", "Bron").with_title("Dr")],
///     &OptimizationCriteria::default(),
///     monday,
/// ).unwrap();
///
/// let ics = to_icalendar(&plan);
/// assert!(ics.starts_with("BEGIN:VCALENDAR\r\n"));
/// assert!(ics.contains("SUMMARY:Visite Dr Martin\r\n"));
/// assert_eq!(ics.matches("BEGIN:VEVENT").count(), 1);
/// ```
pub fn to_icalendar(result: &OptimizationResult) -> String {
    let mut out = String::new();
    push_line(&mut out, "BEGIN:VCALENDAR");
    push_line(&mut out, "VERSION:2.0");
    push_line(&mut out, &format!("PRODID:{PRODUCT_ID}"));
    push_line(&mut out, "CALSCALE:GREGORIAN");

    let stamp = format!("{}T000000Z", ics_date(result.start_date()));
    for day in result.days() {
        for visit in day.visits() {
            write_event(&mut out, day.date(), visit, &stamp);
        }
    }

    push_line(&mut out, "END:VCALENDAR");
    out
}

fn write_event(out: &mut String, date: NaiveDate, visit: &ScheduledVisit, stamp: &str) {
    let practitioner = &visit.stop.practitioner;
    push_line(out, "BEGIN:VEVENT");
    push_line(out, &format!("UID:{}-{}@territory-routing", ics_date(date), escape_text(practitioner.id())));
    push_line(out, &format!("DTSTAMP:{stamp}"));
    push_line(out, &format!("DTSTART:{}", ics_date_time(visit.starts_at(date))));
    push_line(out, &format!("DTEND:{}", ics_date_time(visit.ends_at(date))));
    push_line(out, &format!("SUMMARY:Visite {}", escape_text(&practitioner.display_name())));
    push_line(out, &format!("LOCATION:{}", escape_text(practitioner.city())));
    if !practitioner.specialty().is_empty() {
        push_line(out, &format!("DESCRIPTION:{}", escape_text(practitioner.specialty())));
    }
    push_line(out, "END:VEVENT");
}

/// Appends a content line, folded at 75 octets, with CRLF.
fn push_line(out: &mut String, line: &str) {
    let mut width = 0;
    for ch in line.chars() {
        let len = ch.len_utf8();
        if width + len > 75 {
            out.push_str("\r\n ");
            width = 1;
        }
        out.push(ch);
        width += len;
    }
    out.push_str("\r\n");
}

fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            ';' => out.push_str("\\;"),
            ',' => out.push_str("\\,"),
            '\n' => out.push_str("\\n"),
            '\r' => {}
            _ => out.push(ch),
        }
    }
    out
}

fn ics_date(date: NaiveDate) -> String {
    date.format("%Y%m%d").to_string()
}

fn ics_date_time(at: NaiveDateTime) -> String {
    at.format("%Y%m%dT%H%M%S").to_string()
}
