//! Working-day calendar (Monday to Friday).

use chrono::{Datelike, NaiveDate, Weekday};

/// Returns `true` for Monday through Friday.
pub fn is_working_day(date: NaiveDate) -> bool {
    !matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// The first working day on or after `date`.
pub fn next_working_day(date: NaiveDate) -> NaiveDate {
    let mut day = date;
    while !is_working_day(day) {
        match day.succ_opt() {
            Some(next) => day = next,
            None => break,
        }
    }
    day
}

/// `count` successive working days, starting with the first working day on
/// or after `start`.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use territory_routing::planning::working_days;
///
/// // Friday 2024-03-08 → Fri, Mon, Tue
/// let start = NaiveDate::from_ymd_opt(2024, 3, 8).unwrap();
/// let days = working_days(start, 3);
/// assert_eq!(days, vec![
///     NaiveDate::from_ymd_opt(2024, 3, 8).unwrap(),
///     NaiveDate::from_ymd_opt(2024, 3, 11).unwrap(),
///     NaiveDate::from_ymd_opt(2024, 3, 12).unwrap(),
/// ]);
/// ```
pub fn working_days(start: NaiveDate, count: usize) -> Vec<NaiveDate> {
    let mut dates = Vec::with_capacity(count);
    let mut day = next_working_day(start);
    for _ in 0..count {
        dates.push(day);
        // Past the last representable date every remaining day repeats it.
        day = day.succ_opt().map_or(day, next_working_day);
    }
    dates
}
