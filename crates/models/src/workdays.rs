use chrono::{Datelike, NaiveDate, Weekday};

/// Count working days in the inclusive range `start..=end`.
///
/// A working day is any calendar day whose weekday is Monday through Friday.
/// No holiday calendar is applied. Returns 0 when `end < start`.
pub fn working_days(start: NaiveDate, end: NaiveDate) -> i64 {
    let mut count = 0;
    let mut current = start;
    while current <= end {
        if !matches!(current.weekday(), Weekday::Sat | Weekday::Sun) {
            count += 1;
        }
        current = match current.succ_opt() {
            Some(next) => next,
            None => break,
        };
    }
    count
}
