//! Outage time windows.

use std::sync::LazyLock;

use chrono::{Days, NaiveDate, NaiveDateTime, NaiveTime};
use regex::Regex;

/// `10:00 - 18:00`, `from 10:00 to 18:00`, `10:00-დან 18:00-მდე`.
static TIME_RANGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b([0-9]{1,2}):([0-9]{2})\s*(?:-\s*დან|-|–|—|to)\s*([0-9]{1,2}):([0-9]{2})")
        .unwrap_or_else(|e| panic!("time range pattern must compile: {e}"))
});

/// Start and end of an outage announced for `date`.
///
/// Without a recognisable time range the outage starts at midnight and has
/// no announced end. A range ending before it starts runs past midnight.
pub fn parse_time_range(text: &str, date: NaiveDate) -> (Option<NaiveDateTime>, Option<NaiveDateTime>) {
    let midnight = (date.and_hms_opt(0, 0, 0), None);

    let Some(caps) = TIME_RANGE.captures(text) else {
        return midnight;
    };
    let time = |h: usize, m: usize| -> Option<NaiveTime> {
        let hour = caps.get(h)?.as_str().parse().ok()?;
        let minute = caps.get(m)?.as_str().parse().ok()?;
        NaiveTime::from_hms_opt(hour, minute, 0)
    };
    let (Some(from), Some(to)) = (time(1, 2), time(3, 4)) else {
        return midnight;
    };

    let start = date.and_time(from);
    let end_date = if to < from {
        date.checked_add_days(Days::new(1)).unwrap_or(date)
    } else {
        date
    };
    (Some(start), Some(end_date.and_time(to)))
}
