use chrono::{NaiveDate, TimeZone};

use crate::types::{Forecast, Weather};

/// Group entries into calendar days as seen in `tz`.
///
/// A new bucket starts whenever an entry's date differs from the previous
/// entry's, so source order is kept both across and within buckets.
pub fn group_by_day<Tz: TimeZone>(entries: Vec<Weather>, tz: &Tz) -> Forecast {
    let mut days: Forecast = Vec::new();
    let mut current_day: Option<NaiveDate> = None;

    for entry in entries {
        let day = entry.date.with_timezone(tz).date_naive();
        match days.last_mut() {
            Some(bucket) if current_day == Some(day) => bucket.push(entry),
            _ => {
                current_day = Some(day);
                days.push(vec![entry]);
            }
        }
    }

    days
}

/// Map a UV index value to its risk bucket.
///
/// | value   | level |
/// |---------|-------|
/// | < 3     | 0     |
/// | 3 - 6   | 1     |
/// | 6 - 8   | 2     |
/// | 8 - 11  | 3     |
/// | >= 11   | 4     |
///
/// NaN falls into level 0.
pub fn risk_level(value: f64) -> u8 {
    if value >= 11.0 {
        4
    } else if value >= 8.0 {
        3
    } else if value >= 6.0 {
        2
    } else if value >= 3.0 {
        1
    } else {
        0
    }
}
