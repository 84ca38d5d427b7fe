//! Pure date helpers shared by the bucketer and the grid builder.

use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, Utc, Weekday};

use super::error::{CalendarError, Result};

/// Textual format of `read_at` timestamps, e.g. `Tue Mar 02 14:05:00 -0800 2021`.
pub const READ_AT_FORMAT: &str = "%a %b %d %H:%M:%S %z %Y";

/// `READ_AT_FORMAT` without the leading weekday name.
const READ_AT_DATE_FORMAT: &str = "%b %d %H:%M:%S %z %Y";

/// Format used for day keys, e.g. `2021-03-02`.
pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

/// Parses a `read_at` timestamp.
///
/// The weekday name must be a valid day name but is not checked against the
/// date: `Mon Mar 02 14:05:00 -0800 2021` parses as Tuesday, March 2nd.
pub fn parse_read_at(value: &str) -> Result<DateTime<FixedOffset>> {
    let malformed = |reason: String| CalendarError::MalformedDate {
        value: value.to_string(),
        reason,
    };

    let (weekday, rest) = value
        .trim()
        .split_once(' ')
        .ok_or_else(|| malformed("missing weekday".to_string()))?;

    weekday
        .parse::<Weekday>()
        .map_err(|_| malformed(format!("invalid weekday {weekday:?}")))?;

    DateTime::parse_from_str(rest.trim_start(), READ_AT_DATE_FORMAT)
        .map_err(|e| malformed(e.to_string()))
}

/// Formats a timestamp the way the reading API does.
pub fn format_read_at(timestamp: &DateTime<FixedOffset>) -> String {
    timestamp.format(READ_AT_FORMAT).to_string()
}

/// Returns the UTC calendar day of a timestamp.
pub fn read_day(timestamp: DateTime<FixedOffset>) -> NaiveDate {
    timestamp.with_timezone(&Utc).date_naive()
}

/// Returns the ISO day key for a date.
pub fn iso_date(date: NaiveDate) -> String {
    date.format(ISO_DATE_FORMAT).to_string()
}

/// Parses an ISO day key.
pub fn parse_iso_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, ISO_DATE_FORMAT).ok()
}

/// Returns the first day of the month containing `date`.
pub fn start_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// Returns the last day of the month containing `date`.
pub fn end_of_month(date: NaiveDate) -> NaiveDate {
    let (year, month) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };

    NaiveDate::from_ymd_opt(year, month, 1)
        .and_then(|next| next.pred_opt())
        .unwrap_or(date)
}

/// Number of whole days from `start` to `end`, inclusive of both ends.
pub fn days_inclusive(start: NaiveDate, end: NaiveDate) -> i64 {
    (end - start).num_days() + 1
}
