use crate::errors::{AppError, AppResult};
use chrono::{DateTime, Datelike, Local, NaiveDate, NaiveDateTime, TimeZone};

/// Inputs accepted wherever a timestamp is typed in.
const INPUT_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%dT%H:%M:%S",
];

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Parse a local timestamp: `YYYY-MM-DD HH:MM[:SS]`, the `T`-separated
/// variants, RFC 3339 (converted to local time) or `now`.
pub fn parse_datetime(s: &str) -> AppResult<DateTime<Local>> {
    let s = s.trim();

    if s.eq_ignore_ascii_case("now") {
        return Ok(Local::now());
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Local));
    }

    INPUT_FORMATS
        .iter()
        .find_map(|f| NaiveDateTime::parse_from_str(s, f).ok())
        .and_then(local_from_naive)
        .ok_or_else(|| AppError::InvalidDateTime(s.to_string()))
}

/// Local wall-clock time to an instant. Ambiguous times (DST fold) take the
/// earlier one; times inside a DST gap are rejected.
pub fn local_from_naive(naive: NaiveDateTime) -> Option<DateTime<Local>> {
    Local.from_local_datetime(&naive).earliest()
}

/// Number of days of a 1-based month.
pub fn days_in_month(year: i32, month: u32) -> Option<u32> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    u32::try_from((next - first).num_days()).ok()
}

pub fn current_year() -> i32 {
    today().year()
}

/// Zero-based month of today.
pub fn current_month0() -> u32 {
    today().month0()
}
