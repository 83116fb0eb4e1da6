//! Hour aggregation for the chart view.
//!
//! A bucket is a local-time window `[start 00:00:00, end 23:59:59]`: one day
//! of a month, or a whole month (1st .. last day) of a year. A record counts
//! toward a bucket only when it lies fully inside it, and contributes its
//! duration rounded up to whole hours.

use crate::errors::{AppError, AppResult};
use crate::models::chart::{
    CHART_TITLE, ChartData, ChartMode, ChartRequest, MONTH_NAMES, SERIES_LABEL, Series,
};
use crate::models::record::TimeRecord;
use crate::utils::date::days_in_month;
use chrono::{NaiveDate, NaiveDateTime};

/// One chart bucket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bucket {
    pub label: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

fn day_bounds(first: NaiveDate, last: NaiveDate) -> AppResult<(NaiveDateTime, NaiveDateTime)> {
    let start = first.and_hms_opt(0, 0, 0);
    let end = last.and_hms_opt(23, 59, 59);
    start
        .zip(end)
        .ok_or_else(|| AppError::Other(format!("no bucket bounds for {first}..{last}")))
}

fn date(year: i32, month0: u32, day: u32) -> AppResult<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month0 + 1, day).ok_or(AppError::InvalidYear(year))
}

/// Buckets for `req`, in display order.
pub fn buckets(req: ChartRequest) -> AppResult<Vec<Bucket>> {
    match req.mode {
        ChartMode::Days => {
            if req.month >= 12 {
                return Err(AppError::InvalidMonth(req.month + 1));
            }
            let month_name = MONTH_NAMES[req.month as usize];
            let n = days_in_month(req.year, req.month + 1).ok_or(AppError::InvalidYear(req.year))?;

            (1..=n)
                .map(|day| -> AppResult<Bucket> {
                    let d = date(req.year, req.month, day)?;
                    let (start, end) = day_bounds(d, d)?;
                    Ok(Bucket {
                        label: format!("{} {}", day, month_name),
                        start,
                        end,
                    })
                })
                .collect()
        }
        ChartMode::Months => (0..12u32)
            .map(|month0| -> AppResult<Bucket> {
                let n = days_in_month(req.year, month0 + 1)
                    .ok_or(AppError::InvalidYear(req.year))?;
                let (start, end) =
                    day_bounds(date(req.year, month0, 1)?, date(req.year, month0, n)?)?;
                Ok(Bucket {
                    label: MONTH_NAMES[month0 as usize].to_string(),
                    start,
                    end,
                })
            })
            .collect(),
    }
}

/// Sum of ceil-hours of the closed records fully inside `[start, end]`.
pub fn hours_in_window<'a, I>(records: I, start: NaiveDateTime, end: NaiveDateTime) -> i64
where
    I: IntoIterator<Item = &'a TimeRecord>,
{
    records
        .into_iter()
        .filter_map(|r| r.end_time.map(|e| (r, e)))
        .filter(|(r, e)| start <= r.start_time.naive_local() && e.naive_local() <= end)
        .filter_map(|(r, _)| r.ceil_hours())
        .sum()
}

pub fn aggregate<'a, I>(records: I, req: ChartRequest) -> AppResult<ChartData>
where
    I: IntoIterator<Item = &'a TimeRecord>,
{
    let records: Vec<&TimeRecord> = records.into_iter().collect();
    let buckets = buckets(req)?;

    let data = buckets
        .iter()
        .map(|b| hours_in_window(records.iter().copied(), b.start, b.end))
        .collect();

    Ok(ChartData {
        title: CHART_TITLE.to_string(),
        labels: buckets.into_iter().map(|b| b.label).collect(),
        datasets: vec![Series {
            label: SERIES_LABEL.to_string(),
            data,
        }],
    })
}
