use clap::ValueEnum;
use serde::{Deserialize, Serialize};

pub const CHART_TITLE: &str = "Working Hours Diagram";
pub const SERIES_LABEL: &str = "Hours";

pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Chart bucketing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ChartMode {
    /// One bucket per day of the selected month
    Days,
    /// One bucket per month of the selected year
    Months,
}

impl ChartMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChartMode::Days => "days",
            ChartMode::Months => "months",
        }
    }
}

/// What to aggregate. `month` is zero-based (0 = January).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartRequest {
    pub mode: ChartMode,
    pub month: u32,
    pub year: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Series {
    pub label: String,
    pub data: Vec<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartData {
    pub title: String,
    pub labels: Vec<String>,
    pub datasets: Vec<Series>,
}

impl ChartData {
    /// The single "Hours" series.
    pub fn hours(&self) -> &[i64] {
        self.datasets
            .first()
            .map(|s| s.data.as_slice())
            .unwrap_or(&[])
    }

    pub fn total_hours(&self) -> i64 {
        self.hours().iter().sum()
    }
}
