use chrono::{DateTime, Duration, Local};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One work session.
///
/// This is also the persisted projection: exactly `{id, start_time, end_time}`
/// with `end_time = null` while the timer is running.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRecord {
    pub id: Uuid,
    pub start_time: DateTime<Local>,
    #[serde(default)]
    pub end_time: Option<DateTime<Local>>,
}

impl TimeRecord {
    /// Open record, i.e. a running timer.
    pub fn open(start_time: DateTime<Local>) -> Self {
        Self {
            id: Uuid::new_v4(),
            start_time,
            end_time: None,
        }
    }

    pub fn closed(start_time: DateTime<Local>, end_time: DateTime<Local>) -> Self {
        Self {
            id: Uuid::new_v4(),
            start_time,
            end_time: Some(end_time),
        }
    }

    pub fn is_open(&self) -> bool {
        self.end_time.is_none()
    }

    pub fn is_closed(&self) -> bool {
        self.end_time.is_some()
    }

    /// Elapsed time; `None` while still running.
    pub fn duration(&self) -> Option<Duration> {
        self.end_time.map(|end| end - self.start_time)
    }

    /// Hours counted by the chart: the duration rounded up to a whole hour.
    pub fn ceil_hours(&self) -> Option<i64> {
        self.duration().map(|d| ceil_hours(d.num_milliseconds()))
    }

    /// First 8 hex chars of the id, as shown in tables.
    pub fn short_id(&self) -> String {
        short_id(&self.id)
    }
}

pub fn short_id(id: &Uuid) -> String {
    let mut s = id.simple().to_string();
    s.truncate(8);
    s
}

/// ceil(ms / 1h), also for negative inputs.
pub fn ceil_hours(ms: i64) -> i64 {
    const HOUR_MS: i64 = 60 * 60 * 1000;
    -((-ms).div_euclid(HOUR_MS))
}

/// Outcome of a start/stop toggle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimerEvent {
    Started(TimeRecord),
    Stopped(TimeRecord),
}

impl TimerEvent {
    pub fn record(&self) -> &TimeRecord {
        match self {
            TimerEvent::Started(r) | TimerEvent::Stopped(r) => r,
        }
    }
}
