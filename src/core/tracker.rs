//! The record store: an ordered in-memory list of [`TimeRecord`]s mirrored to
//! a [`KeyValueStore`] after every mutation.
//!
//! Storage layout:
//! - [`RECORDS_KEY`] holds a JSON array of `{id, start_time, end_time}`.
//! - [`ACTIVE_TIMER_KEY`] holds the id of the running timer, if any.
//!
//! Open records that are not owned by the active timer are stale and get
//! dropped on [`Tracker::load`].

use crate::core::chart;
use crate::core::pagination::{self, Page};
use crate::db::storage::KeyValueStore;
use crate::errors::{AppError, AppResult};
use crate::models::chart::{ChartData, ChartRequest};
use crate::models::record::{TimeRecord, TimerEvent};
use crate::models::record_field::RecordField;
use chrono::{DateTime, Local};
use serde_json::Value;
use std::collections::HashSet;
use uuid::Uuid;

pub const RECORDS_KEY: &str = "records";
pub const ACTIVE_TIMER_KEY: &str = "active_timer";

pub struct Tracker<S: KeyValueStore> {
    store: S,
    records: Vec<TimeRecord>,
    active: Option<Uuid>,
    pruned: usize,
}

/// Absent data, or anything that is not a JSON array, is an empty list.
/// Elements that do not parse as a record are skipped one by one.
fn read_records<S: KeyValueStore>(store: &S) -> AppResult<Vec<TimeRecord>> {
    let Some(raw) = store.get_item(RECORDS_KEY)? else {
        return Ok(Vec::new());
    };

    let items: Vec<Value> = serde_json::from_str(&raw).unwrap_or_default();
    let mut records: Vec<TimeRecord> = items
        .into_iter()
        .filter_map(|v| serde_json::from_value(v).ok())
        .collect();

    let mut seen = HashSet::new();
    records.retain(|r| seen.insert(r.id));
    Ok(records)
}

fn read_active<S: KeyValueStore>(store: &S) -> AppResult<Option<Uuid>> {
    Ok(store
        .get_item(ACTIVE_TIMER_KEY)?
        .and_then(|raw| serde_json::from_str::<Uuid>(&raw).ok()))
}

fn check_range(start: DateTime<Local>, end: DateTime<Local>) -> AppResult<()> {
    if end < start {
        return Err(AppError::InvalidRange {
            start: start.to_rfc3339(),
            end: end.to_rfc3339(),
        });
    }
    Ok(())
}

impl<S: KeyValueStore> Tracker<S> {
    /// Read the store once, drop stale open records and write the result back.
    pub fn load(store: S) -> AppResult<Self> {
        let mut tracker = Self::peek(store)?;
        tracker.prune_stale();
        tracker.persist()?;
        Ok(tracker)
    }

    /// Read the store without pruning or writing anything.
    pub fn peek(store: S) -> AppResult<Self> {
        let records = read_records(&store)?;
        let active = read_active(&store)?;
        Ok(Self {
            store,
            records,
            active,
            pruned: 0,
        })
    }

    fn prune_stale(&mut self) {
        let active = self.active;
        let before = self.records.len();
        self.records.retain(|r| r.is_closed() || Some(r.id) == active);
        self.pruned = before - self.records.len();

        if let Some(id) = active
            && !self.records.iter().any(|r| r.id == id && r.is_open())
        {
            self.active = None;
        }
    }

    /// Write-through of the full list and the timer marker.
    fn persist(&mut self) -> AppResult<()> {
        let json = serde_json::to_string(&self.records)?;
        self.store.set_item(RECORDS_KEY, &json)?;

        match self.active {
            Some(id) => {
                let json = serde_json::to_string(&id)?;
                self.store.set_item(ACTIVE_TIMER_KEY, &json)?;
            }
            None => self.store.remove_item(ACTIVE_TIMER_KEY)?,
        }
        Ok(())
    }

    // ------------------------------------------------
    // Queries
    // ------------------------------------------------

    /// All records in insertion order, the running timer included.
    pub fn records(&self) -> &[TimeRecord] {
        &self.records
    }

    pub fn closed_records(&self) -> impl Iterator<Item = &TimeRecord> {
        self.records.iter().filter(|r| r.is_closed())
    }

    pub fn get(&self, id: Uuid) -> Option<&TimeRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    pub fn active_record(&self) -> Option<&TimeRecord> {
        self.active.and_then(|id| self.get(id)).filter(|r| r.is_open())
    }

    pub fn is_running(&self) -> bool {
        self.active_record().is_some()
    }

    /// How many stale open records the last [`Tracker::load`] dropped.
    pub fn pruned(&self) -> usize {
        self.pruned
    }

    /// Resolve a full id or a unique prefix of its hex form (hyphens ignored).
    pub fn resolve_id(&self, input: &str) -> AppResult<Option<Uuid>> {
        let needle: String = input
            .trim()
            .chars()
            .filter(|c| *c != '-')
            .collect::<String>()
            .to_lowercase();

        if needle.is_empty() {
            return Ok(None);
        }

        if let Ok(id) = Uuid::parse_str(&needle) {
            return Ok(self.get(id).map(|r| r.id));
        }

        let mut hits = self
            .records
            .iter()
            .filter(|r| r.id.simple().to_string().starts_with(&needle));

        match (hits.next(), hits.next()) {
            (None, _) => Ok(None),
            (Some(r), None) => Ok(Some(r.id)),
            (Some(_), Some(_)) => Err(AppError::AmbiguousId(input.to_string())),
        }
    }

    /// One page of the closed-record table.
    pub fn page(&self, page: usize, limit: usize) -> Page<'_> {
        let closed: Vec<&TimeRecord> = self.closed_records().collect();
        let total = closed.len();
        let page = page.max(1);
        let items = pagination::paginate(&closed, page, limit).to_vec();

        Page {
            items,
            page,
            limit,
            total,
        }
    }

    pub fn chart(&self, req: ChartRequest) -> AppResult<ChartData> {
        chart::aggregate(self.closed_records(), req)
    }

    // ------------------------------------------------
    // Mutations
    // ------------------------------------------------

    pub fn toggle(&mut self) -> AppResult<TimerEvent> {
        self.toggle_at(Local::now())
    }

    /// Start a timer if none runs, otherwise stop the running one.
    pub fn toggle_at(&mut self, now: DateTime<Local>) -> AppResult<TimerEvent> {
        let running = self
            .active
            .and_then(|id| self.records.iter().position(|r| r.id == id && r.is_open()));

        let event = match running {
            Some(idx) => {
                let rec = &mut self.records[idx];
                // a clock stepping backwards still yields end >= start
                rec.end_time = Some(now.max(rec.start_time));
                let stopped = rec.clone();
                self.active = None;
                TimerEvent::Stopped(stopped)
            }
            None => {
                let rec = TimeRecord::open(now);
                self.active = Some(rec.id);
                self.records.push(rec.clone());
                TimerEvent::Started(rec)
            }
        };

        self.persist()?;
        Ok(event)
    }

    /// Append a fully specified record.
    pub fn add_record(
        &mut self,
        start: DateTime<Local>,
        end: DateTime<Local>,
    ) -> AppResult<TimeRecord> {
        check_range(start, end)?;

        let rec = TimeRecord::closed(start, end);
        self.records.push(rec.clone());
        self.persist()?;
        Ok(rec)
    }

    /// Replace one timestamp of a closed record.
    ///
    /// Returns `Ok(false)` when no closed record has this id.
    pub fn update_field(
        &mut self,
        id: Uuid,
        field: RecordField,
        value: DateTime<Local>,
    ) -> AppResult<bool> {
        let Some(rec) = self
            .records
            .iter_mut()
            .find(|r| r.id == id && r.is_closed())
        else {
            return Ok(false);
        };

        let (start, end) = match (field, rec.end_time) {
            (RecordField::StartTime, Some(end)) => (value, end),
            (RecordField::EndTime, _) => (rec.start_time, value),
            (RecordField::StartTime, None) => return Ok(false),
        };
        check_range(start, end)?;

        rec.start_time = start;
        rec.end_time = Some(end);

        self.persist()?;
        Ok(true)
    }

    /// Returns `Ok(false)` when nothing matched.
    pub fn delete_record(&mut self, id: Uuid) -> AppResult<bool> {
        let before = self.records.len();
        self.records.retain(|r| r.id != id);
        if self.records.len() == before {
            return Ok(false);
        }

        if self.active == Some(id) {
            self.active = None;
        }

        self.persist()?;
        Ok(true)
    }
}
