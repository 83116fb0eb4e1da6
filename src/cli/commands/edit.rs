use crate::cli::commands::{open_pool, open_tracker};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::log::ttlog_quiet;
use crate::errors::{AppError, AppResult};
use crate::models::record::short_id;
use crate::models::record_field::RecordField;
use crate::ui::messages::{success, warning};
use crate::utils::date::parse_datetime;
use chrono::{DateTime, Local};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Edit { id, start, end } = cmd {
        let mut changes: Vec<(RecordField, DateTime<Local>)> = Vec::new();
        if let Some(s) = start {
            changes.push((RecordField::StartTime, parse_datetime(s)?));
        }
        if let Some(e) = end {
            changes.push((RecordField::EndTime, parse_datetime(e)?));
        }

        if let (Some(s), Some(e)) = (changes.first(), changes.get(1))
            && e.1 < s.1
        {
            return Err(AppError::InvalidRange {
                start: s.1.to_rfc3339(),
                end: e.1.to_rfc3339(),
            });
        }

        let pool = open_pool(cfg)?;
        let mut tracker = open_tracker(&pool)?;

        let Some(uuid) = tracker.resolve_id(id)? else {
            warning(format!("No record matches '{}'. Nothing changed.", id));
            return Ok(());
        };

        // Both bounds moving past the old end: set the end first so that
        // end >= start holds after each single-field update.
        let end_first = match changes.as_slice() {
            [(_, new_start), _] => tracker
                .get(uuid)
                .and_then(|r| r.end_time)
                .is_some_and(|old_end| *new_start > old_end),
            _ => false,
        };
        if end_first {
            changes.reverse();
        }

        for (field, value) in changes {
            if !tracker.update_field(uuid, field, value)? {
                warning(format!(
                    "Record '{}' is not a finished session. Nothing changed.",
                    id
                ));
                return Ok(());
            }

            let short = short_id(&uuid);
            let value = value.format(&cfg.datetime_format).to_string();
            ttlog_quiet(
                &pool.conn,
                "edit",
                &short,
                &format!("{} set to {}", field, value),
            );
            success(format!("Record {}: {} set to {}", short, field, value));
        }
    }

    Ok(())
}
