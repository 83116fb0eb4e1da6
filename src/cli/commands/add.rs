use crate::cli::commands::{open_pool, open_tracker};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::log::ttlog_quiet;
use crate::errors::AppResult;
use crate::ui::messages::success;
use crate::utils::date::parse_datetime;
use crate::utils::format_duration;

/// Add a finished work session.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Add { start, end } = cmd {
        //
        // 1. Validate both timestamps before touching the store
        //
        let start = parse_datetime(start)?;
        let end = parse_datetime(end)?;

        //
        // 2. Append
        //
        let pool = open_pool(cfg)?;
        let mut tracker = open_tracker(&pool)?;
        let rec = tracker.add_record(start, end)?;

        let span = format!(
            "{} → {}",
            start.format(&cfg.datetime_format),
            end.format(&cfg.datetime_format)
        );
        ttlog_quiet(&pool.conn, "add", &rec.short_id(), &span);

        success(format!(
            "Added record {} ({}, {})",
            rec.short_id(),
            span,
            rec.duration().map(format_duration).unwrap_or_default()
        ));
    }

    Ok(())
}
