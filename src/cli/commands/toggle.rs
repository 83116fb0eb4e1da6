use crate::cli::commands::{open_pool, open_tracker};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::log::ttlog_quiet;
use crate::errors::AppResult;
use crate::models::record::TimerEvent;
use crate::ui::messages::success;
use crate::utils::format_duration;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if !matches!(cmd, Commands::Toggle) {
        return Ok(());
    }

    let pool = open_pool(cfg)?;
    let mut tracker = open_tracker(&pool)?;

    match tracker.toggle()? {
        TimerEvent::Started(rec) => {
            let at = rec.start_time.format(&cfg.datetime_format).to_string();
            ttlog_quiet(
                &pool.conn,
                "start",
                &rec.short_id(),
                &format!("Timer started at {}", at),
            );
            success(format!("▶ Timer started at {} [{}]", at, rec.short_id()));
        }
        TimerEvent::Stopped(rec) => {
            let elapsed = rec.duration().map(format_duration).unwrap_or_default();
            let at = rec
                .end_time
                .map(|t| t.format(&cfg.datetime_format).to_string())
                .unwrap_or_default();
            ttlog_quiet(
                &pool.conn,
                "stop",
                &rec.short_id(),
                &format!("Timer stopped at {} after {}", at, elapsed),
            );
            success(format!(
                "⏸ Timer stopped at {} [{}], worked {}",
                at,
                rec.short_id(),
                elapsed
            ));
        }
    }

    Ok(())
}
