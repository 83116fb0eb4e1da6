use crate::cli::commands::{open_pool, open_tracker};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::AppResult;
use crate::ui::messages::info;
use crate::utils::format_duration;
use chrono::Local;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if !matches!(cmd, Commands::Status) {
        return Ok(());
    }

    let pool = open_pool(cfg)?;
    let tracker = open_tracker(&pool)?;

    match tracker.active_record() {
        Some(rec) => info(format!(
            "Timer running since {} [{}], elapsed {}",
            rec.start_time.format(&cfg.datetime_format),
            rec.short_id(),
            format_duration(Local::now() - rec.start_time)
        )),
        None => info("Timer stopped. Run `hourlog toggle` to start it."),
    }

    Ok(())
}
