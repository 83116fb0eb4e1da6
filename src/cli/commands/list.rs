use crate::cli::commands::{open_pool, open_tracker};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::pagination::clamp_page;
use crate::errors::AppResult;
use crate::ui::messages::{header, info};
use crate::utils::format_duration;
use crate::utils::table::{Column, Table};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::List { page, limit } = cmd {
        let pool = open_pool(cfg)?;
        let tracker = open_tracker(&pool)?;

        let page_no = clamp_page(page.unwrap_or(1));
        let limit = limit.unwrap_or_else(|| cfg.effective_page_limit());
        let page = tracker.page(page_no, limit);

        if page.total == 0 {
            info("No records yet. Use `hourlog toggle` or `hourlog add`.");
            return Ok(());
        }

        header(format!(
            "Records · page {}/{} · {} total",
            page.page,
            page.page_count().max(1),
            page.total
        ));

        if page.is_empty() {
            info(format!(
                "Page {} is empty (last page is {}).",
                page.page,
                page.page_count()
            ));
            return Ok(());
        }

        let mut table = Table::new(vec![
            Column::left("ID"),
            Column::left("Start Time"),
            Column::left("End Time"),
            Column::right("Duration"),
        ]);

        for rec in &page.items {
            table.add_row(vec![
                rec.short_id(),
                rec.start_time.format(&cfg.datetime_format).to_string(),
                rec.end_time
                    .map(|e| e.format(&cfg.datetime_format).to_string())
                    .unwrap_or_default(),
                rec.duration().map(format_duration).unwrap_or_default(),
            ]);
        }

        print!("{}", table.render());
    }

    Ok(())
}
