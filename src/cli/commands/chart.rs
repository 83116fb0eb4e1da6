use crate::cli::commands::{open_pool, open_tracker};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::models::chart::{ChartMode, ChartRequest, MONTH_NAMES};
use crate::ui::messages::header;
use crate::utils::colors::{RESET, color_for_hours};
use crate::utils::date::{current_month0, current_year};
use crate::utils::formatting::{bar, bold};
use crate::utils::table::{Column, Table};

/// First year offered by the chart.
pub const FIRST_YEAR: i32 = 1990;

const BAR_WIDTH: usize = 40;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Chart { mode, month, year } = cmd {
        let year = year.unwrap_or_else(current_year);
        if !(FIRST_YEAR..=current_year()).contains(&year) {
            return Err(AppError::InvalidYear(year));
        }

        let req = ChartRequest {
            mode: mode.unwrap_or(cfg.chart_mode),
            month: month.map(|m| m - 1).unwrap_or_else(current_month0),
            year,
        };

        let pool = open_pool(cfg)?;
        let tracker = open_tracker(&pool)?;
        let chart = tracker.chart(req)?;

        let scope = match req.mode {
            ChartMode::Days => format!("{} {}", MONTH_NAMES[req.month as usize], req.year),
            ChartMode::Months => req.year.to_string(),
        };
        header(format!("{} · {}", chart.title, scope));

        let series = chart.datasets.first();
        let label = series.map(|s| s.label.as_str()).unwrap_or("Hours");

        let max = chart.hours().iter().copied().max().unwrap_or(0);
        let mut table = Table::new(vec![
            Column::left(if req.mode == ChartMode::Days { "Day" } else { "Month" }),
            Column::right(label),
            Column::left(""),
        ]);

        for (name, hours) in chart.labels.iter().zip(chart.hours()) {
            table.add_row(vec![
                name.clone(),
                format!("{}{}{}", color_for_hours(*hours), hours, RESET),
                bar(*hours, max, BAR_WIDTH),
            ]);
        }

        print!("{}", table.render());
        println!("\n{} {}", bold("Total:"), chart.total_hours());
    }

    Ok(())
}
