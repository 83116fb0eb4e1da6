use crate::cli::commands::{open_pool, open_tracker};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::log::ttlog_quiet;
use crate::errors::AppResult;
use crate::models::record::short_id;
use crate::ui::messages::{info, success, warning};

use std::io::{self, Write};

/// Ask a yes/no confirmation from the user
fn ask_confirmation(prompt: &str) -> bool {
    warning(prompt);
    print!("Confirm [y/N]: ");
    let _ = io::stdout().flush();

    let mut s = String::new();
    if io::stdin().read_line(&mut s).is_ok() {
        matches!(s.trim().to_lowercase().as_str(), "y" | "yes")
    } else {
        false
    }
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Del { id, yes } = cmd {
        let pool = open_pool(cfg)?;
        let mut tracker = open_tracker(&pool)?;

        let Some(uuid) = tracker.resolve_id(id)? else {
            warning(format!("No record matches '{}'. Nothing deleted.", id));
            return Ok(());
        };

        let short = short_id(&uuid);
        let description = tracker
            .get(uuid)
            .map(|r| {
                let end = r
                    .end_time
                    .map(|e| e.format(&cfg.datetime_format).to_string())
                    .unwrap_or_else(|| "running".to_string());
                format!("{} → {}", r.start_time.format(&cfg.datetime_format), end)
            })
            .unwrap_or_default();

        //
        // Confirmation prompt
        //
        let prompt = format!(
            "Delete record {} ({})? This action is irreversible.",
            short, description
        );
        if !*yes && !ask_confirmation(&prompt) {
            info("Operation cancelled.");
            return Ok(());
        }

        if tracker.delete_record(uuid)? {
            ttlog_quiet(&pool.conn, "del", &short, &description);
            success(format!("Record {} has been deleted.", short));
        }
    }

    Ok(())
}
