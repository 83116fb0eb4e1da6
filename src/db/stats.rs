use crate::core::tracker::{RECORDS_KEY, Tracker};
use crate::db::pool::DbPool;
use crate::db::storage::SqliteStorage;
use crate::errors::AppResult;
use crate::utils::colors::{CYAN, GREEN, GREY, RESET, YELLOW};
use crate::utils::path::expand_tilde;
use std::fs;

pub fn print_db_info(pool: &DbPool, db_path: &str) -> AppResult<()> {
    println!();

    //
    // 1) FILE SIZE
    //
    let file_size = fs::metadata(expand_tilde(db_path))
        .map(|m| m.len())
        .unwrap_or(0);
    let file_kb = (file_size as f64) / 1024.0;

    println!("{}• File:{} {}{}{}", CYAN, RESET, YELLOW, db_path, RESET);
    println!("{}• Size:{} {:.2} KB", CYAN, RESET, file_kb);

    //
    // 2) STORED RECORDS
    //
    let storage = SqliteStorage::new(&pool.conn);
    let last_write = storage.updated_at(RECORDS_KEY)?;

    let tracker = Tracker::peek(storage)?;
    let closed = tracker.closed_records().count();
    let has_timer = tracker.is_running();

    println!(
        "{}• Closed records:{} {}{}{}",
        CYAN, RESET, GREEN, closed, RESET
    );
    println!(
        "{}• Timer running:{} {}",
        CYAN,
        RESET,
        if has_timer { "yes" } else { "no" }
    );

    //
    // 3) DATE RANGE
    //
    let first = tracker.closed_records().map(|r| r.start_time).min();
    let last = tracker.closed_records().filter_map(|r| r.end_time).max();

    let fmt = |v: Option<chrono::DateTime<chrono::Local>>| {
        v.map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| format!("{GREY}--{RESET}"))
    };

    println!("{}• Date range:{}", CYAN, RESET);
    println!("    from: {}", fmt(first));
    println!("    to:   {}", fmt(last));

    //
    // 4) LAST WRITE + LOG SIZE
    //
    println!(
        "{}• Last write:{} {}",
        CYAN,
        RESET,
        last_write.unwrap_or_else(|| format!("{GREY}--{RESET}"))
    );

    let log_rows: i64 = pool
        .conn
        .query_row("SELECT COUNT(*) FROM log", [], |row| row.get(0))?;
    println!("{}• Log rows:{} {}", CYAN, RESET, log_rows);

    println!();
    Ok(())
}
