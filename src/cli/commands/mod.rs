pub mod add;
pub mod chart;
pub mod config;
pub mod db;
pub mod del;
pub mod edit;
pub mod init;
pub mod list;
pub mod log;
pub mod status;
pub mod toggle;

use crate::config::Config;
use crate::core::tracker::Tracker;
use crate::db::pool::DbPool;
use crate::db::storage::SqliteStorage;
use crate::errors::AppResult;
use crate::ui::messages::info;

/// Open the configured database and load the record store ("page load").
pub(crate) fn open_tracker<'a>(pool: &'a DbPool) -> AppResult<Tracker<SqliteStorage<'a>>> {
    let tracker = Tracker::load(SqliteStorage::new(&pool.conn))?;
    if tracker.pruned() > 0 {
        info(format!(
            "Dropped {} unfinished record(s) left over from an earlier session.",
            tracker.pruned()
        ));
    }
    Ok(tracker)
}

pub(crate) fn open_pool(cfg: &Config) -> AppResult<DbPool> {
    DbPool::open(&cfg.database)
}
