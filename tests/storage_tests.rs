use hourlog::config::{Config, migrate};
use hourlog::core::tracker::{RECORDS_KEY, Tracker};
use hourlog::db::log::ttlog;
use hourlog::db::migrate::{pending_migrations, run_pending_migrations};
use hourlog::db::pool::DbPool;
use hourlog::db::storage::{KeyValueStore, SqliteStorage};
use hourlog::models::chart::ChartMode;
use std::env;
use std::fs;
use std::path::PathBuf;

mod common;
use common::{local, setup_test_db};

fn temp_conf(name: &str, content: &str) -> PathBuf {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_hourlog.conf", name));
    fs::write(&path, content).expect("write conf");
    path
}

#[test]
fn test_sqlite_storage_get_set_remove() {
    let pool = DbPool::in_memory().unwrap();
    let mut storage = SqliteStorage::new(&pool.conn);

    assert!(storage.get_item("k").unwrap().is_none());
    storage.set_item("k", "v1").unwrap();
    storage.set_item("k", "v2").unwrap();
    assert_eq!(storage.get_item("k").unwrap().as_deref(), Some("v2"));
    assert!(storage.updated_at("k").unwrap().is_some());

    storage.remove_item("k").unwrap();
    assert!(storage.get_item("k").unwrap().is_none());
}

#[test]
fn test_tracker_state_survives_reopening_the_file() {
    let db_path = setup_test_db("storage_reopen");

    let id = {
        let pool = DbPool::open(&db_path).unwrap();
        let mut tracker = Tracker::load(SqliteStorage::new(&pool.conn)).unwrap();
        tracker
            .add_record(local(2025, 3, 10, 9, 0), local(2025, 3, 10, 10, 0))
            .unwrap()
            .id
    };

    let pool = DbPool::open(&db_path).unwrap();
    let tracker = Tracker::load(SqliteStorage::new(&pool.conn)).unwrap();
    assert_eq!(tracker.records().len(), 1);
    assert_eq!(tracker.records()[0].id, id);

    let raw = SqliteStorage::new(&pool.conn)
        .get_item(RECORDS_KEY)
        .unwrap()
        .unwrap();
    assert!(raw.contains(&id.to_string()));
}

#[test]
fn test_migrations_are_idempotent() {
    let pool = DbPool::in_memory().unwrap();
    assert!(pending_migrations(&pool.conn).unwrap().is_empty());

    run_pending_migrations(&pool.conn).unwrap();
    run_pending_migrations(&pool.conn).unwrap();

    let applied: i64 = pool
        .conn
        .query_row(
            "SELECT COUNT(*) FROM log WHERE operation = 'migration_applied'",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(applied, 2);
}

#[test]
fn test_fresh_database_has_pending_migrations() {
    let pool = DbPool::new(":memory:").unwrap();
    assert_eq!(pending_migrations(&pool.conn).unwrap().len(), 2);
}

#[test]
fn test_ttlog_writes_a_row() {
    let pool = DbPool::in_memory().unwrap();
    ttlog(&pool.conn, "add", "abcd1234", "09:00 → 10:00").unwrap();

    let (op, target): (String, String) = pool
        .conn
        .query_row(
            "SELECT operation, target FROM log WHERE operation = 'add'",
            [],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )
        .unwrap();
    assert_eq!(op, "add");
    assert_eq!(target, "abcd1234");
}

#[test]
fn test_config_defaults_when_file_missing() {
    let mut path: PathBuf = env::temp_dir();
    path.push("does_not_exist_hourlog.conf");
    fs::remove_file(&path).ok();

    let cfg = Config::load_from(&path).unwrap();
    assert_eq!(cfg.page_limit, 10);
    assert_eq!(cfg.chart_mode, ChartMode::Months);
    assert_eq!(cfg.datetime_format, "%Y-%m-%d %H:%M:%S");
}

#[test]
fn test_config_partial_file_uses_defaults() {
    let path = temp_conf("partial", "page_limit: 20\nchart_mode: days\n");

    let cfg = Config::load_from(&path).unwrap();
    assert_eq!(cfg.page_limit, 20);
    assert_eq!(cfg.chart_mode, ChartMode::Days);
    assert_eq!(cfg.datetime_format, "%Y-%m-%d %H:%M:%S");
}

#[test]
fn test_config_malformed_file_is_an_error() {
    let path = temp_conf("malformed", "page_limit: [not a number\n");
    assert!(Config::load_from(&path).is_err());
}

#[test]
fn test_config_migrate_adds_missing_keys_once() {
    let path = temp_conf("migrate", "database: /tmp/x.sqlite\npage_limit: 30\n");

    let missing = migrate::missing_keys(&path).unwrap();
    assert_eq!(missing, vec!["chart_mode", "datetime_format"]);

    let added = migrate::migrate_config_file(&path).unwrap();
    assert_eq!(added, vec!["chart_mode", "datetime_format"]);
    assert!(migrate::migrate_config_file(&path).unwrap().is_empty());

    let cfg = Config::load_from(&path).unwrap();
    assert_eq!(cfg.database, "/tmp/x.sqlite");
    assert_eq!(cfg.page_limit, 30);
    assert_eq!(cfg.chart_mode, ChartMode::Months);
}

#[test]
fn test_config_save_and_reload() {
    let path = temp_conf("save", "");
    let cfg = Config {
        page_limit: 50,
        ..Config::default()
    };
    cfg.save_to(&path).unwrap();

    let loaded = Config::load_from(&path).unwrap();
    assert_eq!(loaded.page_limit, 50);
    assert_eq!(loaded.effective_page_limit(), 50);
}

#[test]
fn test_config_rejects_bad_datetime_format() {
    let path = temp_conf("bad_format", "datetime_format: \"%Y-%Q\"\n");
    assert!(Config::load_from(&path).is_err());
}
