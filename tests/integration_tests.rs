use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;

mod common;
use common::{add, hl, setup, setup_test_db, test_home};

#[test]
fn test_init_creates_database() {
    let home = test_home("init");
    let db_path = setup_test_db("init");

    hl(&home)
        .args(["--db", &db_path, "--test", "init"])
        .assert()
        .success()
        .stdout(contains("initialization completed"));

    assert!(std::path::Path::new(&db_path).exists());
}

#[test]
fn test_init_writes_config_file() {
    let home = test_home("init_conf");
    let db_path = setup_test_db("init_conf");

    hl(&home).args(["--db", &db_path, "init"]).assert().success();

    let conf = std::fs::read_to_string(home.join("hourlog.conf")).expect("config written");
    assert!(conf.contains("page_limit: 10"));
    assert!(conf.contains(&db_path));

    hl(&home)
        .args(["config", "--print", "--check"])
        .assert()
        .success()
        .stdout(contains("chart_mode: months"))
        .stdout(contains("Configuration file is complete"));
}

#[test]
fn test_add_then_list() {
    let (home, db_path) = setup("add_list");

    let id = add(&home, &db_path, "2025-03-10 09:00", "2025-03-10 11:30");

    hl(&home)
        .args(["--db", &db_path, "list"])
        .assert()
        .success()
        .stdout(contains(id.as_str()))
        .stdout(contains("2025-03-10 09:00:00"))
        .stdout(contains("02h 30m"))
        .stdout(contains("1 total"));
}

#[test]
fn test_add_requires_both_times() {
    let (home, db_path) = setup("add_missing");

    hl(&home)
        .args(["--db", &db_path, "add", "--start", "2025-03-10 09:00"])
        .assert()
        .failure()
        .stderr(contains("--end"));
}

#[test]
fn test_add_rejects_invalid_dates() {
    let (home, db_path) = setup("add_invalid");

    hl(&home)
        .args([
            "--db",
            &db_path,
            "add",
            "--start",
            "yesterday-ish",
            "--end",
            "2025-03-10 11:00",
        ])
        .assert()
        .failure()
        .stderr(contains("Invalid date/time"));

    hl(&home)
        .args([
            "--db",
            &db_path,
            "add",
            "--start",
            "2025-03-10 11:00",
            "--end",
            "2025-03-10 09:00",
        ])
        .assert()
        .failure()
        .stderr(contains("before start time"));

    hl(&home)
        .args(["--db", &db_path, "list"])
        .assert()
        .success()
        .stdout(contains("No records yet"));
}

#[test]
fn test_toggle_start_stop() {
    let (home, db_path) = setup("toggle");

    hl(&home)
        .args(["--db", &db_path, "toggle"])
        .assert()
        .success()
        .stdout(contains("Timer started"));

    hl(&home)
        .args(["--db", &db_path, "status"])
        .assert()
        .success()
        .stdout(contains("Timer running since"));

    // running timers are not listed
    hl(&home)
        .args(["--db", &db_path, "list"])
        .assert()
        .success()
        .stdout(contains("No records yet"));

    hl(&home)
        .args(["--db", &db_path, "t"])
        .assert()
        .success()
        .stdout(contains("Timer stopped"));

    hl(&home)
        .args(["--db", &db_path, "status"])
        .assert()
        .success()
        .stdout(contains("Timer stopped"));

    hl(&home)
        .args(["--db", &db_path, "list"])
        .assert()
        .success()
        .stdout(contains("1 total"));
}

#[test]
fn test_stale_open_record_is_dropped_on_load() {
    let (home, db_path) = setup("stale");

    {
        let conn = rusqlite::Connection::open(&db_path).expect("open db");
        conn.execute(
            "INSERT INTO storage (key, value, updated_at) VALUES ('records', ?1, '')",
            [r#"[{"id":"7a2c8e3f-4d5b-4c6e-8f70-1b2c3d4e5f60","start_time":"2025-03-10T11:00:00Z","end_time":null}]"#],
        )
        .expect("seed storage");
    }

    hl(&home)
        .args(["--db", &db_path, "list"])
        .assert()
        .success()
        .stdout(contains("Dropped 1 unfinished record"));

    hl(&home)
        .args(["--db", &db_path, "list"])
        .assert()
        .success()
        .stdout(contains("Dropped").not());
}

#[test]
fn test_malformed_storage_loads_empty() {
    let (home, db_path) = setup("malformed");

    {
        let conn = rusqlite::Connection::open(&db_path).expect("open db");
        conn.execute(
            "INSERT INTO storage (key, value, updated_at) VALUES ('records', 'garbage', '')",
            [],
        )
        .expect("seed storage");
    }

    hl(&home)
        .args(["--db", &db_path, "list"])
        .assert()
        .success()
        .stdout(contains("No records yet"));
}

#[test]
fn test_edit_record_end_time() {
    let (home, db_path) = setup("edit");
    let id = add(&home, &db_path, "2025-03-10 09:00", "2025-03-10 10:00");

    hl(&home)
        .args(["--db", &db_path, "edit", &id, "--end", "2025-03-10 12:00"])
        .assert()
        .success()
        .stdout(contains("end_time set to 2025-03-10 12:00:00"));

    hl(&home)
        .args(["--db", &db_path, "list"])
        .assert()
        .success()
        .stdout(contains("03h 00m"));
}

#[test]
fn test_edit_both_fields_forward() {
    let (home, db_path) = setup("edit_both");
    let id = add(&home, &db_path, "2025-03-10 09:00", "2025-03-10 10:00");

    hl(&home)
        .args([
            "--db",
            &db_path,
            "edit",
            &id,
            "--start",
            "2025-03-11 09:00",
            "--end",
            "2025-03-11 09:45",
        ])
        .assert()
        .success();

    hl(&home)
        .args(["--db", &db_path, "list"])
        .assert()
        .success()
        .stdout(contains("2025-03-11 09:00:00"))
        .stdout(contains("00h 45m"));
}

#[test]
fn test_edit_requires_a_field_and_rejects_bad_range() {
    let (home, db_path) = setup("edit_bad");
    let id = add(&home, &db_path, "2025-03-10 09:00", "2025-03-10 10:00");

    hl(&home)
        .args(["--db", &db_path, "edit", &id])
        .assert()
        .failure();

    hl(&home)
        .args(["--db", &db_path, "edit", &id, "--start", "2025-03-10 11:00"])
        .assert()
        .failure()
        .stderr(contains("before start time"));
}

#[test]
fn test_edit_unknown_id_is_a_noop() {
    let (home, db_path) = setup("edit_unknown");
    add(&home, &db_path, "2025-03-10 09:00", "2025-03-10 10:00");

    hl(&home)
        .args(["--db", &db_path, "edit", "zzzz", "--end", "2025-03-10 12:00"])
        .assert()
        .success()
        .stdout(contains("No record matches"));
}

#[test]
fn test_delete_record() {
    let (home, db_path) = setup("del");
    let keep = add(&home, &db_path, "2025-03-10 09:00", "2025-03-10 10:00");
    let gone = add(&home, &db_path, "2025-03-11 09:00", "2025-03-11 10:00");

    hl(&home)
        .args(["--db", &db_path, "del", &gone, "--yes"])
        .assert()
        .success()
        .stdout(contains("has been deleted"));

    hl(&home)
        .args(["--db", &db_path, "list"])
        .assert()
        .success()
        .stdout(contains(keep.as_str()))
        .stdout(contains(gone.as_str()).not());
}

#[test]
fn test_delete_cancelled_without_confirmation() {
    let (home, db_path) = setup("del_cancel");
    let id = add(&home, &db_path, "2025-03-10 09:00", "2025-03-10 10:00");

    hl(&home)
        .args(["--db", &db_path, "del", &id])
        .write_stdin("n\n")
        .assert()
        .success()
        .stdout(contains("Operation cancelled"));

    hl(&home)
        .args(["--db", &db_path, "list"])
        .assert()
        .success()
        .stdout(contains(id.as_str()));
}

#[test]
fn test_list_pagination() {
    let (home, db_path) = setup("paging");
    for day in 1..=12 {
        let date = format!("2025-04-{day:02}");
        add(
            &home,
            &db_path,
            &format!("{date} 09:00"),
            &format!("{date} 10:00"),
        );
    }

    hl(&home)
        .args(["--db", &db_path, "list", "--page", "2", "--limit", "10"])
        .assert()
        .success()
        .stdout(contains("page 2/2"))
        .stdout(contains("12 total"))
        .stdout(contains("2025-04-11 09:00:00"))
        .stdout(contains("2025-04-12 09:00:00"))
        .stdout(contains("2025-04-10 09:00:00").not());

    hl(&home)
        .args(["--db", &db_path, "list", "--page", "-1"])
        .assert()
        .success()
        .stdout(contains("page 1/2"))
        .stdout(contains("2025-04-01 09:00:00"));

    hl(&home)
        .args(["--db", &db_path, "list", "--limit", "15"])
        .assert()
        .failure();
}

#[test]
fn test_chart_days_and_months() {
    let (home, db_path) = setup("chart");
    add(&home, &db_path, "2025-03-10 09:00", "2025-03-10 11:30");
    add(&home, &db_path, "2025-03-10 13:00", "2025-03-10 14:00");

    hl(&home)
        .args([
            "--db", &db_path, "chart", "--mode", "days", "--month", "3", "--year", "2025",
        ])
        .assert()
        .success()
        .stdout(contains("Working Hours Diagram"))
        .stdout(contains("March 2025"))
        .stdout(contains("10 March"))
        .stdout(contains("31 March"))
        .stdout(contains("Hours"));

    hl(&home)
        .args(["--db", &db_path, "chart", "--mode", "months", "--year", "2025"])
        .assert()
        .success()
        .stdout(contains("January"))
        .stdout(contains("December"))
        .stdout(contains("████"));
}

#[test]
fn test_chart_rejects_out_of_range_year_and_month() {
    let (home, db_path) = setup("chart_bad");

    hl(&home)
        .args(["--db", &db_path, "chart", "--year", "1989"])
        .assert()
        .failure()
        .stderr(contains("Invalid year"));

    hl(&home)
        .args(["--db", &db_path, "chart", "--mode", "days", "--month", "13"])
        .assert()
        .failure();
}

#[test]
fn test_log_records_mutations() {
    let (home, db_path) = setup("log");
    add(&home, &db_path, "2025-03-10 09:00", "2025-03-10 10:00");
    hl(&home).args(["--db", &db_path, "toggle"]).assert().success();

    hl(&home)
        .args(["--db", &db_path, "log", "--print"])
        .assert()
        .success()
        .stdout(contains("Internal log"))
        .stdout(contains("init"))
        .stdout(contains("add"))
        .stdout(contains("start"))
        .stdout(contains("migration_applied"));
}

#[test]
fn test_db_info_and_check() {
    let (home, db_path) = setup("db_info");
    add(&home, &db_path, "2025-03-10 09:00", "2025-03-10 10:00");

    hl(&home)
        .args(["--db", &db_path, "db", "--info", "--check", "--migrate"])
        .assert()
        .success()
        .stdout(contains("Closed records:"))
        .stdout(contains("Integrity check passed"))
        .stdout(contains("Schema is up to date"));
}
