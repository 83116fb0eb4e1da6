#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use chrono::{DateTime, Local, TimeZone};
use std::env;
use std::fs;
use std::path::PathBuf;

/// Per-test config directory, so no test reads or writes the real one.
pub fn test_home(name: &str) -> PathBuf {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_hourlog_home", name));
    fs::remove_dir_all(&path).ok();
    fs::create_dir_all(&path).expect("create test home");
    path
}

pub fn hl(home: &PathBuf) -> Command {
    let mut cmd = cargo_bin_cmd!("hourlog");
    cmd.env("HOURLOG_HOME", home);
    cmd
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_hourlog.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Fresh home + initialized DB.
pub fn setup(name: &str) -> (PathBuf, String) {
    let home = test_home(name);
    let db_path = setup_test_db(name);

    hl(&home)
        .args(["--db", &db_path, "--test", "init"])
        .assert()
        .success();

    (home, db_path)
}

pub fn add(home: &PathBuf, db_path: &str, start: &str, end: &str) -> String {
    let out = hl(home)
        .args(["--db", db_path, "add", "--start", start, "--end", end])
        .output()
        .expect("run add");
    assert!(out.status.success(), "add failed: {:?}", out);
    short_id_from(&String::from_utf8_lossy(&out.stdout))
}

/// Pull the 8-char id out of an "Added record <id> (...)" line.
pub fn short_id_from(stdout: &str) -> String {
    let marker = "Added record ";
    let idx = stdout.find(marker).expect("no 'Added record' line") + marker.len();
    stdout[idx..idx + 8].to_string()
}

pub fn local(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Local> {
    Local
        .with_ymd_and_hms(y, m, d, h, min, 0)
        .single()
        .expect("unambiguous local time")
}
