#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use chrono::NaiveDate;
use rcampus::config::Config;
use rcampus::core::repository::MemoryRepository;
use rcampus::core::roster::RosterStore;
use rcampus::core::state::AppState;
use rcampus::fixtures;
use rcampus::models::{AttendanceLog, StudentProfile};
use std::env;
use std::fs;
use std::path::PathBuf;

pub fn rca() -> Command {
    let mut cmd = cargo_bin_cmd!("rcampus");
    // keep the developer's own ~/.rcampus out of the way
    cmd.env("HOME", env::temp_dir().join("rcampus_test_home"));
    cmd.env("NO_COLOR", "1");
    cmd
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_rcampus.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_rcampus_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// Initialize a DB with the seed data
pub fn init_db_with_data(db_path: &str) {
    rca()
        .args(["--db", db_path, "--test", "init"])
        .assert()
        .success();
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

pub fn roster() -> Vec<StudentProfile> {
    fixtures::students().expect("seed roster parses")
}

pub fn seed_logs() -> Vec<AttendanceLog> {
    fixtures::attendance_logs().expect("seed logs parse")
}

pub fn student<'a>(students: &'a [StudentProfile], id: &str) -> &'a StudentProfile {
    students
        .iter()
        .find(|s| s.id == id)
        .unwrap_or_else(|| panic!("no student {id}"))
}

pub fn memory_repo() -> MemoryRepository {
    MemoryRepository::with_logs(seed_logs())
}

/// Session over the seed data, opened on 2023-10-25.
pub fn seeded_state() -> AppState {
    AppState::new(
        Config::default(),
        RosterStore::try_from_vec(roster()).unwrap(),
        Box::new(memory_repo()),
        date(2023, 10, 25),
    )
}
