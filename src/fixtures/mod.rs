//! Built-in seed data: the demo roster and the attendance history it starts
//! with. A `fixtures` directory in the configuration replaces either file.

use crate::config::Config;
use crate::core::roster;
use crate::errors::AppResult;
use crate::models::{AttendanceLog, StudentProfile};
use std::fs;
use std::path::Path;

const STUDENTS_JSON: &str = include_str!("students.json");
const ATTENDANCE_LOGS_JSON: &str = include_str!("attendance_logs.json");

pub const STUDENTS_FILE: &str = "students.json";
pub const ATTENDANCE_LOGS_FILE: &str = "attendance_logs.json";

pub fn students() -> AppResult<Vec<StudentProfile>> {
    Ok(serde_json::from_str(STUDENTS_JSON)?)
}

pub fn attendance_logs() -> AppResult<Vec<AttendanceLog>> {
    Ok(serde_json::from_str(ATTENDANCE_LOGS_JSON)?)
}

fn read_override(dir: &str, file: &str) -> AppResult<Option<String>> {
    let path = Path::new(dir).join(file);
    if !path.exists() {
        return Ok(None);
    }
    Ok(Some(fs::read_to_string(path)?))
}

/// Roster for `cfg`: the override file when present, the built-in one
/// otherwise. Repeated ids or NIMs are rejected.
pub fn load_students(cfg: &Config) -> AppResult<Vec<StudentProfile>> {
    let students = match &cfg.fixtures {
        Some(dir) => match read_override(dir, STUDENTS_FILE)? {
            Some(content) => serde_json::from_str(&content)?,
            None => students()?,
        },
        None => students()?,
    };
    roster::ensure_unique(&students)?;
    Ok(students)
}

pub fn load_attendance_logs(cfg: &Config) -> AppResult<Vec<AttendanceLog>> {
    if let Some(dir) = &cfg.fixtures
        && let Some(content) = read_override(dir, ATTENDANCE_LOGS_FILE)?
    {
        return Ok(serde_json::from_str(&content)?);
    }
    attendance_logs()
}
