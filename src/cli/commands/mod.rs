pub mod attendance;
pub mod config;
pub mod export;
pub mod init;
pub mod log;
pub mod stats;
pub mod students;

use crate::config::Config;
use crate::core::repository::{AttendanceRepository, MemoryRepository};
use crate::core::roster::RosterStore;
use crate::core::state::AppState;
use crate::db::SqliteRepository;
use crate::errors::{AppError, AppResult};
use crate::fixtures;
use crate::models::StudentProfile;
use crate::utils::date;

/// Builds the session state for `cfg`: SQLite when a database is
/// configured, seed data in memory otherwise. An empty database roster is
/// filled from the seed data; attendance logs are only imported by `init`.
pub(crate) fn open_state(cfg: &Config) -> AppResult<AppState> {
    let (students, repo): (Vec<StudentProfile>, Box<dyn AttendanceRepository>) =
        match &cfg.database {
            Some(path) => {
                let mut repo = SqliteRepository::open(path)?;
                if repo.student_count()? == 0 {
                    repo.save_students(&fixtures::load_students(cfg)?)?;
                }
                (repo.load_students()?, Box::new(repo))
            }
            None => (
                fixtures::load_students(cfg)?,
                Box::new(MemoryRepository::with_logs(
                    fixtures::load_attendance_logs(cfg)?,
                )),
            ),
        };

    Ok(AppState::new(
        cfg.clone(),
        RosterStore::try_from_vec(students)?,
        repo,
        date::today(),
    ))
}

/// Writes the roster back when it lives in a database. A no-op for the
/// in-memory session.
pub(crate) fn persist_roster(cfg: &Config, students: &[StudentProfile]) -> AppResult<bool> {
    match &cfg.database {
        Some(path) => {
            SqliteRepository::open(path)?.save_students(students)?;
            Ok(true)
        }
        None => Ok(false),
    }
}

/// Splits `ID=VALUE`.
pub(crate) fn split_assignment(raw: &str) -> AppResult<(&str, &str)> {
    raw.split_once('=')
        .map(|(id, value)| (id.trim(), value.trim()))
        .filter(|(id, _)| !id.is_empty())
        .ok_or_else(|| AppError::InvalidArgument(format!("expected ID=VALUE, got '{raw}'")))
}
