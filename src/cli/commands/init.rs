use crate::cli::parser::Cli;
use crate::config::Config;
use crate::core::repository::AttendanceRepository;
use crate::db::SqliteRepository;
use crate::errors::AppResult;
use crate::fixtures;
use crate::ui::messages::{info, success, warning};

/// Handle the `init` command
///
/// This initializes:
///  - the config directory and file (skipped in test mode)
///  - with `--db`, the SQLite database, its migrations and the seed data
pub fn handle(cli: &Cli) -> AppResult<()> {
    let cfg = Config::init_all(cli.db.clone(), cli.test)?;

    info("Initializing rCampus…");
    if cli.test {
        info("Test mode: configuration file left untouched");
    } else {
        info(format!("Config file : {}", Config::config_file().display()));
    }

    let Some(db_path) = cfg.database.clone() else {
        info("No database configured: attendance is kept in memory for each run.");
        success("rCampus initialization completed!");
        return Ok(());
    };

    info(format!("Database    : {}", db_path));
    let mut repo = SqliteRepository::open(&db_path)?;

    let (students, logs) = repo.seed_if_empty(
        &fixtures::load_students(&cfg)?,
        &fixtures::load_attendance_logs(&cfg)?,
    )?;
    if students > 0 || logs > 0 {
        success(format!(
            "Imported {} students and {} attendance logs",
            students, logs
        ));
    } else {
        info("Database already populated, nothing imported");
    }

    if let Err(e) = repo.record_operation(
        "init",
        "Database initialized",
        &format!("Database initialized at {}", &db_path),
    ) {
        warning(format!("Failed to write internal log: {}", e));
    }

    success(format!("Database initialized at {}", &db_path));
    Ok(())
}
