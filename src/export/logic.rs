use crate::errors::AppResult;
use crate::export::fs_utils::ensure_writable;
use crate::export::json_csv::{export_csv, export_json};
use crate::export::model::{LogExport, StudentExport};
use crate::export::{ExportFormat, ExportTarget};
use crate::models::{AttendanceLog, StandingThresholds, StudentProfile};
use crate::ui::messages::warning;
use std::path::Path;

/// High-level export entry point.
pub struct ExportLogic;

impl ExportLogic {
    /// Writes `target` to `path` in `format`. Nothing is written when there
    /// are no rows. Returns the number of rows written.
    pub fn export(
        target: ExportTarget,
        format: ExportFormat,
        path: &Path,
        force: bool,
        students: &[StudentProfile],
        logs: &[AttendanceLog],
        thresholds: &StandingThresholds,
    ) -> AppResult<usize> {
        ensure_writable(path, force)?;

        match target {
            ExportTarget::Students => {
                let rows: Vec<StudentExport> = students
                    .iter()
                    .map(|s| StudentExport::from_profile(s, thresholds))
                    .collect();
                Self::write("students", format, &rows, path)
            }
            ExportTarget::Logs => {
                let rows: Vec<LogExport> = logs.iter().map(LogExport::from).collect();
                Self::write("attendance logs", format, &rows, path)
            }
        }
    }

    fn write<T: serde::Serialize>(
        label: &str,
        format: ExportFormat,
        rows: &[T],
        path: &Path,
    ) -> AppResult<usize> {
        if rows.is_empty() {
            warning(format!("No {label} to export."));
            return Ok(0);
        }

        match format {
            ExportFormat::Csv => export_csv(label, rows, path)?,
            ExportFormat::Json => export_json(label, rows, path)?,
        }
        Ok(rows.len())
    }
}
