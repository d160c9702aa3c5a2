use crate::cli::commands::{open_state, split_assignment};
use crate::cli::parser::{AttendanceAction, Commands};
use crate::config::Config;
use crate::core::attendance::{
    Confirmation, DeleteOutcome, HistoryQuery, HistoryView, SheetMode, history_counts,
};
use crate::core::filter::{Choice, Criteria};
use crate::core::state::AppState;
use crate::errors::{AppError, AppResult};
use crate::models::{AttendanceCounts, AttendanceEntry, AttendanceLog, AttendanceStatus};
use crate::ui::messages::{header, info, item, success, warning};
use crate::ui::prompt::ask_confirmation;
use crate::utils::colors::{color_for_status, paint};
use crate::utils::date::{long_date, parse_date, parse_optional_date, today};
use crate::utils::path::expand_tilde;
use crate::utils::table::Table;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Attendance { action } = cmd {
        match action {
            AttendanceAction::Input {
                date,
                search,
                batch,
                major,
                marks,
                notes,
                proofs,
                all_present,
                edit,
                save,
            } => {
                let date = parse_optional_date(date.as_deref())?.unwrap_or_else(today);
                let mut state = open_state(cfg)?;

                if *edit {
                    let filled = state.load_attendance_for_date(date)?;
                    if filled == 0 {
                        warning(format!("No stored attendance for {date}."));
                    } else {
                        info(format!("Loaded {filled} stored row(s) for {date}."));
                    }
                } else {
                    state.open_sheet(date);
                }

                apply_edits(&mut state, marks, notes, proofs)?;

                let criteria = Criteria::for_type::<AttendanceEntry>()
                    .with_search(search.as_deref().unwrap_or(""))
                    .with_filter("batch", Choice::from_option(batch.as_deref()))
                    .with_filter("major", Choice::from_option(major.as_deref()));

                if *all_present {
                    let ids: Vec<String> = state
                        .sheet()
                        .visible(&criteria, None)
                        .into_iter()
                        .map(|e| e.student_id)
                        .collect();
                    let changed = state.sheet_mut().bulk_set_present(&ids);
                    info(format!("Marked {changed} student(s) present."));
                }

                let mode = match state.sheet().mode() {
                    SheetMode::Input => "Input",
                    SheetMode::Edit => "Edit",
                };
                header(format!("Attendance for {} ({mode})", long_date(date)));
                print_sheet(&state.sheet().visible(&criteria, None));
                print_counts(&state.sheet().counts());

                let incomplete = state.sheet().incomplete();
                if !incomplete.is_empty() {
                    warning("Proof of absence missing for:");
                    for e in incomplete {
                        item(format!("{} ({})", e.name, e.nim));
                    }
                }

                if *save {
                    let outcome = state.save_attendance()?;
                    let c = outcome.counts;
                    success(format!(
                        "Attendance for {date} saved: {} record(s) (H {}, I {}, S {}, A {})",
                        c.total, c.h, c.i, c.s, c.a
                    ));
                    if !outcome.missing_proof.is_empty() {
                        warning(format!(
                            "Saved without proof: {}",
                            outcome.missing_proof.join(", ")
                        ));
                    }
                } else {
                    info("Preview only: pass --save to store this sheet.");
                }
            }
            AttendanceAction::History {
                view,
                search,
                batch,
                date,
            } => {
                let query = HistoryQuery {
                    view: HistoryView::parse(view)?,
                    search: search.clone().unwrap_or_default(),
                    batch: batch.clone(),
                    date: parse_optional_date(date.as_deref())?,
                };

                let state = open_state(cfg)?;
                let all = state.repo().list_all()?;
                let rows = state.history(&query)?;

                header("Attendance history");
                print_counts(&history_counts(&all));
                print_history(&rows);
            }
            AttendanceAction::Delete { id, date, yes } => {
                let mut state = open_state(cfg)?;

                let outcome = match (id, date) {
                    (Some(id), _) => {
                        let log = state
                            .repo()
                            .get(id)?
                            .ok_or_else(|| AppError::LogNotFound(id.clone()))?;
                        let confirmed = *yes
                            || ask_confirmation(&format!(
                                "Delete the {} record of {} on {}? This action is irreversible.",
                                log.status.label(),
                                log.student_name,
                                log.date_str()
                            ));
                        state.delete_log(id, Confirmation::from_bool(confirmed))?
                    }
                    (None, Some(raw)) => {
                        let d = parse_date(raw)?;
                        let confirmed = *yes
                            || ask_confirmation(&format!(
                                "Delete ALL attendance records for {d}? This action is irreversible."
                            ));
                        state.delete_logs_by_date(d, Confirmation::from_bool(confirmed))?
                    }
                    (None, None) => {
                        return Err(AppError::InvalidArgument(
                            "either --id or --date is required".to_string(),
                        ));
                    }
                };

                match outcome {
                    DeleteOutcome::Cancelled => info("Operation cancelled."),
                    DeleteOutcome::Deleted(n) => {
                        success(format!("{n} attendance record(s) deleted."))
                    }
                }
            }
        }
    }
    Ok(())
}

/// Accepts a student id or a NIM.
fn resolve_student(state: &AppState, key: &str) -> AppResult<String> {
    state
        .roster()
        .find_by_id(key)
        .or_else(|| state.roster().find_by_nim(key))
        .map(|s| s.id.clone())
        .ok_or_else(|| AppError::StudentNotFound(key.to_string()))
}

fn apply_edits(
    state: &mut AppState,
    marks: &[String],
    notes: &[String],
    proofs: &[String],
) -> AppResult<()> {
    for raw in marks {
        let (key, value) = split_assignment(raw)?;
        let status = AttendanceStatus::from_code(value)
            .ok_or_else(|| AppError::InvalidStatus(value.to_string()))?;
        let id = resolve_student(state, key)?;
        state.sheet_mut().set_status(&id, status)?;
    }

    for raw in notes {
        let (key, value) = split_assignment(raw)?;
        let id = resolve_student(state, key)?;
        state.sheet_mut().set_note(&id, value)?;
    }

    for raw in proofs {
        let (key, value) = split_assignment(raw)?;
        let id = resolve_student(state, key)?;
        let path = expand_tilde(value);
        if !state.sheet_mut().attach_proof_file(&id, &path)? {
            warning(format!("Could not read proof file {}", path.display()));
        }
    }
    Ok(())
}

fn status_cell(status: Option<AttendanceStatus>) -> String {
    let text = status.map(|s| s.code()).unwrap_or("-");
    paint(text, color_for_status(status))
}

fn print_sheet(rows: &[AttendanceEntry]) {
    if rows.is_empty() {
        warning("No students match the current filters.");
        return;
    }

    let mut table = Table::new(vec!["ID", "Name", "NIM", "L/P", "Batch", "Status", "Note", "Proof"]);
    for e in rows {
        table.add_row(vec![
            e.student_id.clone(),
            e.name.clone(),
            e.nim.clone(),
            e.gender.clone(),
            e.batch.clone(),
            status_cell(e.status),
            e.note.clone(),
            e.proof
                .as_ref()
                .map(|p| p.file_name.clone().unwrap_or_else(|| "attached".to_string()))
                .unwrap_or_default(),
        ]);
    }
    print!("{}", table.render());
}

fn print_counts(c: &AttendanceCounts) {
    info(format!(
        "Total {}  |  H {}  I {}  S {}  A {}",
        c.total, c.h, c.i, c.s, c.a
    ));
}

fn print_history(rows: &[AttendanceLog]) {
    if rows.is_empty() {
        warning("No attendance records match the current filters.");
        return;
    }

    let mut table = Table::new(vec!["ID", "Date", "Name", "NIM", "Batch", "Status", "Note", "Proof"]);
    for l in rows {
        table.add_row(vec![
            l.id.clone(),
            l.date_str(),
            l.student_name.clone(),
            l.nim.clone(),
            l.batch.clone(),
            status_cell(Some(l.status)),
            l.note.clone(),
            if l.proof.is_some() { "yes" } else { "" }.to_string(),
        ]);
    }
    print!("{}", table.render());
}
