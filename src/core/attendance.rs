//! Daily attendance sheet and attendance history.

use crate::config::ProofPolicy;
use crate::core::filter::{self, Choice, Criteria, SortSpec};
use crate::core::repository::AttendanceRepository;
use crate::errors::{AppError, AppResult};
use crate::models::{
    AttendanceCounts, AttendanceEntry, AttendanceLog, AttendanceStatus, Proof, ProofKind,
    StudentProfile,
};
use chrono::NaiveDate;
use std::collections::HashSet;
use std::fs::File;
use std::path::Path;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetMode {
    /// Fresh input for a day.
    Input,
    /// Correction of a stored day; saving overwrites it.
    Edit,
}

/// Answer to a destructive-operation prompt. Anything but an explicit yes
/// cancels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Confirmation {
    Confirmed,
    #[default]
    Cancelled,
}

impl Confirmation {
    pub fn from_bool(yes: bool) -> Self {
        if yes {
            Confirmation::Confirmed
        } else {
            Confirmation::Cancelled
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveOutcome {
    pub counts: AttendanceCounts,
    /// Names of I/S rows saved without a proof document.
    pub missing_proof: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Cancelled,
    Deleted(usize),
}

/// Working set of per-student marks for one date.
#[derive(Debug, Clone)]
pub struct AttendanceSheet {
    date: NaiveDate,
    mode: SheetMode,
    entries: Vec<AttendanceEntry>,
}

impl AttendanceSheet {
    /// One unset row per roster student.
    pub fn open(roster: &[StudentProfile], date: NaiveDate) -> Self {
        Self {
            date,
            mode: SheetMode::Input,
            entries: roster.iter().map(AttendanceEntry::for_student).collect(),
        }
    }

    /// Back to fresh input for `date`.
    pub fn reset(&mut self, roster: &[StudentProfile], date: NaiveDate) {
        *self = Self::open(roster, date);
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn mode(&self) -> SheetMode {
        self.mode
    }

    pub fn entries(&self) -> &[AttendanceEntry] {
        &self.entries
    }

    pub fn entry(&self, student_id: &str) -> Option<&AttendanceEntry> {
        self.entries.iter().find(|e| e.student_id == student_id)
    }

    fn entry_mut(&mut self, student_id: &str) -> AppResult<&mut AttendanceEntry> {
        self.entries
            .iter_mut()
            .find(|e| e.student_id == student_id)
            .ok_or_else(|| AppError::StudentNotFound(student_id.to_string()))
    }

    /// Marking a student present drops any note and proof. Alpha keeps the
    /// note but not the proof.
    pub fn set_status(&mut self, student_id: &str, status: AttendanceStatus) -> AppResult<()> {
        let entry = self.entry_mut(student_id)?;
        entry.status = Some(status);
        if status.is_present() {
            entry.note.clear();
        }
        if !status.needs_proof() {
            entry.proof = None;
        }
        Ok(())
    }

    pub fn set_note(&mut self, student_id: &str, note: &str) -> AppResult<()> {
        let entry = self.entry_mut(student_id)?;
        if entry.status.is_some_and(|s| s.is_present()) && !note.is_empty() {
            return Err(AppError::NoteNotAllowed(entry.name.clone()));
        }
        entry.note = note.to_string();
        Ok(())
    }

    /// Only I/S rows take a proof document.
    pub fn attach_proof(&mut self, student_id: &str, proof: Proof) -> AppResult<()> {
        Self::proof_target(self.entry_mut(student_id)?)?.proof = Some(proof);
        Ok(())
    }

    /// Attaches a file from disk. An unreadable file leaves the row untouched
    /// and returns `false`.
    pub fn attach_proof_file(&mut self, student_id: &str, path: &Path) -> AppResult<bool> {
        let entry = Self::proof_target(self.entry_mut(student_id)?)?;

        if File::open(path).is_err() || !path.is_file() {
            return Ok(false);
        }

        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        let absolute = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());

        entry.proof = Some(Proof {
            url: format!("file://{}", absolute.display()),
            kind: ProofKind::from_file_name(&file_name),
            file_name: Some(file_name),
        });
        Ok(true)
    }

    fn proof_target(entry: &mut AttendanceEntry) -> AppResult<&mut AttendanceEntry> {
        if entry.status.is_some_and(|s| s.needs_proof()) {
            Ok(entry)
        } else {
            Err(AppError::ProofNotAllowed(entry.name.clone()))
        }
    }

    pub fn remove_proof(&mut self, student_id: &str) -> AppResult<()> {
        self.entry_mut(student_id)?.proof = None;
        Ok(())
    }

    /// Rows matching `criteria`, in sheet order unless `sort` is given.
    pub fn visible(&self, criteria: &Criteria, sort: Option<&SortSpec>) -> Vec<AttendanceEntry> {
        filter::apply(&self.entries, criteria, sort)
    }

    /// Marks every still-unset row among `visible_ids` as present.
    /// Rows that already carry a status are left alone, so repeating the
    /// call changes nothing. Returns how many rows changed.
    pub fn bulk_set_present(&mut self, visible_ids: &[String]) -> usize {
        let visible: HashSet<&str> = visible_ids.iter().map(String::as_str).collect();
        let mut changed = 0;

        for entry in self.entries.iter_mut() {
            if entry.status.is_none() && visible.contains(entry.student_id.as_str()) {
                entry.status = Some(AttendanceStatus::Present);
                changed += 1;
            }
        }
        changed
    }

    /// Tally of rows with a status; unset rows are not counted.
    pub fn counts(&self) -> AttendanceCounts {
        self.entries.iter().filter_map(|e| e.status).collect()
    }

    /// I/S rows without a proof document.
    pub fn incomplete(&self) -> Vec<&AttendanceEntry> {
        self.entries.iter().filter(|e| e.is_missing_proof()).collect()
    }

    /// Writes the marked rows for the sheet's date.
    ///
    /// In edit mode the stored day is replaced wholesale. In input mode the
    /// marked students replace their own stored lines for that date and
    /// everyone else's lines are kept.
    pub fn save<R: AttendanceRepository + ?Sized>(
        &self,
        repo: &mut R,
        policy: ProofPolicy,
    ) -> AppResult<SaveOutcome> {
        let counts = self.counts();
        if counts.total == 0 {
            return Err(AppError::NothingToSave);
        }

        let missing_proof: Vec<String> = self.incomplete().iter().map(|e| e.name.clone()).collect();
        if policy == ProofPolicy::Require && !missing_proof.is_empty() {
            return Err(AppError::MissingProof(missing_proof));
        }

        let mut logs: Vec<AttendanceLog> = self
            .entries
            .iter()
            .filter_map(|e| AttendanceLog::from_entry(Uuid::new_v4().to_string(), self.date, e))
            .collect();

        if self.mode == SheetMode::Input {
            let marked: HashSet<&str> = logs.iter().map(|l| l.nim.as_str()).collect();
            let kept: Vec<AttendanceLog> = repo
                .list_by_date(self.date)?
                .into_iter()
                .filter(|l| !marked.contains(l.nim.as_str()))
                .collect();
            logs.extend(kept);
        }

        repo.save_day(self.date, &logs)?;

        let operation = match self.mode {
            SheetMode::Input => "save",
            SheetMode::Edit => "overwrite",
        };
        repo.record_operation(
            operation,
            &self.date.to_string(),
            &format!(
                "total={} H={} I={} S={} A={}",
                counts.total, counts.h, counts.i, counts.s, counts.a
            ),
        )?;

        Ok(SaveOutcome {
            counts,
            missing_proof,
        })
    }

    /// Switches to edit mode for `date` and replaces every row with what the
    /// repository holds for that day. Students without a stored line come
    /// back unset. Returns how many rows were filled.
    pub fn load_for_date<R: AttendanceRepository + ?Sized>(
        &mut self,
        repo: &R,
        roster: &[StudentProfile],
        date: NaiveDate,
    ) -> AppResult<usize> {
        let stored = repo.list_by_date(date)?;
        let mut fresh = Self::open(roster, date);
        fresh.mode = SheetMode::Edit;

        let mut filled = 0;
        for entry in fresh.entries.iter_mut() {
            if let Some(log) = stored.iter().find(|l| l.nim == entry.nim) {
                entry.status = Some(log.status);
                entry.note = log.note.clone();
                entry.proof = log.proof.clone();
                filled += 1;
            }
        }

        *self = fresh;
        Ok(filled)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HistoryView {
    /// Everything but present marks.
    #[default]
    Issues,
    All,
}

impl HistoryView {
    pub fn parse(raw: &str) -> AppResult<Self> {
        match raw.trim().to_lowercase().as_str() {
            "issues" => Ok(HistoryView::Issues),
            "all" => Ok(HistoryView::All),
            other => Err(AppError::InvalidArgument(format!(
                "history view '{other}' (expected issues or all)"
            ))),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct HistoryQuery {
    pub view: HistoryView,
    pub search: String,
    pub batch: Option<String>,
    pub date: Option<NaiveDate>,
}

/// History rows matching the query, in repository order.
pub fn filter_history(logs: &[AttendanceLog], query: &HistoryQuery) -> Vec<AttendanceLog> {
    let mut criteria = Criteria::for_type::<AttendanceLog>()
        .with_search(&query.search)
        .with_filter("batch", Choice::from_option(query.batch.as_deref()));
    if let Some(d) = query.date {
        criteria = criteria.with_filter("date", Choice::Exactly(d.format("%Y-%m-%d").to_string()));
    }

    filter::apply(logs, &criteria, None)
        .into_iter()
        .filter(|l| query.view == HistoryView::All || !l.status.is_present())
        .collect()
}

/// Tally over every log, regardless of the current filters.
pub fn history_counts(logs: &[AttendanceLog]) -> AttendanceCounts {
    logs.iter().map(|l| l.status).collect()
}

/// Removes exactly one log. An unknown id is reported as not found.
pub fn delete_single<R: AttendanceRepository + ?Sized>(
    repo: &mut R,
    id: &str,
    confirmation: Confirmation,
) -> AppResult<DeleteOutcome> {
    let log = repo
        .get(id)?
        .ok_or_else(|| AppError::LogNotFound(id.to_string()))?;

    if confirmation != Confirmation::Confirmed {
        return Ok(DeleteOutcome::Cancelled);
    }

    let removed = usize::from(repo.delete(id)?);
    repo.record_operation(
        "del",
        id,
        &format!("{} on {}", log.student_name, log.date_str()),
    )?;
    Ok(DeleteOutcome::Deleted(removed))
}

/// Removes every log dated exactly `date`.
pub fn delete_by_date<R: AttendanceRepository + ?Sized>(
    repo: &mut R,
    date: NaiveDate,
    confirmation: Confirmation,
) -> AppResult<DeleteOutcome> {
    if confirmation != Confirmation::Confirmed {
        return Ok(DeleteOutcome::Cancelled);
    }

    let removed = repo.delete_by_date(date)?;
    repo.record_operation(
        "del",
        &date.to_string(),
        &format!("{removed} records deleted"),
    )?;
    Ok(DeleteOutcome::Deleted(removed))
}
