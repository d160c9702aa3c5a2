//! Per-student academic summary cards and semester-over-semester trends.

use crate::core::stats::Trend;
use crate::models::StudentProfile;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AcademicScope {
    /// Cumulative figures.
    Overview,
    /// One semester, by `SemesterResult::id`.
    Semester(String),
}

impl AcademicScope {
    pub fn parse(raw: &str) -> Self {
        if raw.trim().eq_ignore_ascii_case("overview") {
            AcademicScope::Overview
        } else {
            AcademicScope::Semester(raw.trim().to_string())
        }
    }
}

/// One summary card.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AcademicStat {
    pub label: String,
    pub value: String,
    pub trend: Option<Trend>,
    pub subtext: Option<String>,
}

impl AcademicStat {
    fn plain(label: &str, value: String, subtext: Option<&str>) -> Self {
        Self {
            label: label.to_string(),
            value,
            trend: None,
            subtext: subtext.map(str::to_string),
        }
    }
}

/// Cards for `scope`. An unknown semester id yields no cards.
pub fn academic_stats(student: &StudentProfile, scope: &AcademicScope) -> Vec<AcademicStat> {
    let history = &student.academic_history;

    match scope {
        AcademicScope::Overview => {
            // needs two closed semesters to compare against
            let previous = history
                .len()
                .checked_sub(2)
                .map(|idx| history[idx].cumulative_gpa);

            vec![
                AcademicStat {
                    label: "Cumulative GPA (IPK)".to_string(),
                    value: format!("{:.2}", student.gpa),
                    trend: Some(Trend::between(student.gpa, previous)),
                    subtext: Some("vs prev. semester IPK".to_string()),
                },
                AcademicStat::plain(
                    "Total Credits (SKS)",
                    student.total_credits.to_string(),
                    Some("Total Accumulated"),
                ),
                AcademicStat::plain("Achievements", student.achievement_count.to_string(), None),
                AcademicStat::plain(
                    "Discipline Points",
                    student.discipline_points.to_string(),
                    None,
                ),
            ]
        }
        AcademicScope::Semester(id) => {
            let Some(idx) = history.iter().position(|h| &h.id == id) else {
                return Vec::new();
            };
            let current = &history[idx];
            let previous = idx.checked_sub(1).map(|p| &history[p]);

            vec![
                AcademicStat {
                    label: "Semester GPA (IPS)".to_string(),
                    value: format!("{:.2}", current.gpa),
                    trend: previous.map(|p| Trend::between(current.gpa, Some(p.gpa))),
                    subtext: Some(
                        if previous.is_some() {
                            "vs prev. semester IPS"
                        } else {
                            "First Semester"
                        }
                        .to_string(),
                    ),
                },
                AcademicStat::plain(
                    "Credits Taken (SKS)",
                    current.credits.to_string(),
                    Some("Taken this semester"),
                ),
                AcademicStat::plain("Achievements", "-".to_string(), Some("Data not filtered")),
                AcademicStat::plain(
                    "Discipline Points",
                    "-".to_string(),
                    Some("Data not filtered"),
                ),
            ]
        }
    }
}

/// Credit delta between a semester and the one before it.
pub fn credit_delta(student: &StudentProfile, semester_id: &str) -> Option<i64> {
    let history = &student.academic_history;
    let idx = history.iter().position(|h| h.id == semester_id)?;
    let prev = history.get(idx.checked_sub(1)?)?;
    Some(history[idx].credits as i64 - prev.credits as i64)
}
