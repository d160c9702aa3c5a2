//! Roster-wide percentages, counts and trends.

use crate::config::AtRiskPolicy;
use crate::models::{
    AttendanceCounts, AttendanceStanding, EnrollmentStatus, StandingThresholds, StudentProfile,
};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Up,
    Down,
}

impl TrendDirection {
    pub fn arrow(&self) -> &'static str {
        match self {
            TrendDirection::Up => "↑",
            TrendDirection::Down => "↓",
        }
    }
}

/// Signed change in percent plus its direction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Trend {
    pub delta: f64,
    pub direction: TrendDirection,
}

impl Trend {
    pub fn between(current: f64, previous: Option<f64>) -> Self {
        let delta = trend_delta(current, previous);
        Self {
            delta,
            direction: if delta >= 0.0 {
                TrendDirection::Up
            } else {
                TrendDirection::Down
            },
        }
    }

    /// Magnitude shown next to the arrow.
    pub fn magnitude(&self) -> f64 {
        self.delta.abs()
    }
}

/// Percent change from `previous` to `current`, one decimal.
/// A zero or absent previous value yields 0.
pub fn trend_delta(current: f64, previous: Option<f64>) -> f64 {
    match previous {
        Some(prev) if prev != 0.0 && prev.is_finite() => {
            let raw = (current - prev) / prev * 100.0;
            let rounded = (raw * 10.0).round() / 10.0;
            if rounded.is_finite() { rounded } else { 0.0 }
        }
        _ => 0.0,
    }
}

/// Whole-percent shares of `parts`, summing to exactly 100 when the total is
/// non-zero. Leftover points go to the largest remainders, earlier parts
/// winning ties.
pub fn percent_breakdown(parts: &[u32]) -> Vec<u32> {
    let total: u64 = parts.iter().map(|&p| p as u64).sum();
    if total == 0 {
        return vec![0; parts.len()];
    }

    let mut shares: Vec<u32> = Vec::with_capacity(parts.len());
    let mut remainders: Vec<(usize, u64)> = Vec::with_capacity(parts.len());
    for (idx, &p) in parts.iter().enumerate() {
        let scaled = p as u64 * 100;
        shares.push((scaled / total) as u32);
        remainders.push((idx, scaled % total));
    }

    let assigned: u32 = shares.iter().sum();
    remainders.sort_by(|a, b| b.1.cmp(&a.1));
    for (idx, _) in remainders.iter().take((100 - assigned) as usize) {
        shares[*idx] += 1;
    }
    shares
}

/// Student flagged by the at-risk policy.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AtRiskStudent {
    pub id: String,
    pub name: String,
    pub nim: String,
    pub alpha: u32,
    pub absence_ratio: f64,
    pub pct: u32,
}

/// Students over either threshold, most unexcused absences first.
pub fn at_risk(students: &[StudentProfile], policy: &AtRiskPolicy) -> Vec<AtRiskStudent> {
    let mut flagged: Vec<AtRiskStudent> = students
        .iter()
        .filter_map(|s| {
            let counts = s.attendance();
            let ratio = counts.absence_ratio();
            let over = (policy.min_alpha > 0 && counts.a >= policy.min_alpha)
                || (counts.a > 0 && ratio >= policy.max_absence_ratio);
            over.then(|| AtRiskStudent {
                id: s.id.clone(),
                name: s.name.clone(),
                nim: s.nim.clone(),
                alpha: counts.a,
                absence_ratio: ratio,
                pct: counts.pct(),
            })
        })
        .collect();

    flagged.sort_by(|a, b| b.alpha.cmp(&a.alpha));
    flagged
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StandingShare {
    pub standing: AttendanceStanding,
    pub count: u32,
    pub percent: u32,
}

/// Headline numbers for the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSummary {
    pub students: usize,
    pub active: usize,
    /// Mean of per-student percentages, one decimal.
    pub average_pct: f64,
    /// Students whose every recorded day is H.
    pub perfect_attendance: usize,
    /// Warning + Critical.
    pub warnings: usize,
    pub totals: AttendanceCounts,
    pub standings: Vec<StandingShare>,
}

pub fn dashboard_summary(
    students: &[StudentProfile],
    thresholds: &StandingThresholds,
) -> DashboardSummary {
    let mut totals = AttendanceCounts::default();
    let mut per_standing = [0u32; 4];
    let mut pct_sum = 0u64;
    let mut perfect = 0;
    let mut active = 0;

    for s in students {
        let counts = s.attendance();
        totals += counts;

        pct_sum += counts.pct() as u64;
        if counts.total > 0 && counts.h == counts.total {
            perfect += 1;
        }
        if s.status == EnrollmentStatus::Active {
            active += 1;
        }

        let standing = counts.standing(thresholds);
        let idx = AttendanceStanding::ALL
            .iter()
            .position(|st| *st == standing)
            .unwrap_or(3);
        per_standing[idx] += 1;
    }

    let average_pct = if students.is_empty() {
        0.0
    } else {
        (pct_sum as f64 / students.len() as f64 * 10.0).round() / 10.0
    };

    let percents = percent_breakdown(&per_standing);
    let standings = AttendanceStanding::ALL
        .iter()
        .zip(per_standing.iter().zip(percents))
        .map(|(standing, (count, percent))| StandingShare {
            standing: *standing,
            count: *count,
            percent,
        })
        .collect::<Vec<_>>();

    let warnings = standings
        .iter()
        .filter(|s| s.standing.needs_attention())
        .map(|s| s.count as usize)
        .sum();

    DashboardSummary {
        students: students.len(),
        active,
        average_pct,
        perfect_attendance: perfect,
        warnings,
        totals,
        standings,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupBy {
    Major,
    Batch,
}

impl GroupBy {
    pub fn key<'a>(&self, s: &'a StudentProfile) -> &'a str {
        match self {
            GroupBy::Major => &s.major,
            GroupBy::Batch => &s.batch,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupAttendance {
    pub label: String,
    pub count: usize,
    pub average_pct: f64,
}

/// Average attendance per major or batch, best group first.
pub fn compare_groups(students: &[StudentProfile], by: GroupBy) -> Vec<GroupAttendance> {
    let mut groups: Vec<(String, usize, u64)> = Vec::new();
    for s in students {
        let key = by.key(s);
        match groups.iter_mut().find(|(label, _, _)| label == key) {
            Some(group) => {
                group.1 += 1;
                group.2 += s.pct() as u64;
            }
            None => groups.push((key.to_string(), 1, s.pct() as u64)),
        }
    }

    let mut out: Vec<GroupAttendance> = groups
        .into_iter()
        .map(|(label, count, sum)| GroupAttendance {
            label,
            count,
            average_pct: (sum as f64 / count as f64 * 10.0).round() / 10.0,
        })
        .collect();

    out.sort_by(|a, b| {
        b.average_pct
            .partial_cmp(&a.average_pct)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    out
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LowGpaStudent {
    pub id: String,
    pub name: String,
    pub nim: String,
    pub major: String,
    pub gpa: f64,
    /// Cumulative GPA at the close of the second-to-last semester.
    pub previous_gpa: Option<f64>,
    pub trend: Trend,
}

/// Students below `threshold`, lowest GPA first.
pub fn low_gpa_watch(students: &[StudentProfile], threshold: f64) -> Vec<LowGpaStudent> {
    let mut out: Vec<LowGpaStudent> = students
        .iter()
        .filter(|s| s.gpa < threshold)
        .map(|s| {
            let history = &s.academic_history;
            let previous_gpa = history
                .len()
                .checked_sub(2)
                .map(|idx| history[idx].cumulative_gpa);
            LowGpaStudent {
                id: s.id.clone(),
                name: s.name.clone(),
                nim: s.nim.clone(),
                major: s.major.clone(),
                gpa: s.gpa,
                previous_gpa,
                trend: Trend::between(s.gpa, previous_gpa),
            }
        })
        .collect();

    out.sort_by(|a, b| a.gpa.partial_cmp(&b.gpa).unwrap_or(std::cmp::Ordering::Equal));
    out
}
