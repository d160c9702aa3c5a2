use serde::{Deserialize, Serialize};
use std::ops::AddAssign;

use super::attendance_status::AttendanceStatus;

/// Bucketed view of an attendance percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttendanceStanding {
    Excellent,
    Good,
    Warning,
    Critical,
}

impl AttendanceStanding {
    pub const ALL: [AttendanceStanding; 4] = [
        AttendanceStanding::Excellent,
        AttendanceStanding::Good,
        AttendanceStanding::Warning,
        AttendanceStanding::Critical,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AttendanceStanding::Excellent => "Excellent",
            AttendanceStanding::Good => "Good",
            AttendanceStanding::Warning => "Warning",
            AttendanceStanding::Critical => "Critical",
        }
    }

    pub fn needs_attention(&self) -> bool {
        matches!(
            self,
            AttendanceStanding::Warning | AttendanceStanding::Critical
        )
    }
}

/// Lower bounds (inclusive, whole percent) of each standing bucket.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StandingThresholds {
    pub excellent: u32,
    pub good: u32,
    pub warning: u32,
}

impl Default for StandingThresholds {
    fn default() -> Self {
        Self {
            excellent: 90,
            good: 80,
            warning: 70,
        }
    }
}

impl StandingThresholds {
    pub fn classify(&self, pct: u32) -> AttendanceStanding {
        if pct >= self.excellent {
            AttendanceStanding::Excellent
        } else if pct >= self.good {
            AttendanceStanding::Good
        } else if pct >= self.warning {
            AttendanceStanding::Warning
        } else {
            AttendanceStanding::Critical
        }
    }
}

/// Per-status counters. Also used as the aggregate returned by a save.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceCounts {
    pub total: u32,
    pub h: u32,
    pub i: u32,
    pub s: u32,
    pub a: u32,
}

impl AttendanceCounts {
    pub fn from_counters(h: u32, i: u32, s: u32, a: u32) -> Self {
        Self {
            total: h.saturating_add(i).saturating_add(s).saturating_add(a),
            h,
            i,
            s,
            a,
        }
    }

    pub fn record(&mut self, status: AttendanceStatus) {
        self.total = self.total.saturating_add(1);
        let slot = match status {
            AttendanceStatus::Present => &mut self.h,
            AttendanceStatus::Permitted => &mut self.i,
            AttendanceStatus::Sick => &mut self.s,
            AttendanceStatus::Absent => &mut self.a,
        };
        *slot = slot.saturating_add(1);
    }

    pub fn get(&self, status: AttendanceStatus) -> u32 {
        match status {
            AttendanceStatus::Present => self.h,
            AttendanceStatus::Permitted => self.i,
            AttendanceStatus::Sick => self.s,
            AttendanceStatus::Absent => self.a,
        }
    }

    /// Share of present days, rounded to a whole percent.
    /// A student with no recorded days counts as fully present.
    pub fn pct(&self) -> u32 {
        if self.total == 0 {
            return 100;
        }
        ((self.h as f64 / self.total as f64) * 100.0).round() as u32
    }

    /// Share of unexcused absences in `[0, 1]`.
    pub fn absence_ratio(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.a as f64 / self.total as f64
    }

    pub fn standing(&self, thresholds: &StandingThresholds) -> AttendanceStanding {
        thresholds.classify(self.pct())
    }
}

/// Counters saturate instead of wrapping.
impl AddAssign for AttendanceCounts {
    fn add_assign(&mut self, other: Self) {
        self.total = self.total.saturating_add(other.total);
        self.h = self.h.saturating_add(other.h);
        self.i = self.i.saturating_add(other.i);
        self.s = self.s.saturating_add(other.s);
        self.a = self.a.saturating_add(other.a);
    }
}

impl FromIterator<AttendanceStatus> for AttendanceCounts {
    fn from_iter<T: IntoIterator<Item = AttendanceStatus>>(iter: T) -> Self {
        let mut counts = AttendanceCounts::default();
        for status in iter {
            counts.record(status);
        }
        counts
    }
}
