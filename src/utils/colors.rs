//! ANSI color helpers for table cells.
use crate::core::stats::{Trend, TrendDirection};
use crate::models::{AttendanceStanding, AttendanceStatus, PaymentStatus, TuitionStatus};

pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";
pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";
pub const YELLOW: &str = "\x1b[33m";
pub const BLUE: &str = "\x1b[34m";
pub const CYAN: &str = "\x1b[36m";

pub fn paint(value: &str, color: &str) -> String {
    if std::env::var_os("NO_COLOR").is_some() {
        value.to_string()
    } else {
        format!("{color}{value}{RESET}")
    }
}

pub fn color_for_status(status: Option<AttendanceStatus>) -> &'static str {
    match status {
        Some(AttendanceStatus::Present) => GREEN,
        Some(AttendanceStatus::Permitted) => BLUE,
        Some(AttendanceStatus::Sick) => YELLOW,
        Some(AttendanceStatus::Absent) => RED,
        None => GREY,
    }
}

pub fn color_for_standing(standing: AttendanceStanding) -> &'static str {
    match standing {
        AttendanceStanding::Excellent => GREEN,
        AttendanceStanding::Good => CYAN,
        AttendanceStanding::Warning => YELLOW,
        AttendanceStanding::Critical => RED,
    }
}

pub fn color_for_tuition(status: TuitionStatus) -> &'static str {
    match status {
        TuitionStatus::Paid => GREEN,
        TuitionStatus::Pending => YELLOW,
        TuitionStatus::Unpaid => RED,
    }
}

pub fn color_for_payment(status: PaymentStatus) -> &'static str {
    match status {
        PaymentStatus::Paid => GREEN,
        PaymentStatus::Pending => YELLOW,
        PaymentStatus::Unpaid | PaymentStatus::Overdue => RED,
    }
}

/// Up → green, down → red, flat → reset
pub fn color_for_trend(trend: &Trend) -> &'static str {
    if trend.delta == 0.0 {
        RESET
    } else {
        match trend.direction {
            TrendDirection::Up => GREEN,
            TrendDirection::Down => RED,
        }
    }
}
