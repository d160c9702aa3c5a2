//! Formatting utilities used for CLI and export outputs.

use crate::core::stats::Trend;

pub fn bold(s: &str) -> String {
    if std::env::var_os("NO_COLOR").is_some() {
        return s.to_string();
    }
    format!("\x1b[1m{}\x1b[0m", s)
}

/// Rupiah with dot thousands separators: `Rp 5.500.000`.
pub fn format_idr(amount: u64) -> String {
    let digits = amount.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);

    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }
    format!("Rp {grouped}")
}

pub fn format_gpa(gpa: f64) -> String {
    format!("{:.2}", gpa)
}

pub fn format_percent(pct: u32) -> String {
    format!("{pct}%")
}

/// `↑ 6.7%` / `↓ 2.5%`
pub fn format_trend(trend: &Trend) -> String {
    format!("{} {:.1}%", trend.direction.arrow(), trend.magnitude())
}

/// `42/144 SKS (29%)`
pub fn format_credits(total: u32, target: u32, progress: u32) -> String {
    format!("{total}/{target} SKS ({progress}%)")
}
