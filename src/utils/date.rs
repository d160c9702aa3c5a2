use crate::errors::{AppError, AppResult};
use chrono::NaiveDate;

pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// Strict `YYYY-MM-DD`.
pub fn parse_date(s: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|_| AppError::InvalidDate(s.to_string()))
}

/// `None` and empty input both mean "no date".
pub fn parse_optional_date(input: Option<&str>) -> AppResult<Option<NaiveDate>> {
    match input.map(str::trim) {
        Some(s) if !s.is_empty() => parse_date(s).map(Some),
        _ => Ok(None),
    }
}

/// e.g. "Tuesday, 24 October 2023"
pub fn long_date(d: NaiveDate) -> String {
    d.format("%A, %d %B %Y").to_string()
}
