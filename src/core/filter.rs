//! Search, category filters and stable sorting over in-memory collections.
//!
//! `apply` never touches its input: it clones the matching items into a new
//! vector and sorts that. Running it twice on the same input yields the same
//! output.

use crate::errors::{AppError, AppResult};
use crate::models::{AttendanceEntry, AttendanceLog, StudentProfile};
use std::borrow::Cow;
use std::cmp::Ordering;

/// A field value as seen by the engine.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue<'a> {
    Text(Cow<'a, str>),
    Number(f64),
}

/// Items the engine can search, filter and sort.
pub trait Fields {
    /// Fields the free-text search looks at by default.
    const TEXT_FIELDS: &'static [&'static str];
    /// Fields accepting an equality filter.
    const CATEGORY_FIELDS: &'static [&'static str];
    /// Fields accepted as sort keys.
    const SORT_KEYS: &'static [&'static str];

    fn field(&self, key: &str) -> Option<FieldValue<'_>>;
}

/// Either no constraint or an exact value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Choice {
    All,
    Exactly(String),
}

impl Choice {
    /// `All`, `all`, `All Batch`, `All Majors` and an empty string are the
    /// "no constraint" sentinel.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        let lower = trimmed.to_lowercase();
        if lower.is_empty() || lower == "all" || lower.starts_with("all ") {
            Choice::All
        } else {
            Choice::Exactly(trimmed.to_string())
        }
    }

    pub fn from_option(raw: Option<&str>) -> Self {
        raw.map(Self::parse).unwrap_or(Choice::All)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryFilter {
    pub field: String,
    pub choice: Choice,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Criteria {
    pub search: String,
    pub search_fields: Vec<String>,
    pub filters: Vec<CategoryFilter>,
}

impl Criteria {
    /// Empty search over the default text fields of `T`.
    pub fn for_type<T: Fields>() -> Self {
        Self {
            search: String::new(),
            search_fields: T::TEXT_FIELDS.iter().map(|f| f.to_string()).collect(),
            filters: Vec::new(),
        }
    }

    pub fn with_search(mut self, term: &str) -> Self {
        self.search = term.to_string();
        self
    }

    pub fn with_filter(mut self, field: &str, choice: Choice) -> Self {
        self.filters.push(CategoryFilter {
            field: field.to_string(),
            choice,
        });
        self
    }

    /// Rejects fields `T` does not expose.
    pub fn validate<T: Fields>(&self) -> AppResult<()> {
        for f in &self.search_fields {
            if !T::TEXT_FIELDS.contains(&f.as_str()) {
                return Err(AppError::InvalidFilter(format!("unknown search field '{f}'")));
            }
        }
        for f in &self.filters {
            if !T::CATEGORY_FIELDS.contains(&f.field.as_str()) {
                return Err(AppError::InvalidFilter(format!(
                    "unknown filter field '{}'",
                    f.field
                )));
            }
        }
        Ok(())
    }

    pub fn matches<T: Fields>(&self, item: &T) -> bool {
        self.matches_search(item) && self.filters.iter().all(|f| filter_matches(f, item))
    }

    fn matches_search<T: Fields>(&self, item: &T) -> bool {
        let needle = self.search.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }

        self.search_fields
            .iter()
            .any(|f| match item.field(f) {
                Some(FieldValue::Text(text)) => text.to_lowercase().contains(&needle),
                Some(FieldValue::Number(n)) => n.to_string().contains(&needle),
                None => false,
            })
    }
}

fn filter_matches<T: Fields>(filter: &CategoryFilter, item: &T) -> bool {
    let Choice::Exactly(wanted) = &filter.choice else {
        return true;
    };

    match item.field(&filter.field) {
        Some(FieldValue::Text(text)) => text.as_ref() == wanted.as_str(),
        Some(FieldValue::Number(n)) => wanted.parse::<f64>().is_ok_and(|w| w == n),
        None => false,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortSpec {
    pub key: String,
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn asc(key: &str) -> Self {
        Self {
            key: key.to_string(),
            direction: SortDirection::Asc,
        }
    }

    pub fn desc(key: &str) -> Self {
        Self {
            key: key.to_string(),
            direction: SortDirection::Desc,
        }
    }

    /// `KEY`, `KEY:asc` or `KEY:desc`, checked against the sort keys of `T`.
    pub fn parse<T: Fields>(raw: &str) -> AppResult<Self> {
        let (key, dir) = match raw.split_once(':') {
            Some((k, d)) => (k.trim(), d.trim()),
            None => (raw.trim(), "asc"),
        };

        if !T::SORT_KEYS.contains(&key) {
            return Err(AppError::InvalidSort(format!(
                "'{key}' (expected one of: {})",
                T::SORT_KEYS.join(", ")
            )));
        }

        let direction = match dir.to_lowercase().as_str() {
            "asc" => SortDirection::Asc,
            "desc" => SortDirection::Desc,
            other => return Err(AppError::InvalidSort(format!("direction '{other}'"))),
        };

        Ok(Self {
            key: key.to_string(),
            direction,
        })
    }
}

/// Numbers before text, missing values last.
fn compare_values(a: Option<FieldValue<'_>>, b: Option<FieldValue<'_>>) -> Ordering {
    match (a, b) {
        (Some(FieldValue::Text(x)), Some(FieldValue::Text(y))) => {
            x.to_lowercase().cmp(&y.to_lowercase())
        }
        (Some(FieldValue::Number(x)), Some(FieldValue::Number(y))) => {
            x.partial_cmp(&y).unwrap_or(Ordering::Equal)
        }
        (Some(FieldValue::Number(_)), Some(FieldValue::Text(_))) => Ordering::Less,
        (Some(FieldValue::Text(_)), Some(FieldValue::Number(_))) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Filter then sort. Ties keep their input order in both directions.
pub fn apply<T: Fields + Clone>(items: &[T], criteria: &Criteria, sort: Option<&SortSpec>) -> Vec<T> {
    let mut out: Vec<T> = items
        .iter()
        .filter(|item| criteria.matches(*item))
        .cloned()
        .collect();

    if let Some(spec) = sort {
        out.sort_by(|a, b| {
            let ord = compare_values(a.field(&spec.key), b.field(&spec.key));
            match spec.direction {
                SortDirection::Asc => ord,
                SortDirection::Desc => ord.reverse(),
            }
        });
    }

    out
}

impl Fields for StudentProfile {
    const TEXT_FIELDS: &'static [&'static str] = &["name", "nim", "email"];
    const CATEGORY_FIELDS: &'static [&'static str] =
        &["major", "batch", "gender", "status", "tuition_status"];
    const SORT_KEYS: &'static [&'static str] =
        &["name", "nim", "gpa", "batch", "pct", "total_credits"];

    fn field(&self, key: &str) -> Option<FieldValue<'_>> {
        let value = match key {
            "id" => FieldValue::Text(Cow::Borrowed(&self.id)),
            "name" => FieldValue::Text(Cow::Borrowed(&self.name)),
            "nim" => FieldValue::Text(Cow::Borrowed(&self.nim)),
            "email" => FieldValue::Text(Cow::Borrowed(&self.email)),
            "major" => FieldValue::Text(Cow::Borrowed(&self.major)),
            "batch" => FieldValue::Text(Cow::Borrowed(&self.batch)),
            "gender" => FieldValue::Text(Cow::Borrowed(self.gender.as_str())),
            "status" => FieldValue::Text(Cow::Borrowed(self.status.as_str())),
            "tuition_status" => FieldValue::Text(Cow::Borrowed(self.tuition_status.as_str())),
            "gpa" => FieldValue::Number(self.gpa),
            "pct" => FieldValue::Number(self.pct() as f64),
            "total_credits" => FieldValue::Number(self.total_credits as f64),
            _ => return None,
        };
        Some(value)
    }
}

impl Fields for AttendanceEntry {
    const TEXT_FIELDS: &'static [&'static str] = &["name", "nim"];
    const CATEGORY_FIELDS: &'static [&'static str] = &["batch", "major", "status"];
    const SORT_KEYS: &'static [&'static str] = &["name", "nim", "batch"];

    fn field(&self, key: &str) -> Option<FieldValue<'_>> {
        let value = match key {
            "student_id" => FieldValue::Text(Cow::Borrowed(&self.student_id)),
            "name" => FieldValue::Text(Cow::Borrowed(&self.name)),
            "nim" => FieldValue::Text(Cow::Borrowed(&self.nim)),
            "batch" => FieldValue::Text(Cow::Borrowed(&self.batch)),
            "major" => FieldValue::Text(Cow::Borrowed(&self.major)),
            "status" => FieldValue::Text(Cow::Borrowed(
                self.status.map(|s| s.code()).unwrap_or("unset"),
            )),
            _ => return None,
        };
        Some(value)
    }
}

impl Fields for AttendanceLog {
    const TEXT_FIELDS: &'static [&'static str] = &["student_name", "nim"];
    const CATEGORY_FIELDS: &'static [&'static str] = &["batch", "date", "status"];
    const SORT_KEYS: &'static [&'static str] = &["date", "student_name", "nim", "status"];

    fn field(&self, key: &str) -> Option<FieldValue<'_>> {
        let value = match key {
            "id" => FieldValue::Text(Cow::Borrowed(&self.id)),
            "student_name" => FieldValue::Text(Cow::Borrowed(&self.student_name)),
            "nim" => FieldValue::Text(Cow::Borrowed(&self.nim)),
            "batch" => FieldValue::Text(Cow::Borrowed(&self.batch)),
            "status" => FieldValue::Text(Cow::Borrowed(self.status.code())),
            // ISO dates sort correctly as text
            "date" => FieldValue::Text(Cow::Owned(self.date_str())),
            _ => return None,
        };
        Some(value)
    }
}
