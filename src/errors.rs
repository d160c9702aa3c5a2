//! Unified application error type.
//! Roster, attendance, statistics, storage and CLI code all return AppError
//! so that failures surface the same way from every command.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO / serialization
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    // ---------------------------
    // Database-related
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("Database migration error: {0}")]
    Migration(String),

    // ---------------------------
    // Parsing errors
    // ---------------------------
    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    #[error("Invalid attendance status: {0}")]
    InvalidStatus(String),

    #[error("Invalid sort specification: {0}")]
    InvalidSort(String),

    #[error("Invalid filter: {0}")]
    InvalidFilter(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    // ---------------------------
    // Roster errors
    // ---------------------------
    #[error("Student not found: {0}")]
    StudentNotFound(String),

    #[error("Record not found: {0}")]
    RecordNotFound(String),

    #[error("A student with id {0} already exists")]
    DuplicateId(String),

    #[error("A student with NIM {0} already exists")]
    DuplicateNim(String),

    #[error("Missing required fields: {}", .0.join(", "))]
    Validation(Vec<String>),

    // ---------------------------
    // Attendance errors
    // ---------------------------
    #[error("Attendance log not found: {0}")]
    LogNotFound(String),

    #[error("No attendance data to save. Please mark student attendance first.")]
    NothingToSave,

    #[error("Proof of absence required for: {}", .0.join(", "))]
    MissingProof(Vec<String>),

    #[error("Proof can only be attached to Izin or Sakit rows: {0}")]
    ProofNotAllowed(String),

    #[error("Students marked present cannot carry a note: {0}")]
    NoteNotAllowed(String),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    // ---------------------------
    // Export errors
    // ---------------------------
    #[error("Export error: {0}")]
    Export(String),

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

pub type AppResult<T> = Result<T, AppError>;
