//! Unified application error type.
//! All modules (core, config, cli, report) return AppError to keep the error
//! handling consistent and easy to manage.

use std::io;
use thiserror::Error;

/// Reasons a dataset could not be turned into a case table.
/// A load error always halts the pipeline: no partial table is produced.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("missing header row")]
    MissingHeader,

    #[error("duplicate column name in header: {0}")]
    DuplicateColumn(String),

    #[error("file is not valid UTF-8 (line {line})")]
    Encoding { line: u64 },

    #[error("line {line}: expected at most {expected} fields, found {found}")]
    Malformed {
        line: u64,
        expected: usize,
        found: usize,
    },

    #[error("CSV parse error: {0}")]
    Csv(String),
}

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Dataset loading
    // ---------------------------
    #[error("Unable to load dataset: {0}")]
    Load(#[from] LoadError),

    // ---------------------------
    // Selection errors
    // ---------------------------
    #[error("Unknown column: {0}")]
    UnknownColumn(String),

    #[error("Unknown metric: {0} (expected plusone or gustave)")]
    UnknownMetric(String),

    #[error("No dataset loaded")]
    NoDataset,

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to load configuration")]
    ConfigLoad,

    #[error("Failed to save configuration")]
    ConfigSave,

    // ---------------------------
    // Session
    // ---------------------------
    #[error("Invalid session command: {0}")]
    InvalidCommand(String),

    // ---------------------------
    // Output
    // ---------------------------
    #[error("Render error: {0}")]
    Render(String),
}

pub type AppResult<T> = Result<T, AppError>;
