//! Error types for the catalog crate.
//!
//! Per-row normalization failures never escape `normalize_rows`; they are
//! logged and the row is skipped. The variants here surface from the
//! single-row entry points and from loaders.

use thiserror::Error;

/// Errors that can occur while loading or normalizing course rows
#[derive(Error, Debug)]
pub enum CatalogError {
    /// I/O error occurred while reading a catalog file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Catalog payload was not valid JSON
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A row lacks a field needed to identify it
    #[error("Row {row} is missing required field `{field}`")]
    MissingField { row: usize, field: String },

    /// A row matches neither known backend shape
    #[error("Row {row} is not a recognized course row: {reason}")]
    UnrecognizedRow { row: usize, reason: String },

    /// The backend query itself failed
    #[error("Failed to fetch courses: {0}")]
    Fetch(String),
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, CatalogError>;
