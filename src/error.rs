//! Error types for classhelper

use thiserror::Error;

/// Result type for classhelper operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while reading sections and preferences
#[derive(Error, Debug)]
pub enum Error {
    /// A clock string or meeting token does not match the expected grammar
    #[error("Format error in {input:?}: {reason}")]
    Format { input: String, reason: String },

    /// A meeting that does not end after it starts
    #[error("Invalid interval in {input:?}: start {start} is not before end {end}")]
    InvalidInterval { input: String, start: u16, end: u16 },

    /// The section table lacks a required column
    #[error("Missing column: {0}")]
    MissingColumn(String),

    /// Error raised by the section table
    #[error("Catalog error: {0}")]
    Catalog(#[from] polars::prelude::PolarsError),

    /// Preferences file could not be deserialized
    #[error("Config error: {0}")]
    Config(#[from] toml::de::Error),

    /// I/O error (file operations)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn format(input: &str, reason: impl Into<String>) -> Self {
        Error::Format {
            input: input.to_string(),
            reason: reason.into(),
        }
    }
}
