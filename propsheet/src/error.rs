//! All error types for the propsheet crate.
//!
//! These are returned from every fallible operation (line parsing, filename
//! synthesis, sheet I/O, import/export).

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// A required parameter is missing or invalid; the operation was never attempted.
    #[error("validation error: {0}")]
    Validation(String),

    /// A property line or filename that cannot be interpreted. Aborts the run,
    /// since a corrupt line usually means the whole file is suspect.
    #[error("format error: {0}")]
    Format(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Creates a new validation error
    pub fn validation_error(message: impl Into<String>) -> Self {
        Error::Validation(message.into())
    }

    /// Creates a new format error
    pub fn format_error(message: impl Into<String>) -> Self {
        Error::Format(message.into())
    }
}
