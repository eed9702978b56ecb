//! Error types for the docquiz library.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for docquiz operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can stop an import.
///
/// Partial misses inside a question (no answer clause, no options) and
/// per-image extraction failures are not errors; they are logged and the
/// affected fields stay empty.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading the document or writing output.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The input path does not exist.
    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),

    /// The file is not a Word .docx document.
    #[error("Invalid file format: {0}")]
    InvalidFormat(String),

    /// The container opens but its structure is broken.
    #[error("Invalid .docx file: {0}")]
    InvalidDocx(String),

    /// Error reading the ZIP container.
    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// Error parsing a package XML part.
    #[error("XML error: {0}")]
    Xml(String),

    /// Error serializing the result set.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The background extraction task did not complete.
    #[error("Extraction task failed: {0}")]
    Task(String),
}

impl From<quick_xml::Error> for Error {
    fn from(err: quick_xml::Error) -> Self {
        Error::Xml(err.to_string())
    }
}
