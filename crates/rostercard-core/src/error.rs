use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RosterError {
    #[error("Roster source not found: {}", .0.display())]
    SourceNotFound(PathBuf),

    #[error("Error reading roster source: {0}")]
    SourceReadError(#[from] std::io::Error),

    #[error("Roster source contained no entries")]
    EmptySource,

    #[error("Malformed row: {0}")]
    MalformedRow(#[from] ParseWarning),
}

/// A data row that did not carry the three required fields.
///
/// `line` is 1-based and counts the header line.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("Line {line} has only {fields} fields")]
pub struct ParseWarning {
    pub line: usize,
    pub fields: usize,
}

impl RosterError {
    /// Classify an I/O error raised while opening the source.
    pub fn from_open(path: PathBuf, err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => RosterError::SourceNotFound(path),
            _ => RosterError::SourceReadError(err),
        }
    }
}
