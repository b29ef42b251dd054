//! Collection export to a dated JSON file.
//!
//! # Responsibility
//! - Serialize the full collection as formatted JSON.
//! - Name the output file with the current calendar date.
//!
//! # Invariants
//! - An empty collection produces no file.
//! - The export never mutates the collection.

use crate::model::Record;
use chrono::{Local, NaiveDate};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::fs;
use std::path::{Path, PathBuf};

/// Export-layer error for serialization and file writing.
#[derive(Debug)]
pub enum ExportError {
    Io(std::io::Error),
    Serialize(serde_json::Error),
}

impl Display for ExportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "failed to write export file: {err}"),
            Self::Serialize(err) => write!(f, "failed to serialize collection: {err}"),
        }
    }
}

impl Error for ExportError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Serialize(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for ExportError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for ExportError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialize(value)
    }
}

/// File name for an export performed on `date`.
pub fn export_file_name(date: NaiveDate) -> String {
    format!("reduto_cadastros_{}.json", date.format("%Y-%m-%d"))
}

/// Writes the collection as pretty-printed JSON into `dir`.
///
/// Returns `Ok(None)` without touching the filesystem when the collection
/// is empty; the caller decides how to notify the user.
pub fn export_all(records: &[Record], dir: &Path) -> Result<Option<PathBuf>, ExportError> {
    if records.is_empty() {
        return Ok(None);
    }

    let payload = serde_json::to_string_pretty(records)?;
    let path = dir.join(export_file_name(Local::now().date_naive()));
    fs::write(&path, payload)?;
    Ok(Some(path))
}
