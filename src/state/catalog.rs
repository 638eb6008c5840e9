/// Catalog ingestion
///
/// Turns the raw text of a catalog file into course records. The whole
/// document is parsed at once: either every record is produced or the
/// load is rejected with a `ParseError`.
use serde_json::Value;
use std::path::{Path, PathBuf};
use thiserror::Error;

use super::course::CourseRecord;

/// Message shown to the user for any rejected catalog file
pub const INVALID_FILE_MESSAGE: &str = "Error: Invalid JSON file format.";

/// Why a catalog file could not be loaded
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    #[error("failed to read {}: {reason}", .path.display())]
    Read { path: PathBuf, reason: String },

    #[error("malformed JSON: {0}")]
    Syntax(String),

    #[error("expected a JSON array of course objects at the top level")]
    NotAnArray,

    #[error("element {index} is not a JSON object")]
    NotAnObject { index: usize },
}

/// Parse a catalog document into course records, in file order
pub fn parse(raw: &str) -> Result<Vec<CourseRecord>, ParseError> {
    let document: Value =
        serde_json::from_str(raw).map_err(|e| ParseError::Syntax(e.to_string()))?;

    let elements = match document {
        Value::Array(elements) => elements,
        _ => return Err(ParseError::NotAnArray),
    };

    elements
        .iter()
        .enumerate()
        .map(|(index, element)| {
            element
                .as_object()
                .map(CourseRecord::from_object)
                .ok_or(ParseError::NotAnObject { index })
        })
        .collect()
}

/// Read the raw text of a catalog file
///
/// Runs on the async executor so the UI stays responsive while the file
/// is read. Read failures are reported as a `ParseError::Read`.
pub async fn read_catalog_file(path: PathBuf) -> Result<String, ParseError> {
    tokio::fs::read_to_string(&path)
        .await
        .map_err(|e| read_error(&path, e))
}

fn read_error(path: &Path, err: std::io::Error) -> ParseError {
    ParseError::Read {
        path: path.to_path_buf(),
        reason: err.to_string(),
    }
}
