//! Native document files.
//!
//! A document file is exactly the JSON serialization of the host
//! snapshot: no envelope, version or checksum.

use thiserror::Error;
use web_time::{SystemTime, UNIX_EPOCH};

use crate::host::Snapshot;

/// Document file errors.
#[derive(Debug, Error)]
pub enum SnapshotFileError {
    #[error("Serialization error: {0}")]
    Serialize(String),
    #[error("Invalid document file: {0}")]
    Parse(String),
}

/// Result type for document file operations.
pub type SnapshotFileResult<T> = Result<T, SnapshotFileError>;

/// Serialize a snapshot to file contents.
pub fn encode_snapshot(snapshot: &Snapshot) -> SnapshotFileResult<Vec<u8>> {
    serde_json::to_vec(snapshot).map_err(|e| SnapshotFileError::Serialize(e.to_string()))
}

/// Parse file contents back into a snapshot.
pub fn decode_snapshot(bytes: &[u8]) -> SnapshotFileResult<Snapshot> {
    let text = std::str::from_utf8(bytes).map_err(|e| SnapshotFileError::Parse(e.to_string()))?;
    serde_json::from_str(text).map_err(|e| SnapshotFileError::Parse(e.to_string()))
}

/// Append `.ext` unless `name` already ends with it.
pub fn ensure_extension(name: &str, extension: &str) -> String {
    let suffix = format!(".{}", extension);
    if name.to_lowercase().ends_with(&suffix.to_lowercase()) {
        name.to_string()
    } else {
        format!("{}{}", name, suffix)
    }
}

/// `<prefix>-<millis>`, without extension.
pub fn timestamped_stem(prefix: &str, unix_millis: u128) -> String {
    format!("{}-{}", prefix, unix_millis)
}

/// Milliseconds since the Unix epoch.
pub fn unix_millis() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or_default()
}
