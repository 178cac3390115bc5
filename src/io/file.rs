//! Whole-file reads and writes for the path-based operations.
//!
//! Outputs are always fully materialized in memory before [`write_file`] is
//! called, so a failed encode or merge never leaves a partial target behind.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::IoError;

/// Read an entire file into memory.
pub fn read_file(path: &Path) -> Result<Vec<u8>, IoError> {
    let data = fs::read(path).map_err(|e| IoError::Read {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    debug!(path = %path.display(), bytes = data.len(), "read file");
    Ok(data)
}

/// Replace the contents of a file with `data`.
pub fn write_file(path: &Path, data: &[u8]) -> Result<(), IoError> {
    fs::write(path, data).map_err(|e| IoError::Write {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    debug!(path = %path.display(), bytes = data.len(), "wrote file");
    Ok(())
}
