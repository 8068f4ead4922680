//! Atomic entrypoint writes.

use std::path::Path;

use super::CodegenError;
use crate::utils::path::write_atomic;

/// Write `source` to `path`, replacing the file atomically.
///
/// Returns `Ok(false)` without touching the file when it already holds
/// exactly `source`, so unchanged registries cause no mtime churn.
pub fn write_entrypoint(path: &Path, source: &str) -> Result<bool, CodegenError> {
    match std::fs::read(path) {
        Ok(existing) if existing == source.as_bytes() => return Ok(false),
        Ok(_) => {}
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => return Err(CodegenError::Io(path.to_path_buf(), e)),
    }

    write_atomic(path, source.as_bytes()).map_err(|e| CodegenError::Io(path.to_path_buf(), e))?;
    Ok(true)
}
