use std::fs;
use std::path::Path;

use tracing::debug;

use crate::{ClientError, ClientResult};

/// Confirms `path` points at an existing regular file. Nothing is read.
pub fn validate_file(path: &Path) -> ClientResult<()> {
    let is_file = fs::metadata(path)
        .map(|metadata| metadata.is_file())
        .unwrap_or(false);
    if !is_file {
        return Err(ClientError::file_not_found(path));
    }
    debug!(path = %path.display(), "input file present");
    Ok(())
}
