//! Reading comparison inputs from disk.

use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{path} is not valid UTF-8 (first bad byte at offset {offset})")]
    InvalidUtf8 { path: PathBuf, offset: usize },
}

/// Read a UTF-8 text file.
///
/// Bad encoding is an error, never a silently shortened text.
pub fn load_text(path: &Path) -> Result<String, LoadError> {
    let bytes = std::fs::read(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    String::from_utf8(bytes).map_err(|e| LoadError::InvalidUtf8 {
        path: path.to_path_buf(),
        offset: e.utf8_error().valid_up_to(),
    })
}

/// Load the primary and secondary texts.
pub fn load_pair(primary: &Path, secondary: &Path) -> Result<(String, String), LoadError> {
    let primary_text = load_text(primary)?;
    let secondary_text = load_text(secondary)?;
    log::info!(
        "Loaded {} ({} bytes) and {} ({} bytes)",
        primary.display(),
        primary_text.len(),
        secondary.display(),
        secondary_text.len()
    );
    Ok((primary_text, secondary_text))
}
