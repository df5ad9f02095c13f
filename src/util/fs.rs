//! Filesystem utilities.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

/// Ensure a directory exists, creating it if necessary.
pub fn ensure_dir(path: &Path) -> Result<bool> {
    if path.exists() {
        return Ok(false);
    }
    fs::create_dir_all(path)
        .with_context(|| format!("failed to create directory: {}", path.display()))?;
    Ok(true)
}

/// Rename `from` to `to` if `from` exists. Returns whether a rename happened.
///
/// The rename is a single `rename(2)`, so contents are carried over untouched.
pub fn rename_if_exists(from: &Path, to: &Path) -> Result<bool> {
    if !from.exists() {
        return Ok(false);
    }
    fs::rename(from, to).with_context(|| {
        format!("failed to rename {} to {}", from.display(), to.display())
    })?;
    Ok(true)
}

/// Read a file to string, with nice error messages.
pub fn read_to_string(path: &Path) -> Result<String> {
    fs::read_to_string(path)
        .with_context(|| format!("failed to read file: {}", path.display()))
}
