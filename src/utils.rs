/*!
 * Path helpers for dirclone
 */

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::error::{CloneError, Result};

/// Suffix appended to the source basename to name the clone
pub const CLONE_SUFFIX: &str = "-clone";

/// Name of the clone directory for a source basename, e.g. `foo` -> `foo-clone`
pub fn clone_dir_name(source: &Path) -> Result<OsString> {
    let base = source
        .file_name()
        .ok_or_else(|| CloneError::InvalidSource(source.to_path_buf()))?;
    let mut name = base.to_os_string();
    name.push(CLONE_SUFFIX);
    Ok(name)
}

/// Sibling destination for `source`: `<parent>/<basename>-clone`
pub fn destination_for(source: &Path) -> Result<PathBuf> {
    let parent = source
        .parent()
        .ok_or_else(|| CloneError::InvalidSource(source.to_path_buf()))?;
    Ok(parent.join(clone_dir_name(source)?))
}

/// Lossy display form of an entry name for messages
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .unwrap_or_default()
        .to_string_lossy()
        .to_string()
}
