/*!
 * Copy statistics and the completion message
 */

use std::ffi::OsStr;
use std::path::PathBuf;
use std::time::Duration;

/// Counters collected while copying a tree
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CopyReport {
    /// Regular files copied (including followed links to files)
    pub files_copied: usize,
    /// Directories created, including the destination root
    pub dirs_created: usize,
    /// Links recreated as links
    pub symlinks_created: usize,
    /// Entries dropped by the exclusion filter (subtrees count once)
    pub entries_excluded: usize,
    /// Bytes of file content copied
    pub bytes_copied: u64,
}

impl CopyReport {
    /// Total number of entries written to the destination
    pub fn entries_written(&self) -> usize {
        self.files_copied + self.dirs_created + self.symlinks_created
    }
}

/// Result of a finished clone
#[derive(Debug, Clone)]
pub struct CloneOutcome {
    /// Resolved source root
    pub source: PathBuf,
    /// Created destination root
    pub destination: PathBuf,
    /// Copy statistics
    pub report: CopyReport,
    /// Wall time of the copy
    pub duration: Duration,
}

impl CloneOutcome {
    /// The single line printed on success
    pub fn completion_message(&self) -> String {
        completion_message(self.destination.file_name().unwrap_or_default())
    }
}

/// `Finished copying files to /<name> directory.`
pub fn completion_message(dir_name: &OsStr) -> String {
    format!(
        "Finished copying files to /{} directory.",
        dir_name.to_string_lossy()
    )
}
