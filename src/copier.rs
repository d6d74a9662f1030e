/*!
 * Recursive tree copy with per-directory name exclusion
 */

use std::ffi::OsString;
use std::fs::{self, Metadata};
use std::io;
use std::path::{Path, PathBuf};
use std::time::Instant;

use filetime::FileTime;
use tracing::{debug, info, warn};

use crate::config::{Config, SymlinkPolicy};
use crate::error::{CloneError, Result, ResultExt};
use crate::exclude::IgnoreFilter;
use crate::report::{CloneOutcome, CopyReport};
use crate::utils::{destination_for, display_name};

/// Clone the configured source into its sibling `<name>-clone` directory
pub fn clone_tree(config: &Config) -> Result<CloneOutcome> {
    config.validate()?;

    let source = config.source_root()?;
    let destination = destination_for(&source)?;

    let excluded: Vec<_> = config.exclude.iter().collect();
    debug!(
        source = %source.display(),
        destination = %destination.display(),
        excluded = ?excluded,
        "starting clone"
    );

    let start_time = Instant::now();
    let report = copy_tree(&source, &destination, &config.exclude, config.symlinks)?;
    let duration = start_time.elapsed();

    info!(
        files = report.files_copied,
        dirs = report.dirs_created,
        symlinks = report.symlinks_created,
        excluded = report.entries_excluded,
        written = report.entries_written(),
        bytes = report.bytes_copied,
        elapsed_ms = duration.as_millis() as u64,
        "clone finished"
    );

    Ok(CloneOutcome {
        source,
        destination,
        report,
        duration,
    })
}

/// Copy `source` into a new directory at `destination`
///
/// `destination` must not exist; it is created with a non-recursive create so
/// an existing directory is never written into. `filter` is called once per
/// copied directory. The first error aborts the copy and leaves whatever was
/// already written in place.
pub fn copy_tree<F>(
    source: &Path,
    destination: &Path,
    filter: &F,
    symlinks: SymlinkPolicy,
) -> Result<CopyReport>
where
    F: IgnoreFilter + ?Sized,
{
    let source_meta = fs::metadata(source).with_path(source)?;
    if !source_meta.is_dir() {
        return Err(CloneError::SourceNotDirectory(source.to_path_buf()));
    }

    if fs::symlink_metadata(destination).is_ok() {
        return Err(CloneError::DestinationExists(destination.to_path_buf()));
    }
    fs::create_dir(destination).map_err(|e| match e.kind() {
        io::ErrorKind::AlreadyExists => CloneError::DestinationExists(destination.to_path_buf()),
        _ => CloneError::Io {
            path: destination.to_path_buf(),
            source: e,
        },
    })?;

    let mut copier = TreeCopier::new(filter, symlinks);
    copier.report.dirs_created += 1;
    copier.copy_dir(source, destination, &source_meta)?;
    Ok(copier.report)
}

/// Depth-first copier state for one run
struct TreeCopier<'a, F: ?Sized> {
    filter: &'a F,
    symlinks: SymlinkPolicy,
    report: CopyReport,
}

impl<'a, F> TreeCopier<'a, F>
where
    F: IgnoreFilter + ?Sized,
{
    fn new(filter: &'a F, symlinks: SymlinkPolicy) -> Self {
        Self {
            filter,
            symlinks,
            report: CopyReport::default(),
        }
    }

    /// Copy the contents of `src` into the already created `dst`
    fn copy_dir(&mut self, src: &Path, dst: &Path, src_meta: &Metadata) -> Result<()> {
        let mut entries: Vec<(OsString, PathBuf)> = Vec::new();
        for entry in fs::read_dir(src).with_path(src)? {
            let entry = entry.with_path(src)?;
            entries.push((entry.file_name(), entry.path()));
        }
        entries.sort_by(|a, b| a.0.cmp(&b.0));

        let names: Vec<OsString> = entries.iter().map(|(name, _)| name.clone()).collect();
        let skipped = self.filter.ignored(src, &names);

        for (name, src_path) in entries {
            if skipped.contains(&name) {
                debug!(path = %src_path.display(), "excluded");
                self.report.entries_excluded += 1;
                continue;
            }
            let dst_path = dst.join(&name);
            self.copy_entry(&src_path, &dst_path)?;
        }

        // Applied last so writing children does not bump the copied mtime.
        apply_metadata(dst, src_meta);
        Ok(())
    }

    fn copy_entry(&mut self, src: &Path, dst: &Path) -> Result<()> {
        let link_meta = fs::symlink_metadata(src).with_path(src)?;
        let file_type = link_meta.file_type();

        if file_type.is_symlink() {
            return match self.symlinks {
                SymlinkPolicy::Preserve => self.copy_symlink(src, dst, &link_meta),
                SymlinkPolicy::Follow => {
                    let target_meta = fs::metadata(src).with_path(src)?;
                    self.copy_resolved(src, dst, &target_meta)
                }
            };
        }

        self.copy_resolved(src, dst, &link_meta)
    }

    /// Copy the directory or regular file described by `meta`
    fn copy_resolved(&mut self, src: &Path, dst: &Path, meta: &Metadata) -> Result<()> {
        if meta.is_dir() {
            fs::create_dir(dst).with_path(dst)?;
            self.report.dirs_created += 1;
            debug!(path = %dst.display(), "created directory");
            self.copy_dir(src, dst, meta)
        } else if meta.is_file() {
            self.copy_file(src, dst, meta)
        } else {
            // Never opened: reading a FIFO would block.
            Err(CloneError::SpecialFile(src.to_path_buf()))
        }
    }

    fn copy_file(&mut self, src: &Path, dst: &Path, meta: &Metadata) -> Result<()> {
        // fs::copy carries the permission bits over.
        let bytes = fs::copy(src, dst).map_err(|source| CloneError::Copy {
            from: src.to_path_buf(),
            to: dst.to_path_buf(),
            source,
        })?;
        apply_times(dst, meta);

        self.report.files_copied += 1;
        self.report.bytes_copied += bytes;
        debug!(path = %dst.display(), bytes, "copied file");
        Ok(())
    }

    fn copy_symlink(&mut self, src: &Path, dst: &Path, meta: &Metadata) -> Result<()> {
        let target = fs::read_link(src).with_path(src)?;
        create_symlink(&target, src, dst).with_path(dst)?;

        let atime = FileTime::from_last_access_time(meta);
        let mtime = FileTime::from_last_modification_time(meta);
        if let Err(e) = filetime::set_symlink_file_times(dst, atime, mtime) {
            debug!(path = %dst.display(), error = %e, "could not set symlink times");
        }

        self.report.symlinks_created += 1;
        debug!(
            link = %display_name(dst),
            target = %target.display(),
            "recreated symlink"
        );
        Ok(())
    }
}

#[cfg(unix)]
fn create_symlink(target: &Path, _src: &Path, dst: &Path) -> io::Result<()> {
    std::os::unix::fs::symlink(target, dst)
}

#[cfg(windows)]
fn create_symlink(target: &Path, src: &Path, dst: &Path) -> io::Result<()> {
    use std::os::windows::fs::{symlink_dir, symlink_file};
    if src.is_dir() {
        symlink_dir(target, dst)
    } else {
        symlink_file(target, dst)
    }
}

#[cfg(not(any(unix, windows)))]
fn create_symlink(_target: &Path, _src: &Path, _dst: &Path) -> io::Result<()> {
    Err(io::Error::new(
        io::ErrorKind::Unsupported,
        "symbolic links are unsupported on this platform",
    ))
}

/// Best-effort permission and timestamp copy for a directory
fn apply_metadata(dst: &Path, meta: &Metadata) {
    if let Err(e) = fs::set_permissions(dst, meta.permissions()) {
        warn!(path = %dst.display(), error = %e, "could not copy permissions");
    }
    apply_times(dst, meta);
}

fn apply_times(dst: &Path, meta: &Metadata) {
    let atime = FileTime::from_last_access_time(meta);
    let mtime = FileTime::from_last_modification_time(meta);
    if let Err(e) = filetime::set_file_times(dst, atime, mtime) {
        warn!(path = %dst.display(), error = %e, "could not copy timestamps");
    }
}
