/*!
 * Configuration handling for dirclone
 */

use std::fs;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use clap_complete::Shell;

use crate::error::{CloneError, Result, ResultExt};
use crate::exclude::ExcludeSet;
use crate::utils::destination_for;

/// How symbolic links inside the source tree are copied
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum SymlinkPolicy {
    /// Recreate the link at the destination with the same target (default)
    #[default]
    Preserve,
    /// Copy the file or directory the link points at
    Follow,
}

/// Command-line arguments for dirclone
#[derive(Parser, Debug, Clone)]
#[clap(
    name = "dirclone",
    version = env!("CARGO_PKG_VERSION"),
    about = "Clone a directory into a sibling <name>-clone directory",
    long_about = "Recursively copies a directory (the current one by default) into a sibling directory named <name>-clone, skipping node_modules and any other excluded names at every depth."
)]
pub struct Args {
    /// Directory to clone
    #[clap(default_value = ".")]
    pub source: String,

    /// Extra entry names to skip, in addition to node_modules (exact match)
    #[clap(short = 'x', long = "exclude", value_delimiter = ',', value_name = "NAME")]
    pub exclude: Vec<String>,

    /// How to copy symbolic links
    #[clap(long, value_enum, default_value_t = SymlinkPolicy::default())]
    pub symlinks: SymlinkPolicy,

    /// Log every copied entry to stderr
    #[clap(short, long)]
    pub verbose: bool,

    /// Generate shell completions
    #[clap(long = "generate", value_enum)]
    pub generate: Option<Shell>,
}

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    /// Source root, as given
    pub source_dir: PathBuf,

    /// Names skipped at every depth
    pub exclude: ExcludeSet,

    /// Symbolic link handling
    pub symlinks: SymlinkPolicy,
}

impl Config {
    /// Create configuration from command-line arguments
    pub fn from_args(args: Args) -> Self {
        Self {
            source_dir: PathBuf::from(args.source),
            exclude: ExcludeSet::with_extra(args.exclude),
            symlinks: args.symlinks,
        }
    }

    /// Configuration for `source_dir` with the default exclusions
    pub fn new<P: Into<PathBuf>>(source_dir: P) -> Self {
        Self {
            source_dir: source_dir.into(),
            exclude: ExcludeSet::default(),
            symlinks: SymlinkPolicy::default(),
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if !self.source_dir.is_dir() {
            return Err(CloneError::SourceNotDirectory(self.source_dir.clone()));
        }

        for name in self.exclude.iter() {
            crate::ensure!(
                !name.is_empty(),
                Config,
                "excluded names must not be empty"
            );
            crate::ensure!(
                !name.to_string_lossy().chars().any(std::path::is_separator),
                Config,
                "excluded names are bare names, not paths: {}",
                name.to_string_lossy()
            );
        }

        Ok(())
    }

    /// Absolute, symlink-resolved source root
    pub fn source_root(&self) -> Result<PathBuf> {
        fs::canonicalize(&self.source_dir).with_path(&self.source_dir)
    }

    /// Destination root derived from the resolved source root
    pub fn destination_root(&self) -> Result<PathBuf> {
        destination_for(&self.source_root()?)
    }
}
