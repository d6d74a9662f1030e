//! Global error handling for dirclone
//!
//! Every failure is fatal: the copy stops at the first error and the
//! destination tree is left as it was at that moment.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Global error type for dirclone operations
#[derive(Error, Debug)]
pub enum CloneError {
    /// Destination root was present before the copy started
    #[error("Destination already exists: {}", .0.display())]
    DestinationExists(PathBuf),

    /// Source root is missing or not a directory
    #[error("Source is not a directory: {}", .0.display())]
    SourceNotDirectory(PathBuf),

    /// Source root has no parent or no basename to derive a clone name from
    #[error("Cannot derive a clone destination from source: {}", .0.display())]
    InvalidSource(PathBuf),

    /// File system error tied to the path being processed
    #[error("IO error at {}: {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// File content copy failed; the error may come from either side
    #[error("Failed to copy {} to {}: {}", .from.display(), .to.display(), .source)]
    Copy {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Socket, FIFO or device node in the source tree
    #[error("Cannot copy special file: {}", .0.display())]
    SpecialFile(PathBuf),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Specialized Result type for dirclone operations
pub type Result<T> = std::result::Result<T, CloneError>;

/// Creates a CloneError with a formatted message
#[macro_export]
macro_rules! error {
    ($error_type:ident, $($arg:tt)*) => {
        $crate::error::CloneError::$error_type(format!($($arg)*))
    };
}

/// Returns an error result with a formatted message
#[macro_export]
macro_rules! bail {
    ($error_type:ident, $($arg:tt)*) => {
        return Err($crate::error!($error_type, $($arg)*))
    };
}

/// Ensures a condition is true, otherwise returns an error
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $error_type:ident, $($arg:tt)*) => {
        if !($cond) {
            $crate::bail!($error_type, $($arg)*)
        }
    };
}

/// Extension trait for attaching the offending path to IO errors
pub trait ResultExt<T> {
    /// Wrap an IO error into [`CloneError::Io`] for `path`
    fn with_path<P: Into<PathBuf>>(self, path: P) -> Result<T>;
}

impl<T> ResultExt<T> for std::result::Result<T, io::Error> {
    fn with_path<P: Into<PathBuf>>(self, path: P) -> Result<T> {
        self.map_err(|source| CloneError::Io {
            path: path.into(),
            source,
        })
    }
}

impl CloneError {
    /// The IO error kind, if this error came from the file system
    pub fn io_kind(&self) -> Option<io::ErrorKind> {
        match self {
            CloneError::Io { source, .. } | CloneError::Copy { source, .. } => {
                Some(source.kind())
            }
            _ => None,
        }
    }
}
