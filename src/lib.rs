/*!
 * dirclone - Clone a directory tree into a sibling `<name>-clone` directory
 *
 * The copy skips entries by bare name (`node_modules` always, plus any
 * configured extras) at every depth of the tree.
 */

pub mod config;
pub mod copier;
pub mod error;
pub mod exclude;
pub mod report;
pub mod utils;


// Re-export main components for easier access
pub use config::{Args, Config, SymlinkPolicy};
pub use copier::{clone_tree, copy_tree};
pub use error::{CloneError, Result};
pub use exclude::{ExcludeSet, IgnoreFilter, DEFAULT_EXCLUDE};
pub use report::{completion_message, CloneOutcome, CopyReport};
pub use utils::{clone_dir_name, destination_for};
