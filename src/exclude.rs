/*!
 * Name-based exclusion for the tree copy
 *
 * Exclusion works on bare entry names, never on paths or patterns. The
 * filter is asked once per directory which of that directory's names to skip.
 */

use std::collections::BTreeSet;
use std::ffi::{OsStr, OsString};
use std::path::Path;

/// Names excluded from every copy regardless of configuration
pub const DEFAULT_EXCLUDE: &[&str] = &["node_modules"];

/// Per-directory exclusion callback
///
/// Called once for every directory the copier enters, with that directory's
/// path and the names listed in it. Returns the subset of `names` to skip.
pub trait IgnoreFilter {
    fn ignored(&self, dir: &Path, names: &[OsString]) -> BTreeSet<OsString>;
}

impl<F> IgnoreFilter for F
where
    F: Fn(&Path, &[OsString]) -> BTreeSet<OsString>,
{
    fn ignored(&self, dir: &Path, names: &[OsString]) -> BTreeSet<OsString> {
        self(dir, names)
    }
}

/// Fixed set of excluded entry names
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExcludeSet {
    names: BTreeSet<OsString>,
}

impl Default for ExcludeSet {
    fn default() -> Self {
        Self {
            names: DEFAULT_EXCLUDE.iter().map(OsString::from).collect(),
        }
    }
}

impl ExcludeSet {
    /// Default names plus `extra`
    pub fn with_extra<I, S>(extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        let mut set = Self::default();
        set.names.extend(extra.into_iter().map(Into::into));
        set
    }

    /// Whether `name` matches an excluded entry exactly
    pub fn contains(&self, name: &OsStr) -> bool {
        self.names.contains(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &OsStr> {
        self.names.iter().map(OsString::as_os_str)
    }
}

impl IgnoreFilter for ExcludeSet {
    fn ignored(&self, _dir: &Path, names: &[OsString]) -> BTreeSet<OsString> {
        names
            .iter()
            .filter(|name| self.contains(name))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(raw: &[&str]) -> Vec<OsString> {
        raw.iter().map(OsString::from).collect()
    }

    #[test]
    fn default_always_excludes_node_modules() {
        let set = ExcludeSet::default();
        assert!(set.contains(OsStr::new("node_modules")));
        assert_eq!(set.iter().count(), 1);

        let set = ExcludeSet::with_extra(["a"]);
        assert!(set.contains(OsStr::new("node_modules")));
        assert!(set.contains(OsStr::new("a")));
    }

    #[test]
    fn matching_is_exact() {
        let set = ExcludeSet::with_extra(["a"]);
        let listed = names(&["a", "abc", "node_modules", "nodeX_modules", "A", "src"]);

        let skipped = set.ignored(Path::new("/any"), &listed);

        let expected: BTreeSet<OsString> = names(&["a", "node_modules"]).into_iter().collect();
        assert_eq!(skipped, expected);
    }

    #[test]
    fn only_returns_names_present_in_listing() {
        let set = ExcludeSet::with_extra(["a"]);
        let skipped = set.ignored(Path::new("/any"), &names(&["src", "README.md"]));
        assert!(skipped.is_empty());
    }

    #[test]
    fn closures_act_as_filters() {
        let filter = |_dir: &Path, names: &[OsString]| -> BTreeSet<OsString> {
            names
                .iter()
                .filter(|n| n.to_string_lossy().starts_with('.'))
                .cloned()
                .collect()
        };

        let skipped = filter.ignored(Path::new("/any"), &names(&[".git", "src"]));
        assert_eq!(skipped.len(), 1);
        assert!(skipped.contains(OsStr::new(".git")));
    }
}
