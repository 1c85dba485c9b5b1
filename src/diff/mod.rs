//! Diff sources: where the changed-line map comes from.
//!
//! The correlation core only consumes this interface; producing it (running
//! git, parsing unified diff text) lives behind it. `InMemoryDiff` serves
//! library callers and tests; `GitDiffSource` shells out to `git diff`.

pub mod git;
pub mod unified;

use std::collections::{BTreeSet, HashMap};

pub use git::GitDiffSource;
pub use unified::parse_unified_diff;

/// The changed-line map for one diff, enumerated in diff order.
pub trait DiffSource {
    /// Files present in the diff, in the diff's own order.
    fn tracked_files(&self) -> Vec<String>;

    /// Lines touched by the diff for `path` (post-change side only;
    /// deleted-only lines have no post-image representation).
    fn changed_lines(&self, path: &str) -> BTreeSet<usize>;

    /// The repo-relative source path to query reports with. Identity unless
    /// the caller knows the file under a different name (renames).
    fn src_path_for(&self, path: &str) -> String {
        path.to_string()
    }
}

/// A diff handed over as a plain map, in insertion order.
#[derive(Clone, Debug, Default)]
pub struct InMemoryDiff {
    order: Vec<String>,
    changed: HashMap<String, BTreeSet<usize>>,
    src_paths: HashMap<String, String>,
}

impl InMemoryDiff {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a file's changed lines. First insertion fixes the file's
    /// position in diff order; repeated calls extend the line set.
    pub fn add_file(&mut self, path: &str, lines: impl IntoIterator<Item = usize>) {
        let path = crate::core::normalize_path(path);
        if !self.changed.contains_key(&path) {
            self.order.push(path.clone());
        }
        self.changed.entry(path).or_default().extend(lines);
    }

    /// Map a tracked path to the name reports know it by.
    pub fn set_src_path(&mut self, path: &str, src_path: &str) {
        self.src_paths.insert(
            crate::core::normalize_path(path),
            crate::core::normalize_path(src_path),
        );
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

impl DiffSource for InMemoryDiff {
    fn tracked_files(&self) -> Vec<String> {
        self.order.clone()
    }

    fn changed_lines(&self, path: &str) -> BTreeSet<usize> {
        self.changed.get(path).cloned().unwrap_or_default()
    }

    fn src_path_for(&self, path: &str) -> String {
        self.src_paths
            .get(path)
            .cloned()
            .unwrap_or_else(|| path.to_string())
    }
}
