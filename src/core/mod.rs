//! Core data model shared by the report drivers, accessors, and correlators.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// A flagged source line: uncovered by tests, or reported by a static
/// analysis tool.
///
/// Equality, hashing, and ordering consider both the line and the message,
/// so two findings on the same line with different messages stay distinct.
/// Coverage tools produce message-less violations; quality tools attach the
/// finding text.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Violation {
    pub line: usize,
    pub message: Option<String>,
}

impl Violation {
    pub fn new(line: usize, message: impl Into<String>) -> Self {
        Violation {
            line,
            message: Some(message.into()),
        }
    }

    /// A violation with no message, as coverage drivers emit for an
    /// unexecuted line.
    pub fn bare(line: usize) -> Self {
        Violation {
            line,
            message: None,
        }
    }
}

/// Violations and measured lines for one file in one parsed payload.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FileEntry {
    pub violations: BTreeSet<Violation>,
    /// Every line the tool had an opinion about, covered or not. Quality
    /// drivers leave this empty; applicability is tracked by the driver,
    /// not per entry.
    pub measured: BTreeSet<usize>,
}

/// The canonical per-file view of one parsed report payload.
///
/// Keys are normalized paths: forward-slash separated, with any leading
/// `./` stripped, so they compare directly against paths from the diff.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FileReport {
    files: BTreeMap<String, FileEntry>,
}

impl FileReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_violation(&mut self, path: &str, violation: Violation) {
        self.files
            .entry(normalize_path(path))
            .or_default()
            .violations
            .insert(violation);
    }

    pub fn add_measured(&mut self, path: &str, line: usize) {
        self.files
            .entry(normalize_path(path))
            .or_default()
            .measured
            .insert(line);
    }

    /// Entry for a normalized path, if the payload mentioned the file.
    pub fn entry(&self, path: &str) -> Option<&FileEntry> {
        self.files.get(path)
    }

    pub fn files(&self) -> impl Iterator<Item = (&str, &FileEntry)> {
        self.files.iter().map(|(path, entry)| (path.as_str(), entry))
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }
}

/// Normalize a report or diff path for comparison: forward slashes only,
/// no leading `./`.
pub fn normalize_path(path: &str) -> String {
    let forward = path.replace('\\', "/");
    forward
        .strip_prefix("./")
        .map(str::to_string)
        .unwrap_or(forward)
}
