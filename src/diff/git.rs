//! Git-backed diff source.
//!
//! Runs one porcelain invocation and hands the output to the unified diff
//! parser. Failures surface as a distinct error kind carrying git's stderr;
//! nothing is retried.

use super::{parse_unified_diff, InMemoryDiff};
use crate::errors::DiffmapError;
use std::process::Command;

pub struct GitDiffSource {
    compare_branch: String,
}

impl GitDiffSource {
    pub fn new(compare_branch: impl Into<String>) -> Self {
        GitDiffSource {
            compare_branch: compare_branch.into(),
        }
    }

    /// Diff the working tree against the merge base with the compare branch.
    pub fn load(&self) -> Result<InMemoryDiff, DiffmapError> {
        let range = format!("{}...HEAD", self.compare_branch);
        log::debug!("running git diff {range}");

        let output = Command::new("git")
            .args(["diff", &range, "--no-color", "--no-ext-diff", "-M"])
            .output()
            .map_err(|err| DiffmapError::git_command("failed to start", err.to_string()))?;

        if !output.status.success() {
            return Err(DiffmapError::git_command(
                output.status.to_string(),
                String::from_utf8_lossy(&output.stderr).trim().to_string(),
            ));
        }

        Ok(parse_unified_diff(&String::from_utf8_lossy(&output.stdout)))
    }
}
