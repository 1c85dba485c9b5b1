//! Error types for diffmap operations.
//!
//! The `DiffmapError` type categorizes the failures the tool can hit:
//! - `MalformedReport`: a report payload that does not parse for the selected
//!   driver. This is a hard failure; the offending report kind is named.
//! - `Io`: file system errors with path context.
//! - `GitCommand`: a non-zero exit from the `git diff` invocation.
//! - `Config`: configuration file issues.
//!
//! A report that parses but mentions no files is not an error; accessors
//! return empty results for paths absent from every payload.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DiffmapError {
    /// Structurally invalid payload for the selected report driver.
    #[error("malformed {report} report: {detail}")]
    MalformedReport { report: String, detail: String },

    /// File system I/O errors (read, write, permissions).
    #[error("failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// `git diff` exited non-zero or could not be spawned.
    #[error("git diff failed ({status}): {stderr}")]
    GitCommand { status: String, stderr: String },

    /// Configuration file errors.
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl DiffmapError {
    /// Create a malformed-report error naming the report kind.
    pub fn malformed(report: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::MalformedReport {
            report: report.into(),
            detail: detail.into(),
        }
    }

    /// Create an I/O error with path context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create a git invocation error from exit status and captured stderr.
    pub fn git_command(status: impl Into<String>, stderr: impl Into<String>) -> Self {
        Self::GitCommand {
            status: status.into(),
            stderr: stderr.into(),
        }
    }
}
