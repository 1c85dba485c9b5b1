//! Unified diff parsing.
//!
//! Only the post-image side matters: hunk headers carry the starting line of
//! the new file, `+` lines are changed lines, context lines advance the
//! counter, and `-` lines do not exist in the post-image. Files deleted by
//! the diff (`+++ /dev/null`) are skipped entirely.

use super::InMemoryDiff;
use once_cell::sync::Lazy;
use regex::Regex;

static HUNK_HEADER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^@@ -\d+(?:,\d+)? \+(\d+)(?:,\d+)? @@").unwrap());

/// Parse `git diff` output into an in-memory changed-line map, preserving
/// the diff's file order. Unrecognized lines are ignored; git's own output
/// is the contract here, not arbitrary text.
pub fn parse_unified_diff(text: &str) -> InMemoryDiff {
    let mut diff = InMemoryDiff::new();
    let mut current: Option<String> = None;
    let mut post_line = 0usize;
    let mut in_hunk = false;

    for line in text.lines() {
        if line.starts_with("diff --git ") {
            current = None;
            in_hunk = false;
            continue;
        }

        if let Some(rest) = line.strip_prefix("+++ ") {
            in_hunk = false;
            let path = rest.split('\t').next().unwrap_or(rest).trim();
            if path == "/dev/null" {
                current = None;
            } else {
                let path = path.strip_prefix("b/").unwrap_or(path);
                diff.add_file(path, []);
                current = Some(crate::core::normalize_path(path));
            }
            continue;
        }

        if let Some(captures) = HUNK_HEADER.captures(line) {
            if current.is_some() {
                post_line = captures[1].parse().unwrap_or(1);
                in_hunk = true;
            }
            continue;
        }

        let Some(path) = current.as_deref() else {
            continue;
        };
        if !in_hunk {
            continue;
        }

        match line.as_bytes().first() {
            Some(b'+') => {
                diff.add_file(path, [post_line]);
                post_line += 1;
            }
            Some(b'-') | Some(b'\\') => {}
            // Context line; an empty context line can arrive with its
            // leading space stripped.
            Some(b' ') | None => post_line += 1,
            _ => in_hunk = false,
        }
    }

    diff
}
