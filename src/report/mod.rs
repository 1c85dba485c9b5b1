//! Report accessors: the per-report-kind façade over one driver and any
//! number of raw payloads.
//!
//! An accessor handles one *kind* of report but possibly several *instances*
//! of it, e.g. a coverage tool re-run against several test shards. Payloads
//! are parsed once, lazily, on first query; per-path merge results are
//! memoized for the accessor's lifetime (one run).
//!
//! The merge law: a line is a true violation only if every payload that
//! mentions the file agrees it is flagged (intersection), while a line is
//! measured if any payload had an opinion about it (union). Shards exercise
//! disjoint subsets of lines; a line covered by any run is covered.

use crate::core::{normalize_path, FileEntry, FileReport, Violation};
use crate::errors::DiffmapError;
use crate::parsers::ReportDriver;
use once_cell::unsync::OnceCell;
use rayon::prelude::*;
use std::cell::RefCell;
use std::collections::{BTreeSet, HashMap};

/// Merged per-file results, memoized per queried path.
#[derive(Clone, Debug, PartialEq, Eq)]
struct FileSummary {
    violations: BTreeSet<Violation>,
    /// `None` when the report kind has no measured-lines concept.
    measured: Option<BTreeSet<usize>>,
}

pub struct ReportAccessor {
    driver: Box<dyn ReportDriver>,
    payloads: Vec<String>,
    parsed: OnceCell<Vec<FileReport>>,
    cache: RefCell<HashMap<String, FileSummary>>,
}

impl ReportAccessor {
    pub fn new(driver: Box<dyn ReportDriver>, payloads: Vec<String>) -> Self {
        ReportAccessor {
            driver,
            payloads,
            parsed: OnceCell::new(),
            cache: RefCell::new(HashMap::new()),
        }
    }

    /// Stable identifier for the report kind, used in rendering.
    pub fn name(&self) -> &'static str {
        self.driver.name()
    }

    /// Merged violations for `path` across all payloads. Paths absent from
    /// every payload yield an empty set, not an error.
    pub fn violations(&self, path: &str) -> Result<BTreeSet<Violation>, DiffmapError> {
        Ok(self.summary(path)?.violations)
    }

    /// Merged measured lines for `path`, or `None` when the report kind has
    /// no measured-lines concept (lint and bug reports).
    pub fn measured_lines(
        &self,
        path: &str,
    ) -> Result<Option<BTreeSet<usize>>, DiffmapError> {
        Ok(self.summary(path)?.measured)
    }

    /// Parse every payload, once. Independent payloads parse in parallel;
    /// the merge in `summary` is applied deterministically afterwards, so
    /// completion order cannot affect results.
    fn parsed(&self) -> Result<&[FileReport], DiffmapError> {
        let driver = self.driver.as_ref();
        let reports = self.parsed.get_or_try_init(|| {
            let reports = self
                .payloads
                .par_iter()
                .map(|payload| driver.parse(payload))
                .collect::<Result<Vec<_>, _>>()?;
            log::debug!(
                "parsed {} {} payload(s) covering {} file(s)",
                reports.len(),
                driver.name(),
                reports.iter().map(FileReport::len).sum::<usize>()
            );
            Ok(reports)
        })?;
        Ok(reports)
    }

    fn summary(&self, path: &str) -> Result<FileSummary, DiffmapError> {
        let path = normalize_path(path);
        if let Some(cached) = self.cache.borrow().get(&path) {
            return Ok(cached.clone());
        }

        let summary = if self.driver.handles_path(&path) {
            let entries: Vec<&FileEntry> = self
                .parsed()?
                .iter()
                .filter_map(|report| report.entry(&path))
                .collect();
            merge_entries(&entries, self.driver.measures_lines())
        } else {
            empty_summary(self.driver.measures_lines())
        };

        self.cache.borrow_mut().insert(path, summary.clone());
        Ok(summary)
    }
}

/// Intersect violations and union measured lines across the payloads that
/// mention the file. Both operations are commutative and associative, so
/// payload order never affects the result; a single payload merges to
/// itself unchanged.
fn merge_entries(entries: &[&FileEntry], measures_lines: bool) -> FileSummary {
    let violations = entries
        .iter()
        .map(|entry| entry.violations.clone())
        .reduce(|acc, next| acc.intersection(&next).cloned().collect())
        .unwrap_or_default();

    let measured = measures_lines.then(|| {
        entries
            .iter()
            .flat_map(|entry| entry.measured.iter().copied())
            .collect()
    });

    FileSummary {
        violations,
        measured,
    }
}

fn empty_summary(measures_lines: bool) -> FileSummary {
    FileSummary {
        violations: BTreeSet::new(),
        measured: measures_lines.then(BTreeSet::new),
    }
}
