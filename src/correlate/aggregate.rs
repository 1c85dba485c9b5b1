//! Whole-run aggregation of per-file correlation results.
//!
//! Files accumulate in the diff's own order and are never re-sorted; the
//! renderer walks them as the diff presented them. The model performs no
//! I/O.

use super::{correlate_file, percent_covered, CorrelationResult};
use crate::diff::DiffSource;
use crate::errors::DiffmapError;
use crate::report::ReportAccessor;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DiffReport {
    /// Report kind this run correlated against (accessor name).
    pub report_name: String,
    /// Per-file results in diff order.
    pub files: Vec<CorrelationResult>,
    pub total_changed: usize,
    pub total_measured_changed: usize,
    pub total_violated_changed: usize,
}

impl DiffReport {
    pub fn new(report_name: impl Into<String>) -> Self {
        DiffReport {
            report_name: report_name.into(),
            ..Default::default()
        }
    }

    /// Append one file's results, folding its counts into the run totals.
    pub fn push(&mut self, result: CorrelationResult) {
        self.total_changed += result.changed_lines;
        self.total_measured_changed += result.measured_changed;
        self.total_violated_changed += result.violated_changed;
        self.files.push(result);
    }

    /// Overall percent covered, under the same zero-denominator policy as
    /// the per-file statistic: files with no measured changed lines
    /// contribute nothing to the denominator.
    pub fn percent_covered(&self) -> Option<f64> {
        percent_covered(self.total_measured_changed, self.total_violated_changed)
    }

    /// Total violation records on changed lines across the run.
    pub fn total_violations(&self) -> usize {
        self.files.iter().map(|file| file.violations.len()).sum()
    }
}

/// Correlate every file in the diff against the accessor and accumulate the
/// results. Files absent from the diff are never queried.
pub fn generate_report(
    diff: &dyn DiffSource,
    accessor: &ReportAccessor,
) -> Result<DiffReport, DiffmapError> {
    let mut report = DiffReport::new(accessor.name());

    for path in diff.tracked_files() {
        let changed = diff.changed_lines(&path);
        let src_path = diff.src_path_for(&path);
        let mut result = correlate_file(accessor, &src_path, &changed)?;
        result.path = path;
        report.push(result);
    }

    log::info!(
        "correlated {} file(s): {} changed line(s), {} violated",
        report.files.len(),
        report.total_changed,
        report.total_violated_changed
    );
    Ok(report)
}
