//! Diff correlation: intersect a file's changed-line set with its
//! violation and measured data to produce diff-scoped coverage statistics.

pub mod aggregate;

use crate::core::Violation;
use crate::errors::DiffmapError;
use crate::report::ReportAccessor;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

pub use aggregate::{generate_report, DiffReport};

/// Diff-scoped results for one file.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CorrelationResult {
    pub path: String,
    /// Lines touched by the diff (post-change side).
    pub changed_lines: usize,
    /// Changed lines the tool had an opinion about. Zero for quality
    /// reports, which measure nothing.
    pub measured_changed: usize,
    /// Distinct changed lines carrying at least one violation.
    pub violated_changed: usize,
    /// Violations on changed lines, ordered by line then message.
    pub violations: Vec<Violation>,
    /// `None` when no changed line was measured: a file with no measured
    /// changed lines makes no coverage claim, and must not be counted as
    /// either fully or zero covered.
    pub percent_covered: Option<f64>,
}

/// Correlate one file's changed lines against the accessor's merged data.
pub fn correlate_file(
    accessor: &ReportAccessor,
    path: &str,
    changed: &BTreeSet<usize>,
) -> Result<CorrelationResult, DiffmapError> {
    let violations: Vec<Violation> = accessor
        .violations(path)?
        .into_iter()
        .filter(|violation| changed.contains(&violation.line))
        .collect();

    let violated_lines: BTreeSet<usize> =
        violations.iter().map(|violation| violation.line).collect();

    let (measured_changed, percent_covered) = match accessor.measured_lines(path)? {
        Some(measured) => {
            let measured_changed = measured.intersection(changed).count();
            let percent = percent_covered(measured_changed, violated_lines.len());
            (measured_changed, percent)
        }
        None => (0, None),
    };

    log::debug!(
        "{path}: {} changed, {measured_changed} measured, {} violated",
        changed.len(),
        violated_lines.len()
    );

    Ok(CorrelationResult {
        path: path.to_string(),
        changed_lines: changed.len(),
        measured_changed,
        violated_changed: violated_lines.len(),
        violations,
        percent_covered,
    })
}

/// Percent of measured changed lines that are covered, or `None` on a zero
/// denominator.
pub(crate) fn percent_covered(measured: usize, violated: usize) -> Option<f64> {
    (measured > 0).then(|| 100.0 * (measured.saturating_sub(violated)) as f64 / measured as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsers::{CheckstyleXmlDriver, CloverDriver};

    fn clover_payload(violations: &[usize], measured: &[usize]) -> String {
        let mut xml =
            String::from("<coverage clover=\"4.2.0\"><project><package><file path=\"file.java\">");
        for line in measured {
            let count = if violations.contains(line) { 0 } else { 1 };
            xml.push_str(&format!(
                "<line num=\"{line}\" count=\"{count}\" type=\"stmt\"/>"
            ));
        }
        xml.push_str("</file></package></project></coverage>");
        xml
    }

    fn coverage_accessor(violations: &[usize], measured: &[usize]) -> ReportAccessor {
        ReportAccessor::new(
            Box::new(CloverDriver::new()),
            vec![clover_payload(violations, measured)],
        )
    }

    #[test]
    fn intersects_changed_lines_with_measured_and_violations() {
        // Violations on 3 and 7 out of measured {2,3,5,7,11,13}; the diff
        // touched {3,5,11}.
        let accessor = coverage_accessor(&[3, 7], &[2, 3, 5, 7, 11, 13]);
        let changed = BTreeSet::from([3, 5, 11]);

        let result = correlate_file(&accessor, "file.java", &changed).unwrap();

        assert_eq!(result.changed_lines, 3);
        assert_eq!(result.measured_changed, 3);
        assert_eq!(result.violations, vec![Violation::bare(3)]);
        let percent = result.percent_covered.unwrap();
        assert!((percent - 200.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn disjoint_changed_and_measured_makes_no_coverage_claim() {
        let accessor = coverage_accessor(&[3], &[2, 3, 5]);
        let changed = BTreeSet::from([40, 41]);

        let result = correlate_file(&accessor, "file.java", &changed).unwrap();

        assert_eq!(result.measured_changed, 0);
        assert_eq!(result.percent_covered, None);
        assert!(result.violations.is_empty());
    }

    #[test]
    fn fully_covered_changed_lines_reach_one_hundred_percent() {
        let accessor = coverage_accessor(&[], &[1, 2, 3]);
        let changed = BTreeSet::from([1, 2]);

        let result = correlate_file(&accessor, "file.java", &changed).unwrap();
        assert_eq!(result.percent_covered, Some(100.0));
    }

    #[test]
    fn quality_reports_list_violations_without_a_percentage() {
        let payload = concat!(
            r#"<checkstyle version="8.0"><file name="file.java">"#,
            r#"<error line="2" severity="error" message="Unused variable"/>"#,
            r#"<error line="2" severity="warning" message="TODO marker"/>"#,
            r#"<error line="9" severity="error" message="Missing docstring"/>"#,
            "</file></checkstyle>"
        );
        let accessor = ReportAccessor::new(
            Box::new(CheckstyleXmlDriver::new()),
            vec![payload.to_string()],
        );
        let changed = BTreeSet::from([1, 2, 3]);

        let result = correlate_file(&accessor, "file.java", &changed).unwrap();

        assert_eq!(result.percent_covered, None);
        assert_eq!(result.measured_changed, 0);
        assert_eq!(
            result.violations,
            vec![
                Violation::new(2, "error: Unused variable"),
                Violation::new(2, "warning: TODO marker"),
            ]
        );
        assert_eq!(result.violated_changed, 1);
    }

    #[test]
    fn violations_are_ordered_by_line_then_message() {
        let payload = concat!(
            r#"<checkstyle><file name="file.java">"#,
            r#"<error line="5" severity="warning" message="later"/>"#,
            r#"<error line="5" severity="error" message="earlier"/>"#,
            r#"<error line="2" severity="error" message="first"/>"#,
            "</file></checkstyle>"
        );
        let accessor = ReportAccessor::new(
            Box::new(CheckstyleXmlDriver::new()),
            vec![payload.to_string()],
        );
        let changed = BTreeSet::from([2, 5]);

        let result = correlate_file(&accessor, "file.java", &changed).unwrap();
        let rendered: Vec<_> = result
            .violations
            .iter()
            .map(|violation| (violation.line, violation.message.clone().unwrap()))
            .collect();

        assert_eq!(
            rendered,
            vec![
                (2, "error: first".to_string()),
                (5, "error: earlier".to_string()),
                (5, "warning: later".to_string()),
            ]
        );
    }
}
