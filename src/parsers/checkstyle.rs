//! Checkstyle quality drivers: the line-oriented console output and the XML
//! report format.
//!
//! Neither dialect has a measured-lines concept; every line of a Java file is
//! in scope for the linter, so only violations are reported.

use super::{attr_usize, parse_xml_document, ReportDriver};
use crate::core::{FileReport, Violation};
use crate::errors::DiffmapError;
use once_cell::sync::Lazy;
use regex::Regex;

/// One `path:line[:col]: message` finding per console line, with an optional
/// `[SEVERITY]` prefix. Lines not matching the pattern are ignored.
static CONSOLE_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:\[\w+\]\s+)?(?P<path>[^:\s][^:]*):(?P<line>\d+)(?::\d+)?:\s*(?P<message>.+)$")
        .unwrap()
});

#[derive(Debug, Default, Clone, Copy)]
pub struct CheckstyleTextDriver;

impl CheckstyleTextDriver {
    pub fn new() -> Self {
        CheckstyleTextDriver
    }
}

impl ReportDriver for CheckstyleTextDriver {
    fn name(&self) -> &'static str {
        "checkstyle"
    }

    fn parse(&self, payload: &str) -> Result<FileReport, DiffmapError> {
        let mut report = FileReport::new();

        for captures in payload.lines().filter_map(|line| CONSOLE_LINE.captures(line)) {
            let Ok(line) = captures["line"].parse::<usize>() else {
                continue;
            };
            let message = captures["message"].trim();
            report.add_violation(&captures["path"], Violation::new(line, message));
        }

        Ok(report)
    }

    fn measures_lines(&self) -> bool {
        false
    }

    fn file_extensions(&self) -> &'static [&'static str] {
        &["java"]
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct CheckstyleXmlDriver;

impl CheckstyleXmlDriver {
    pub fn new() -> Self {
        CheckstyleXmlDriver
    }
}

impl ReportDriver for CheckstyleXmlDriver {
    fn name(&self) -> &'static str {
        "checkstyle-xml"
    }

    fn parse(&self, payload: &str) -> Result<FileReport, DiffmapError> {
        let document = parse_xml_document(self.name(), payload)?;
        let mut report = FileReport::new();

        for file in document
            .descendants()
            .filter(|node| node.has_tag_name("file"))
        {
            let Some(path) = file.attribute("name") else {
                continue;
            };

            for error in file.children().filter(|node| node.has_tag_name("error")) {
                let Some(line) = attr_usize(&error, "line") else {
                    continue;
                };
                let severity = error.attribute("severity").unwrap_or("error");
                let message = error.attribute("message").unwrap_or("");
                report.add_violation(
                    path,
                    Violation::new(line, format!("{severity}: {message}")),
                );
            }
        }

        Ok(report)
    }

    fn measures_lines(&self) -> bool {
        false
    }

    fn file_extensions(&self) -> &'static [&'static str] {
        &["java"]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    #[test]
    fn console_lines_yield_violations() {
        let payload = indoc! {"
            [WARN] ../new_file.java:1:1: Line contains a tab character.
            [WARN] ../new_file.java:13: 'if' construct must use '{}'s.
            Starting audit...
            Audit done.
        "};

        let report = CheckstyleTextDriver::new().parse(payload).unwrap();
        let entry = report.entry("../new_file.java").unwrap();

        assert!(entry
            .violations
            .contains(&Violation::new(1, "Line contains a tab character.")));
        assert!(entry
            .violations
            .contains(&Violation::new(13, "'if' construct must use '{}'s.")));
        assert_eq!(entry.violations.len(), 2);
    }

    #[test]
    fn non_matching_lines_are_ignored() {
        let report = CheckstyleTextDriver::new()
            .parse("no findings here\njust noise\n")
            .unwrap();
        assert!(report.is_empty());
    }

    #[test]
    fn xml_errors_carry_severity_in_the_message() {
        let payload = indoc! {r#"
            <?xml version="1.0" encoding="UTF-8"?>
            <checkstyle version="8.0">
                <file name="file1.java">
                    <error line="1" severity="error" message="Missing docstring"/>
                    <error line="2" severity="error" message="Unused variable 'd'"/>
                    <error line="2" severity="warning" message="TODO: tidy this up"/>
                </file>
                <file name="path/to/file2.java">
                    <error line="100" severity="error" message="Access to a protected member"/>
                </file>
            </checkstyle>
        "#};

        let report = CheckstyleXmlDriver::new().parse(payload).unwrap();

        let first = report.entry("file1.java").unwrap();
        assert!(first
            .violations
            .contains(&Violation::new(1, "error: Missing docstring")));
        // Two entries on the same line with different severities stay distinct.
        assert!(first
            .violations
            .contains(&Violation::new(2, "error: Unused variable 'd'")));
        assert!(first
            .violations
            .contains(&Violation::new(2, "warning: TODO: tidy this up")));
        assert_eq!(first.violations.len(), 3);

        let second = report.entry("path/to/file2.java").unwrap();
        assert_eq!(second.violations.len(), 1);
    }

    #[test]
    fn quality_drivers_have_no_measured_lines_concept() {
        assert!(!CheckstyleTextDriver::new().measures_lines());
        assert!(!CheckstyleXmlDriver::new().measures_lines());
    }

    #[test]
    fn only_java_paths_are_in_scope() {
        let driver = CheckstyleXmlDriver::new();
        assert!(driver.handles_path("subdir/File.java"));
        assert!(!driver.handles_path("file1.coffee"));
    }
}
