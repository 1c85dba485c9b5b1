//! FindBugs/SpotBugs XML quality driver.
//!
//! A `<BugInstance>` is one finding, but one finding can annotate several
//! source locations: a primary `<SourceLine>` plus secondary occurrences
//! (`role="SOURCE_LINE_ANOTHER_INSTANCE"`). Each annotation names its own
//! `sourcepath`, so a single finding can contribute violations to more than
//! one file. Annotations marked `synthetic` carry no concrete source line
//! (class- or field-level findings) and are dropped.
//!
//! Only `<SourceLine>` elements that are direct children of the
//! `<BugInstance>` count; the copies nested inside `<Class>` and `<Method>`
//! context elements describe scope, not findings.

use super::{attr_usize, parse_xml_document, ReportDriver};
use crate::core::{FileReport, Violation};
use crate::errors::DiffmapError;

#[derive(Debug, Default, Clone, Copy)]
pub struct FindbugsDriver;

impl FindbugsDriver {
    pub fn new() -> Self {
        FindbugsDriver
    }
}

impl ReportDriver for FindbugsDriver {
    fn name(&self) -> &'static str {
        "findbugs"
    }

    fn parse(&self, payload: &str) -> Result<FileReport, DiffmapError> {
        let document = parse_xml_document(self.name(), payload)?;
        let mut report = FileReport::new();

        for bug in document
            .descendants()
            .filter(|node| node.has_tag_name("BugInstance"))
        {
            let category = bug.attribute("category").unwrap_or("UNKNOWN");
            let short_message = bug
                .children()
                .find(|node| node.has_tag_name("ShortMessage"))
                .and_then(|node| node.text())
                .map(str::trim)
                .unwrap_or("");
            let message = format!("{category}: {short_message}");

            for annotation in bug
                .children()
                .filter(|node| node.has_tag_name("SourceLine"))
            {
                if annotation.attribute("synthetic") == Some("true") {
                    continue;
                }
                let Some(start) = attr_usize(&annotation, "start") else {
                    continue;
                };
                let Some(path) = annotation
                    .attribute("sourcepath")
                    .or_else(|| annotation.attribute("sourcefile"))
                else {
                    continue;
                };

                report.add_violation(path, Violation::new(start, message.clone()));
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
