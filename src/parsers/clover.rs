//! Clover XML coverage driver.
//!
//! Clover nests `<line num="..." count="..." type="..."/>` elements under
//! `<file path="...">` nodes. Only statement lines carry coverage; method
//! and conditional entries are skipped when typed.

use super::{attr_usize, parse_xml_document, ReportDriver};
use crate::core::{FileReport, Violation};
use crate::errors::DiffmapError;

#[derive(Debug, Default, Clone, Copy)]
pub struct CloverDriver;

impl CloverDriver {
    pub fn new() -> Self {
        CloverDriver
    }
}

impl ReportDriver for CloverDriver {
    fn name(&self) -> &'static str {
        "clover"
    }

    fn parse(&self, payload: &str) -> Result<FileReport, DiffmapError> {
        let document = parse_xml_document(self.name(), payload)?;
        let mut report = FileReport::new();

        for file in document
            .descendants()
            .filter(|node| node.has_tag_name("file"))
        {
            let Some(path) = file.attribute("path").or_else(|| file.attribute("name"))
            else {
                continue;
            };

            for line in file.children().filter(|node| node.has_tag_name("line")) {
                if let Some(kind) = line.attribute("type") {
                    if kind != "stmt" {
                        continue;
                    }
                }
                let Some(num) = attr_usize(&line, "num") else {
                    continue;
                };
                let Some(count) = attr_usize(&line, "count") else {
                    continue;
                };

                report.add_measured(path, num);
                if count == 0 {
                    report.add_violation(path, Violation::bare(num));
                }
            }
        }

        Ok(report)
    }
}
