//! Cobertura XML coverage driver.
//!
//! Cobertura keys coverage by `<class filename="...">` nodes, each holding
//! `<line number="..." hits="..."/>` elements under a `<lines>` wrapper.

use super::{attr_usize, parse_xml_document, ReportDriver};
use crate::core::{FileReport, Violation};
use crate::errors::DiffmapError;

#[derive(Debug, Default, Clone, Copy)]
pub struct CoberturaDriver;

impl CoberturaDriver {
    pub fn new() -> Self {
        CoberturaDriver
    }
}

impl ReportDriver for CoberturaDriver {
    fn name(&self) -> &'static str {
        "cobertura"
    }

    fn parse(&self, payload: &str) -> Result<FileReport, DiffmapError> {
        let document = parse_xml_document(self.name(), payload)?;
        let mut report = FileReport::new();

        for class in document
            .descendants()
            .filter(|node| node.has_tag_name("class"))
        {
            let Some(filename) = class.attribute("filename") else {
                continue;
            };

            for line in class
                .descendants()
                .filter(|node| node.has_tag_name("line"))
            {
                let Some(number) = attr_usize(&line, "number") else {
                    continue;
                };
                let Some(hits) = attr_usize(&line, "hits") else {
                    continue;
                };

                report.add_measured(filename, number);
                if hits == 0 {
                    report.add_violation(filename, Violation::bare(number));
                }
            }
        }

        Ok(report)
    }
}
