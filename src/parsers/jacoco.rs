//! JaCoCo XML coverage driver.
//!
//! JaCoCo splits the file path across the tree: `<package name="...">` gives
//! the parent directory and `<sourcefile name="...">` the file name, with
//! `<line nr="..." ci="..."/>` elements underneath. `ci` is the covered
//! instruction count for the line.

use super::{attr_usize, parse_xml_document, ReportDriver};
use crate::core::{FileReport, Violation};
use crate::errors::DiffmapError;

#[derive(Debug, Default, Clone, Copy)]
pub struct JacocoDriver;

impl JacocoDriver {
    pub fn new() -> Self {
        JacocoDriver
    }
}

fn join_package_path(package: &str, file_name: &str) -> String {
    if package.is_empty() {
        file_name.to_string()
    } else {
        format!("{package}/{file_name}")
    }
}

impl ReportDriver for JacocoDriver {
    fn name(&self) -> &'static str {
        "jacoco"
    }

    fn parse(&self, payload: &str) -> Result<FileReport, DiffmapError> {
        let document = parse_xml_document(self.name(), payload)?;
        let mut report = FileReport::new();

        for package in document
            .descendants()
            .filter(|node| node.has_tag_name("package"))
        {
            let package_name = package.attribute("name").unwrap_or("");

            for sourcefile in package
                .children()
                .filter(|node| node.has_tag_name("sourcefile"))
            {
                let Some(file_name) = sourcefile.attribute("name") else {
                    continue;
                };
                let path = join_package_path(package_name, file_name);

                for line in sourcefile
                    .children()
                    .filter(|node| node.has_tag_name("line"))
                {
                    let Some(nr) = attr_usize(&line, "nr") else {
                        continue;
                    };
                    let Some(ci) = attr_usize(&line, "ci") else {
                        continue;
                    };

                    report.add_measured(&path, nr);
                    if ci == 0 {
                        report.add_violation(&path, Violation::bare(nr));
                    }
                }
            }
        }

        Ok(report)
    }
}
