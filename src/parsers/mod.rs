//! Report format drivers.
//!
//! One driver per supported report dialect, all exposing the same
//! `parse -> FileReport` contract. Callers select a driver by configuration;
//! nothing downstream inspects the concrete type.
//!
//! Coverage dialects (cobertura, clover, jacoco) follow one policy: a line
//! with hit count zero becomes a message-less violation, and any line present
//! in the report counts as measured regardless of hits. Quality dialects
//! (checkstyle, findbugs) have no measured-lines concept at all.

pub mod checkstyle;
pub mod clover;
pub mod cobertura;
pub mod findbugs;
pub mod jacoco;

use crate::core::FileReport;
use crate::errors::DiffmapError;

pub use checkstyle::{CheckstyleTextDriver, CheckstyleXmlDriver};
pub use clover::CloverDriver;
pub use cobertura::CoberturaDriver;
pub use findbugs::FindbugsDriver;
pub use jacoco::JacocoDriver;

/// A parser for one report dialect.
///
/// Drivers are stateless; the accessor owns payloads and caching.
pub trait ReportDriver: Send + Sync {
    /// Stable identifier for the report kind, used in rendering and errors.
    fn name(&self) -> &'static str;

    /// Parse one raw payload into the canonical per-file model.
    ///
    /// A structurally invalid payload is a hard error. A payload that parses
    /// but references zero files yields an empty `FileReport`.
    fn parse(&self, payload: &str) -> Result<FileReport, DiffmapError>;

    /// Whether this dialect has a measured-lines concept. Coverage drivers
    /// do; lint and bug drivers do not.
    fn measures_lines(&self) -> bool {
        true
    }

    /// Source-file extensions this driver family understands. An empty slice
    /// means any file.
    fn file_extensions(&self) -> &'static [&'static str] {
        &[]
    }

    /// Whether a query for `path` is meaningful for this driver. Paths
    /// outside the family yield empty results, letting callers run several
    /// language-specific accessors over a mixed-language diff.
    fn handles_path(&self, path: &str) -> bool {
        let extensions = self.file_extensions();
        if extensions.is_empty() {
            return true;
        }
        path.rsplit('.')
            .next()
            .map(|ext| extensions.contains(&ext))
            .unwrap_or(false)
    }
}

/// Parse an XML payload, mapping syntax errors to a malformed-report error
/// naming the driver.
pub(crate) fn parse_xml_document<'a>(
    driver: &'static str,
    payload: &'a str,
) -> Result<roxmltree::Document<'a>, DiffmapError> {
    roxmltree::Document::parse(payload)
        .map_err(|err| DiffmapError::malformed(driver, err.to_string()))
}

/// Read an attribute as a line number, ignoring values that do not parse.
/// Report schemas are best-effort external contracts; unknown or garbled
/// attributes on individual elements degrade to skipping that element.
pub(crate) fn attr_usize(node: &roxmltree::Node<'_, '_>, name: &str) -> Option<usize> {
    node.attribute(name).and_then(|value| value.parse().ok())
}
