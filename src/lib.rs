// Export modules for library usage
pub mod cli;
pub mod config;
pub mod core;
pub mod correlate;
pub mod diff;
pub mod errors;
pub mod output;
pub mod parsers;
pub mod report;

// Re-export commonly used types
pub use crate::core::{FileEntry, FileReport, Violation};

pub use crate::correlate::{
    correlate_file, generate_report, CorrelationResult, DiffReport,
};

pub use crate::diff::{DiffSource, GitDiffSource, InMemoryDiff};

pub use crate::errors::DiffmapError;

pub use crate::output::{create_writer, OutputFormat, OutputWriter};

pub use crate::parsers::{
    CheckstyleTextDriver, CheckstyleXmlDriver, CloverDriver, CoberturaDriver, FindbugsDriver,
    JacocoDriver, ReportDriver,
};

pub use crate::report::ReportAccessor;
