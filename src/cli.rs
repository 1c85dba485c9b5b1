use crate::output::OutputFormat;
use crate::parsers::{
    CheckstyleTextDriver, CheckstyleXmlDriver, CloverDriver, CoberturaDriver, FindbugsDriver,
    JacocoDriver, ReportDriver,
};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Report dialects diffmap can correlate against a diff.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportDialect {
    /// Cobertura coverage XML
    Cobertura,
    /// Clover coverage XML
    Clover,
    /// JaCoCo coverage XML
    Jacoco,
    /// Checkstyle console output
    Checkstyle,
    /// Checkstyle XML report
    CheckstyleXml,
    /// FindBugs/SpotBugs XML report
    Findbugs,
}

impl ReportDialect {
    pub fn driver(self) -> Box<dyn ReportDriver> {
        match self {
            ReportDialect::Cobertura => Box::new(CoberturaDriver::new()),
            ReportDialect::Clover => Box::new(CloverDriver::new()),
            ReportDialect::Jacoco => Box::new(JacocoDriver::new()),
            ReportDialect::Checkstyle => Box::new(CheckstyleTextDriver::new()),
            ReportDialect::CheckstyleXml => Box::new(CheckstyleXmlDriver::new()),
            ReportDialect::Findbugs => Box::new(FindbugsDriver::new()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    Terminal,
    Markdown,
    Json,
}

impl From<FormatArg> for OutputFormat {
    fn from(format: FormatArg) -> Self {
        match format {
            FormatArg::Terminal => OutputFormat::Terminal,
            FormatArg::Markdown => OutputFormat::Markdown,
            FormatArg::Json => OutputFormat::Json,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "diffmap")]
#[command(about = "Diff-scoped coverage and code quality reporter", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Report files to correlate against the diff. Several files of the
    /// same dialect merge as shards: a line is flagged only if every shard
    /// flags it.
    #[arg(required = true)]
    pub reports: Vec<PathBuf>,

    /// Dialect of the supplied report files
    #[arg(short = 'r', long, value_enum)]
    pub report_format: ReportDialect,

    /// Branch to diff against (merge-base comparison)
    #[arg(long)]
    pub compare_branch: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "terminal")]
    pub format: FormatArg,

    /// Output file (defaults to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Exit non-zero when diff coverage is defined and below this percent
    #[arg(long)]
    pub fail_under: Option<f64>,

    /// Configuration file (defaults to .diffmap.toml when present)
    #[arg(long)]
    pub config: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_dialect_builds_a_driver() {
        let dialects = [
            (ReportDialect::Cobertura, "cobertura"),
            (ReportDialect::Clover, "clover"),
            (ReportDialect::Jacoco, "jacoco"),
            (ReportDialect::Checkstyle, "checkstyle"),
            (ReportDialect::CheckstyleXml, "checkstyle-xml"),
            (ReportDialect::Findbugs, "findbugs"),
        ];
        for (dialect, name) in dialects {
            assert_eq!(dialect.driver().name(), name);
        }
    }

    #[test]
    fn args_parse_with_defaults() {
        let cli = Cli::parse_from([
            "diffmap",
            "--report-format",
            "jacoco",
            "coverage.xml",
        ]);
        assert_eq!(cli.report_format, ReportDialect::Jacoco);
        assert_eq!(cli.reports, vec![PathBuf::from("coverage.xml")]);
        assert_eq!(cli.format, FormatArg::Terminal);
        assert_eq!(cli.fail_under, None);
    }

    #[test]
    fn multiple_reports_are_accepted_in_order() {
        let cli = Cli::parse_from([
            "diffmap",
            "-r",
            "clover",
            "shard1.xml",
            "shard2.xml",
            "--fail-under",
            "80",
        ]);
        assert_eq!(cli.reports.len(), 2);
        assert_eq!(cli.fail_under, Some(80.0));
    }
}
