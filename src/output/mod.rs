//! Report writers.
//!
//! Writers only render; the `DiffReport` handed to them is already final.

use crate::correlate::{CorrelationResult, DiffReport};
use colored::*;
use std::io::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Terminal,
    Markdown,
    Json,
}

pub trait OutputWriter {
    fn write_report(&mut self, report: &DiffReport) -> anyhow::Result<()>;
}

pub fn create_writer(format: OutputFormat, writer: Box<dyn Write>) -> Box<dyn OutputWriter> {
    match format {
        OutputFormat::Terminal => Box::new(TerminalWriter::new(writer)),
        OutputFormat::Markdown => Box::new(MarkdownWriter::new(writer)),
        OutputFormat::Json => Box::new(JsonWriter::new(writer)),
    }
}

fn format_percent(percent: Option<f64>) -> String {
    match percent {
        Some(value) => format!("{value:.1}%"),
        None => "n/a".to_string(),
    }
}

pub struct JsonWriter<W: Write> {
    writer: W,
}

impl<W: Write> JsonWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputWriter for JsonWriter<W> {
    fn write_report(&mut self, report: &DiffReport) -> anyhow::Result<()> {
        let mut value = serde_json::to_value(report)?;
        if let Some(object) = value.as_object_mut() {
            object.insert(
                "percent_covered".to_string(),
                serde_json::to_value(report.percent_covered())?,
            );
        }
        let json = serde_json::to_string_pretty(&value)?;
        self.writer.write_all(json.as_bytes())?;
        writeln!(self.writer)?;
        Ok(())
    }
}

pub struct TerminalWriter<W: Write> {
    writer: W,
}

impl<W: Write> TerminalWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    fn write_file(&mut self, file: &CorrelationResult) -> anyhow::Result<()> {
        let percent = format_percent(file.percent_covered);
        let header = format!("{} ({percent})", file.path);
        if file.violations.is_empty() {
            writeln!(self.writer, "{}", header.green())?;
        } else {
            writeln!(self.writer, "{}", header.yellow())?;
        }

        for violation in &file.violations {
            match &violation.message {
                Some(message) => {
                    writeln!(self.writer, "  line {}: {}", violation.line, message)?
                }
                None => writeln!(self.writer, "  line {}: not covered", violation.line)?,
            }
        }
        Ok(())
    }
}

impl<W: Write> OutputWriter for TerminalWriter<W> {
    fn write_report(&mut self, report: &DiffReport) -> anyhow::Result<()> {
        writeln!(self.writer, "{}", "Diff Report".bold())?;
        writeln!(self.writer, "Report kind: {}", report.report_name)?;
        writeln!(self.writer)?;

        for file in &report.files {
            self.write_file(file)?;
        }
        if report.files.is_empty() {
            writeln!(self.writer, "No files changed.")?;
        }

        writeln!(self.writer)?;
        writeln!(self.writer, "Changed lines:  {}", report.total_changed)?;
        writeln!(
            self.writer,
            "Measured:       {}",
            report.total_measured_changed
        )?;
        writeln!(self.writer, "Violations:     {}", report.total_violations())?;

        let overall = format_percent(report.percent_covered());
        let line = format!("Diff coverage:  {overall}");
        match report.percent_covered() {
            Some(value) if value < 100.0 => writeln!(self.writer, "{}", line.yellow())?,
            Some(_) => writeln!(self.writer, "{}", line.green())?,
            None => writeln!(self.writer, "{line}")?,
        }
        Ok(())
    }
}

pub struct MarkdownWriter<W: Write> {
    writer: W,
}

impl<W: Write> MarkdownWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputWriter for MarkdownWriter<W> {
    fn write_report(&mut self, report: &DiffReport) -> anyhow::Result<()> {
        writeln!(self.writer, "# Diff Report: {}", report.report_name)?;
        writeln!(self.writer)?;
        writeln!(self.writer, "| File | Changed | Measured | Coverage |")?;
        writeln!(self.writer, "|------|---------|----------|----------|")?;
        for file in &report.files {
            writeln!(
                self.writer,
                "| {} | {} | {} | {} |",
                file.path,
                file.changed_lines,
                file.measured_changed,
                format_percent(file.percent_covered)
            )?;
        }
        writeln!(self.writer)?;

        let flagged: Vec<_> = report
            .files
            .iter()
            .filter(|file| !file.violations.is_empty())
            .collect();
        if !flagged.is_empty() {
            writeln!(self.writer, "## Violations")?;
            writeln!(self.writer)?;
            for file in flagged {
                for violation in &file.violations {
                    match &violation.message {
                        Some(message) => writeln!(
                            self.writer,
                            "- `{}:{}` {}",
                            file.path, violation.line, message
                        )?,
                        None => writeln!(
                            self.writer,
                            "- `{}:{}` not covered",
                            file.path, violation.line
                        )?,
                    }
                }
            }
            writeln!(self.writer)?;
        }

        writeln!(
            self.writer,
            "**Total**: {} changed, {} measured, {} violations, {} diff coverage",
            report.total_changed,
            report.total_measured_changed,
            report.total_violations(),
            format_percent(report.percent_covered())
        )?;
        Ok(())
    }
}
