use anyhow::{Context, Result};
use clap::Parser;
use diffmap::cli::Cli;
use diffmap::config::DiffmapConfig;
use diffmap::correlate::generate_report;
use diffmap::diff::GitDiffSource;
use diffmap::output::create_writer;
use diffmap::report::ReportAccessor;
use std::fs;
use std::io::Write;

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let config = DiffmapConfig::load_or_default(cli.config.as_deref())?;

    let payloads = cli
        .reports
        .iter()
        .map(|path| {
            fs::read_to_string(path)
                .with_context(|| format!("failed to read report {}", path.display()))
        })
        .collect::<Result<Vec<_>>>()?;
    let accessor = ReportAccessor::new(cli.report_format.driver(), payloads);

    let compare_branch = cli
        .compare_branch
        .as_deref()
        .unwrap_or(&config.compare_branch);
    let diff = GitDiffSource::new(compare_branch).load()?;

    let report = generate_report(&diff, &accessor)?;

    let destination: Box<dyn Write> = match &cli.output {
        Some(path) => Box::new(fs::File::create(path).with_context(|| {
            format!("failed to create output file {}", path.display())
        })?),
        None => Box::new(std::io::stdout()),
    };
    let mut writer = create_writer(cli.format.into(), destination);
    writer.write_report(&report)?;

    let fail_under = cli.fail_under.or(config.fail_under);
    if let (Some(bar), Some(percent)) = (fail_under, report.percent_covered()) {
        if percent < bar {
            log::warn!("diff coverage {percent:.1}% is below the required {bar:.1}%");
            std::process::exit(1);
        }
    }
    Ok(())
}
