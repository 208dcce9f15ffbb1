//! `sheet-inspect` command line tool.

use anyhow::Context;
use anyhow::Result;
use clap::Parser;
use sheet_inspect::commands::run_analyze;
use sheet_inspect::commands::run_convert;
use sheet_inspect::commands::run_details;
use sheet_inspect::config::ConvertOptions;
use sheet_inspect::config::DetailsOptions;
use sheet_inspect::logging::init_logging;
use sheet_inspect::logging::LogConfig;
use sheet_inspect::logging::LogFormat;
use sheet_inspect::LoadOptions;
use sheet_inspect::SheetSelector;
use std::io;
use std::io::IsTerminal;
use tracing::level_filters::LevelFilter;

mod cli;

use crate::cli::Cli;
use crate::cli::Command;
use crate::cli::LogFormatArg;
use crate::cli::LogLevelArg;

fn main() {
    let cli = Cli::parse();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    if let Err(error) = run(cli.command) {
        eprintln!("error: {error:#}");
        std::process::exit(1);
    }
}

fn run(command: Command) -> Result<()> {
    match command {
        Command::Analyze(args) => {
            let selector = args.sheet.as_deref().map(SheetSelector::parse).unwrap_or(SheetSelector::All);
            let report = run_analyze(&args.workbook, &selector, &LoadOptions::from(&args.load))
                .with_context(|| format!("analyze '{}'", args.workbook.display()))?;
            print!("{report}");
        }
        Command::Details(args) => {
            let report = run_details(&args.workbook, &args.sheet, &LoadOptions::from(&args.load), &DetailsOptions::from(&args))
                .with_context(|| format!("details of sheet '{}' in '{}'", args.sheet, args.workbook.display()))?;
            print!("{report}");
        }
        Command::Convert(args) => {
            let summary = run_convert(&args.workbook, &LoadOptions::from(&args.load), &ConvertOptions::from(&args))
                .with_context(|| format!("convert sheet '{}' of '{}'", args.sheet, args.workbook.display()))?;
            println!("Successfully converted sheet '{}' to '{}'", args.sheet, summary.path.display());
            println!("Total rows: {}", summary.rows);
            println!("Total columns: {}", summary.columns);
            println!("{}", columns_line(&summary.labels));
        }
    }
    Ok(())
}

fn columns_line(labels: &[String]) -> String {
    let quoted: Vec<String> = labels.iter().map(|label| format!("'{label}'")).collect();
    format!("Columns: [{}]", quoted.join(", "))
}

/// Flags win over `RUST_LOG`; `--log-level` wins over `-v`/`-q`.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        ..LogConfig::default()
    };
    config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());
    if let Some(level) = cli.log_level {
        config.level_filter = match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        };
    }
    config.format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    config.log_file = cli.log_file.clone();
    config.with_ansi = cli.log_file.is_none() && io::stderr().is_terminal();
    config
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converted_labels_are_listed() {
        let labels = vec!["Date".to_string(), "MCP (Rs./kWh)".to_string()];
        assert_eq!(columns_line(&labels), "Columns: ['Date', 'MCP (Rs./kWh)']");
        assert_eq!(columns_line(&[]), "Columns: []");
    }
}
