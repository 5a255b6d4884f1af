use crate::analyzer::{read_report, AnalyzerError, Flake8};
use crate::cli::Cli;
use crate::commands::{run_fix, FixOptions};
use crate::config::Config;
use crate::constants::DEFAULT_ANALYZER;
use crate::diagnostics::parse_report;
use crate::fix::FixerRegistry;

use anyhow::Result;
use clap::Parser;
use colored::Colorize;

/// Exit status when every file was processed.
pub const EXIT_OK: i32 = 0;
/// Exit status when at least one file could not be fixed.
pub const EXIT_FILE_FAILED: i32 = 1;
/// Exit status when no report could be obtained, or for usage errors.
pub const EXIT_NO_REPORT: i32 = 2;

/// Runs flakefix with the given arguments.
///
/// # Errors
///
/// Returns an error if writing to stdout fails.
pub fn run_with_args(args: Vec<String>) -> Result<i32> {
    run_with_args_to(args, &mut std::io::stdout())
}

/// Run flakefix with the given arguments, writing output to the specified writer.
///
/// This is the testable version of `run_with_args` that allows output capture.
///
/// # Errors
///
/// Returns an error if writing to `writer` fails.
pub fn run_with_args_to<W: std::io::Write>(args: Vec<String>, writer: &mut W) -> Result<i32> {
    let mut program_args = vec!["flakefix".to_owned()];
    program_args.extend(args);
    let cli_var = match Cli::try_parse_from(program_args) {
        Ok(c) => c,
        Err(e) => match e.kind() {
            clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion => {
                write!(writer, "{e}")?;
                writer.flush()?;
                return Ok(EXIT_OK);
            }
            _ => {
                eprint!("{e}");
                return Ok(EXIT_NO_REPORT);
            }
        },
    };

    let config = Config::load();
    let settings = &config.flakefix;
    let verbose = cli_var.output.verbose || settings.verbose.unwrap_or(false);

    if verbose && !cli_var.output.json {
        eprintln!("[VERBOSE] flakefix v{}", env!("CARGO_PKG_VERSION"));
        eprintln!("[VERBOSE] Using {} threads", rayon::current_num_threads());
        if let Some(path) = &config.config_file_path {
            eprintln!("[VERBOSE] Config: {}", path.display());
        }
    }

    let select = if cli_var.filters.select.is_empty() {
        settings.select.clone().unwrap_or_default()
    } else {
        cli_var.filters.select.clone()
    };
    let mut ignore = settings.ignore.clone().unwrap_or_default();
    ignore.extend(cli_var.filters.ignore.iter().cloned());
    let registry = FixerRegistry::builder().select(select).ignore(ignore).build();

    let report_text = match obtain_report(&cli_var, &config, verbose) {
        Ok(text) => text,
        Err(e) => {
            eprintln!("{} {e}", "Error:".red());
            return Ok(EXIT_NO_REPORT);
        }
    };
    let report = parse_report(&report_text);

    let options = FixOptions {
        dry_run: cli_var.output.dry_run,
        verbose,
        json: cli_var.output.json,
    };
    let summary = run_fix(&report, &registry, &options, &mut *writer)?;
    writer.flush()?;

    Ok(if summary.has_failures() {
        EXIT_FILE_FAILED
    } else {
        EXIT_OK
    })
}

/// Read the saved report, or run the configured analyzer.
fn obtain_report(cli: &Cli, config: &Config, verbose: bool) -> Result<String, AnalyzerError> {
    if let Some(path) = &cli.report {
        return read_report(path);
    }

    let command = cli
        .analyzer
        .as_deref()
        .or(config.flakefix.analyzer.as_deref())
        .unwrap_or(DEFAULT_ANALYZER);
    let analyzer = Flake8::from_command(
        command,
        config.flakefix.analyzer_args.clone().unwrap_or_default(),
    );
    if verbose {
        eprintln!(
            "[VERBOSE] Running: {} {}",
            analyzer.program,
            analyzer.command_args(&cli.analyzer_args).join(" ")
        );
    }
    analyzer.run(&cli.analyzer_args)
}
