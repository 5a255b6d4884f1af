//! The fix command: apply fixers to every file named in a report.

use crate::diagnostics::{Diagnostic, Report};
use crate::fix::{fix_source, FixerRegistry};
use crate::utils::normalize_display_path;

use anyhow::Result;
use colored::Colorize;
use rayon::prelude::*;
use serde::Serialize;
use std::fs;
use std::io::Write;
use std::path::Path;

/// Options for the fix command.
#[derive(Debug, Default, Clone, Copy)]
#[allow(clippy::struct_excessive_bools)]
pub struct FixOptions {
    /// Compute fixes without writing files.
    pub dry_run: bool,
    /// List fixed and remaining diagnostics per file.
    pub verbose: bool,
    /// Print a JSON summary instead of text.
    pub json: bool,
}

/// What happened to one file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FileStatus {
    /// The text changed (and was written unless dry-running).
    Fixed,
    /// Nothing to change.
    Unchanged,
    /// The file was left untouched because of an error.
    Failed,
}

/// Per-file result.
#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    /// Display path.
    pub file: String,
    /// Outcome.
    pub status: FileStatus,
    /// Diagnostics a fixer dealt with.
    pub resolved: Vec<Diagnostic>,
    /// Diagnostics left as they were.
    pub remaining: Vec<Diagnostic>,
    /// Error message for failed files.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Result of a whole run.
#[derive(Debug, Default, Clone, Serialize)]
pub struct FixSummary {
    /// One entry per file, in path order.
    pub files: Vec<FileReport>,
    /// Report lines that were skipped.
    pub warnings: Vec<String>,
    /// Whether files were left unwritten on purpose.
    pub dry_run: bool,
}

impl FixSummary {
    /// Whether any file failed.
    #[must_use]
    pub fn has_failures(&self) -> bool {
        self.files.iter().any(|f| f.status == FileStatus::Failed)
    }

    /// Number of files whose text changed.
    #[must_use]
    pub fn fixed_files(&self) -> usize {
        self.files
            .iter()
            .filter(|f| f.status == FileStatus::Fixed)
            .count()
    }

    /// Number of diagnostics resolved across all files.
    #[must_use]
    pub fn resolved_count(&self) -> usize {
        self.files.iter().map(|f| f.resolved.len()).sum()
    }
}

/// Fix every file in `report` and describe the outcome on `writer`.
///
/// Files are processed in parallel; each file is read once and written only
/// when its text changed and `dry_run` is off. A failing file never stops
/// the others.
///
/// # Errors
///
/// Returns an error if writing to `writer` fails.
pub fn run_fix<W: Write>(
    report: &Report,
    registry: &FixerRegistry,
    options: &FixOptions,
    mut writer: W,
) -> Result<FixSummary> {
    if options.verbose {
        eprintln!(
            "[VERBOSE] {} diagnostics in {} files",
            report.diagnostic_count(),
            report.files.len()
        );
        eprintln!("[VERBOSE] Enabled fixers:");
        for (code, description) in registry.descriptions() {
            eprintln!("[VERBOSE]   {code}  {description}");
        }
    }

    let entries: Vec<(&Path, &[Diagnostic])> = report
        .files
        .iter()
        .map(|(path, diagnostics)| (path.as_path(), diagnostics.as_slice()))
        .collect();

    // `collect` keeps input order, so reports stay sorted by path.
    let files: Vec<FileReport> = entries
        .par_iter()
        .map(|(path, diagnostics)| fix_file(path, diagnostics, registry, options.dry_run))
        .collect();

    let summary = FixSummary {
        files,
        warnings: report.warnings.iter().map(ToString::to_string).collect(),
        dry_run: options.dry_run,
    };

    if options.json {
        writeln!(writer, "{}", serde_json::to_string_pretty(&summary)?)?;
    } else {
        print_summary(&mut writer, &summary, options)?;
    }
    Ok(summary)
}

/// Fix one file. Every error is captured in the returned report.
fn fix_file(
    path: &Path,
    diagnostics: &[Diagnostic],
    registry: &FixerRegistry,
    dry_run: bool,
) -> FileReport {
    let file = normalize_display_path(path);
    let failed = |error: String| FileReport {
        file: file.clone(),
        status: FileStatus::Failed,
        resolved: Vec::new(),
        remaining: diagnostics.to_vec(),
        error: Some(error),
    };

    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => return failed(format!("cannot read file: {e}")),
    };

    let outcome = match fix_source(diagnostics, &content, registry) {
        Ok(outcome) => outcome,
        Err(e) => return failed(e.to_string()),
    };

    if !outcome.changed() {
        return FileReport {
            file,
            status: FileStatus::Unchanged,
            resolved: outcome.resolved,
            remaining: outcome.remaining,
            error: None,
        };
    }

    if !dry_run {
        if let Err(e) = fs::write(path, &outcome.fixed) {
            return failed(format!("cannot write file: {e}"));
        }
    }

    FileReport {
        file,
        status: FileStatus::Fixed,
        resolved: outcome.resolved,
        remaining: outcome.remaining,
        error: None,
    }
}

fn print_summary<W: Write>(
    writer: &mut W,
    summary: &FixSummary,
    options: &FixOptions,
) -> Result<()> {
    for warning in &summary.warnings {
        writeln!(writer, "{} {warning}", "Warning:".yellow())?;
    }

    let fixed_label = if options.dry_run {
        "Would fix:".yellow()
    } else {
        "Fixed:".green()
    };

    for file in &summary.files {
        match file.status {
            FileStatus::Fixed => writeln!(
                writer,
                "{fixed_label} {} ({} resolved)",
                file.file,
                file.resolved.len()
            )?,
            FileStatus::Failed => writeln!(
                writer,
                "{} {}: {}",
                "Failed:".red(),
                file.file,
                file.error.as_deref().unwrap_or("unknown error")
            )?,
            FileStatus::Unchanged => {}
        }

        if options.verbose {
            for diagnostic in &file.resolved {
                writeln!(writer, "    {} {diagnostic}", "fixed".green())?;
            }
            for diagnostic in &file.remaining {
                writeln!(writer, "    {} {diagnostic}", "remaining".dimmed())?;
            }
        }
    }

    if options.verbose {
        writeln!(
            writer,
            "\n{} files changed, {} diagnostics resolved",
            summary.fixed_files(),
            summary.resolved_count()
        )?;
    }
    Ok(())
}
