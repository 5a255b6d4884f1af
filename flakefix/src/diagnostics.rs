//! Parsing of the analyzer report into per-file diagnostics.
//!
//! The report is expected in the `path:line:col:code:message` format
//! requested through [`crate::constants::FLAKE8_FORMAT`]. Columns are
//! normalized here, per code, to the crate's canonical zero-based character
//! column; nothing downstream sees the analyzer's raw convention.

use crate::constants::{CODE_RE, FATAL_CODES};
use crate::position::Position;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// How the analyzer reports the column of a given code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnConvention {
    /// One-based column of the target character.
    OneBased,
    /// One-based column of the character *before* the target (E262 reports
    /// the `#`, the edit happens just after it).
    OneBasedBeforeTarget,
    /// Only the line is meaningful.
    LineOnly,
}

impl ColumnConvention {
    /// The convention the analyzer uses for `code`.
    #[must_use]
    pub fn for_code(code: &str) -> Self {
        match code {
            "E262" => Self::OneBasedBeforeTarget,
            "E302" => Self::LineOnly,
            _ => Self::OneBased,
        }
    }

    /// Convert a reported column to the canonical zero-based column.
    #[must_use]
    pub const fn normalize(self, reported: usize) -> usize {
        match self {
            Self::OneBased => reported.saturating_sub(1),
            Self::OneBasedBeforeTarget => reported,
            Self::LineOnly => 0,
        }
    }
}

/// A single issue reported by the analyzer.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Diagnostic {
    /// Canonical position (one-based line, zero-based character column).
    pub position: Position,
    /// Short code such as `F401`.
    pub code: String,
    /// Free text; for `F401` it carries the quoted import name.
    pub message: String,
    /// Column exactly as the analyzer printed it.
    pub reported_column: usize,
}

impl Diagnostic {
    /// Build a diagnostic from analyzer coordinates, normalizing the column.
    #[must_use]
    pub fn from_report(
        line: usize,
        reported_column: usize,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        let code = code.into();
        let column = ColumnConvention::for_code(&code).normalize(reported_column);
        Self {
            position: Position::new(line, column),
            code,
            message: message.into(),
            reported_column,
        }
    }

    /// One-based line number.
    #[must_use]
    pub const fn line(&self) -> usize {
        self.position.line
    }

    /// Canonical zero-based column.
    #[must_use]
    pub const fn column(&self) -> usize {
        self.position.column
    }

    /// Whether this diagnostic means the file could not be parsed at all.
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        FATAL_CODES.contains(&self.code.as_str())
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}: {} {}",
            self.position.line, self.reported_column, self.code, self.message
        )
    }
}

/// Problems with the report itself (as opposed to the diagnosed files).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReportError {
    /// A report line did not split into `path:line:col:code:message`.
    #[error("report line {line_number}: expected `path:line:col:code:message`, got {line:?}")]
    MalformedLine {
        /// One-based line number within the report.
        line_number: usize,
        /// The offending line.
        line: String,
    },
}

impl ReportError {
    /// One-based report line the error refers to.
    #[must_use]
    pub fn line_number(&self) -> usize {
        match self {
            Self::MalformedLine { line_number, .. } => *line_number,
        }
    }
}

/// Parsed analyzer report.
#[derive(Debug, Default, Clone)]
pub struct Report {
    /// Diagnostics grouped by file, each group sorted by
    /// `(line, column, code, message)`.
    pub files: BTreeMap<PathBuf, Vec<Diagnostic>>,
    /// Lines that were skipped because they could not be parsed.
    pub warnings: Vec<ReportError>,
}

impl Report {
    /// Total number of diagnostics across all files.
    #[must_use]
    pub fn diagnostic_count(&self) -> usize {
        self.files.values().map(Vec::len).sum()
    }

    /// Whether the report contains no diagnostics.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

/// Parse analyzer output into a [`Report`].
///
/// Malformed lines are collected as warnings and skipped; they never abort
/// parsing of the remaining lines.
#[must_use]
pub fn parse_report(output: &str) -> Report {
    let mut lines: Vec<(usize, &str)> = output
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim_end_matches('\r')))
        .filter(|(_, line)| !line.trim().is_empty())
        .collect();
    lines.sort_by(|a, b| a.1.cmp(b.1));

    let mut report = Report::default();
    for (line_number, line) in lines {
        match parse_line(line) {
            Some((path, diagnostic)) => report.files.entry(path).or_default().push(diagnostic),
            None => report.warnings.push(ReportError::MalformedLine {
                line_number,
                line: line.to_owned(),
            }),
        }
    }

    for diagnostics in report.files.values_mut() {
        diagnostics.sort();
    }
    report.warnings.sort_by_key(ReportError::line_number);

    report
}

fn parse_line(line: &str) -> Option<(PathBuf, Diagnostic)> {
    let mut parts = line.splitn(5, ':');
    let path = parts.next().filter(|p| !p.is_empty())?;
    let line_no = parts.next()?.trim().parse::<usize>().ok()?;
    let column = parts.next()?.trim().parse::<usize>().ok()?;
    let code = parts.next()?.trim();
    let message = parts.next()?;

    if !CODE_RE().is_match(code) {
        return None;
    }

    Some((
        PathBuf::from(path),
        Diagnostic::from_report(line_no, column, code, message.trim_start()),
    ))
}
