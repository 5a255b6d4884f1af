//! Per-file fix pipeline: line fixers, then whole-file fixers, then a parse
//! check of the result.

use super::line::apply_line_fixers;
use super::registry::FixerRegistry;
use super::FixError;
use crate::diagnostics::Diagnostic;
use serde::Serialize;

/// What fixing one file produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FixOutcome {
    /// Text before fixing.
    #[serde(skip)]
    pub original: String,
    /// Text after fixing.
    #[serde(skip)]
    pub fixed: String,
    /// Diagnostics whose fixer changed the text.
    pub resolved: Vec<Diagnostic>,
    /// Diagnostics left for the user or a later run.
    pub remaining: Vec<Diagnostic>,
}

impl FixOutcome {
    /// Whether the text changed.
    #[must_use]
    pub fn changed(&self) -> bool {
        self.original != self.fixed
    }
}

/// Fix one file's `content` given its diagnostics.
///
/// Fatal diagnostics stop everything. Otherwise line fixers run first, then
/// each whole-file fixer in registry order on the diagnostics of its code,
/// with line numbers moved past any blank lines the line fixers inserted.
/// The whole computation works on in-memory text; on error nothing is
/// returned for writing.
///
/// # Errors
/// - [`FixError::FatalSyntax`] for a fatal diagnostic
/// - [`FixError::InvalidOutput`] when the original parses but the result does not
/// - any error raised by a fixer
pub fn fix_source(
    diagnostics: &[Diagnostic],
    content: &str,
    registry: &FixerRegistry,
) -> Result<FixOutcome, FixError> {
    if let Some(fatal) = diagnostics.iter().find(|d| d.is_fatal()) {
        return Err(FixError::FatalSyntax {
            message: format!("{} {}", fatal.code, fatal.message),
        });
    }

    let lines = apply_line_fixers(content, diagnostics, registry)?;
    let mut resolved = vec![false; diagnostics.len()];
    for index in &lines.resolved {
        resolved[*index] = true;
    }

    let mut text = lines.text.clone();
    for fixer in registry.file_fixers() {
        let (indices, shifted): (Vec<usize>, Vec<Diagnostic>) = diagnostics
            .iter()
            .enumerate()
            .filter(|(_, d)| d.code == fixer.code())
            .map(|(i, d)| {
                let mut moved = d.clone();
                moved.position.line = lines.shifted_line(d.line());
                (i, moved)
            })
            .unzip();
        if shifted.is_empty() {
            continue;
        }
        text = fixer.fix(&shifted, &text)?;
        for index in indices {
            resolved[index] = true;
        }
    }

    if text != content {
        check_still_parses(content, &text)?;
    }

    let (done, left): (Vec<_>, Vec<_>) = diagnostics
        .iter()
        .zip(&resolved)
        .partition(|(_, fixed)| **fixed);

    Ok(FixOutcome {
        original: content.to_owned(),
        fixed: text,
        resolved: done.into_iter().map(|(d, _)| d.clone()).collect(),
        remaining: left.into_iter().map(|(d, _)| d.clone()).collect(),
    })
}

/// Reject output that no longer parses when the input did.
fn check_still_parses(original: &str, fixed: &str) -> Result<(), FixError> {
    if ruff_python_parser::parse_module(original).is_err() {
        return Ok(());
    }
    ruff_python_parser::parse_module(fixed)
        .map(|_| ())
        .map_err(|e| FixError::InvalidOutput {
            message: e.to_string(),
        })
}
