//! Single-line fixers and the pass that applies them to a file.

use super::registry::FixerRegistry;
use super::FixError;
use crate::diagnostics::Diagnostic;
use crate::position::char_to_byte_column;

/// One physical line plus the canonical column a diagnostic points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodeLine<'a> {
    /// Line text without its terminator.
    pub text: &'a str,
    /// One-based line number.
    pub line: usize,
    /// Zero-based character column.
    pub column: usize,
}

impl<'a> CodeLine<'a> {
    /// Create a code line.
    #[must_use]
    pub const fn new(text: &'a str, line: usize, column: usize) -> Self {
        Self { text, line, column }
    }

    fn stale(&self, column: usize, expected: impl Into<String>, found: impl Into<String>) -> FixError {
        FixError::StalePosition {
            line: self.line,
            column,
            expected: expected.into(),
            found: found.into(),
        }
    }

    fn byte_column(&self, column: usize) -> Result<usize, FixError> {
        char_to_byte_column(self.text, column).ok_or_else(|| {
            self.stale(
                column,
                "a column within the line",
                format!("a line of {} characters", self.text.chars().count()),
            )
        })
    }

    /// Insert `ch` before character `column`; `column == len` appends.
    ///
    /// # Errors
    /// Returns [`FixError::StalePosition`] when `column` is past the end
    pub fn insert_character_at(&self, column: usize, ch: char) -> Result<String, FixError> {
        let at = self.byte_column(column)?;
        let mut text = String::with_capacity(self.text.len() + ch.len_utf8());
        text.push_str(&self.text[..at]);
        text.push(ch);
        text.push_str(&self.text[at..]);
        Ok(text)
    }

    /// Remove the character at `column`, which must be `ch`.
    ///
    /// # Errors
    /// Returns [`FixError::StalePosition`] when another character (or none)
    /// is found there
    pub fn remove_character_at(&self, column: usize, ch: char) -> Result<String, FixError> {
        let at = self.byte_column(column)?;
        match self.text[at..].chars().next() {
            Some(found) if found == ch => {
                let mut text = self.text.to_owned();
                text.replace_range(at..at + ch.len_utf8(), "");
                Ok(text)
            }
            Some(found) => Err(self.stale(column, format!("{ch:?}"), format!("{found:?}"))),
            None => Err(self.stale(column, format!("{ch:?}"), "end of line")),
        }
    }

    /// Collapse the run of spaces starting at `column` to one space,
    /// inserting one when there is none.
    ///
    /// # Errors
    /// Returns [`FixError::StalePosition`] when `column` is past the end
    pub fn ensure_single_space_at(&self, column: usize) -> Result<String, FixError> {
        let at = self.byte_column(column)?;
        let rest = &self.text[at..];
        let after = rest.trim_start_matches(' ');
        Ok(format!("{} {after}", &self.text[..at]))
    }

    /// The line preceded by an empty line.
    #[must_use]
    pub fn prefix_blank_line(&self) -> String {
        format!("\n{}", self.text)
    }
}

pub(super) fn add_trailing_comma(line: &CodeLine<'_>) -> Result<String, FixError> {
    line.insert_character_at(line.column, ',')
}

pub(super) fn single_space_after_operator(line: &CodeLine<'_>) -> Result<String, FixError> {
    line.ensure_single_space_at(line.column)
}

pub(super) fn space_around_operator(line: &CodeLine<'_>) -> Result<String, FixError> {
    line.insert_character_at(line.column, ' ')
}

pub(super) fn space_after_comment_hash(line: &CodeLine<'_>) -> Result<String, FixError> {
    line.ensure_single_space_at(line.column)
}

#[allow(clippy::unnecessary_wraps)]
pub(super) fn blank_line_before(line: &CodeLine<'_>) -> Result<String, FixError> {
    Ok(line.prefix_blank_line())
}

pub(super) fn remove_redundant_backslash(line: &CodeLine<'_>) -> Result<String, FixError> {
    line.remove_character_at(line.column, '\\')
}

/// Blank lines inserted by a line fixer before a given original line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineShift {
    /// Original one-based line number the lines were inserted above.
    pub line: usize,
    /// Number of inserted lines.
    pub inserted: usize,
}

/// Result of the line-fixer pass over one file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineFixOutcome {
    /// The new text (unchanged when no line changed).
    pub text: String,
    /// Indices into the input diagnostics whose edit changed their line.
    pub resolved: Vec<usize>,
    /// Inserted line runs, used to remap later diagnostics.
    pub shifts: Vec<LineShift>,
}

impl LineFixOutcome {
    /// Map an original line number to its line in [`Self::text`].
    #[must_use]
    pub fn shifted_line(&self, line: usize) -> usize {
        line + self
            .shifts
            .iter()
            .filter(|shift| shift.line <= line)
            .map(|shift| shift.inserted)
            .sum::<usize>()
    }
}

/// Apply every diagnostic that has a registered line fixer.
///
/// Diagnostics run in descending `(line, column)` order so an edit never
/// moves a position still waiting to be fixed on the same line. Diagnostics
/// without a line fixer are ignored. When any line changed, all lines are
/// normalized to have no trailing whitespace and a single `\n` terminator.
///
/// # Errors
/// Returns [`FixError::StalePosition`] when a diagnostic's line is outside
/// the file or its column no longer matches the text
pub fn apply_line_fixers(
    content: &str,
    diagnostics: &[Diagnostic],
    registry: &FixerRegistry,
) -> Result<LineFixOutcome, FixError> {
    let mut lines: Vec<String> = content.lines().map(str::to_owned).collect();

    let mut order: Vec<(usize, &Diagnostic)> = diagnostics
        .iter()
        .enumerate()
        .filter(|(_, d)| registry.line_fixer(&d.code).is_some())
        .collect();
    order.sort_by(|(_, a), (_, b)| b.position.cmp(&a.position));

    let mut resolved = Vec::new();
    let mut shifts = Vec::new();
    for (index, diagnostic) in order {
        let Some(fixer) = registry.line_fixer(&diagnostic.code) else {
            continue;
        };
        let slot = diagnostic
            .line()
            .checked_sub(1)
            .filter(|i| *i < lines.len())
            .ok_or_else(|| FixError::StalePosition {
                line: diagnostic.line(),
                column: diagnostic.column(),
                expected: "a line within the file".to_owned(),
                found: format!("a file of {} lines", lines.len()),
            })?;

        let before = &lines[slot];
        let code_line = CodeLine::new(before, diagnostic.line(), diagnostic.column());
        let after = (fixer.fix)(&code_line)?;
        if after == *before {
            continue;
        }

        let inserted = after
            .matches('\n')
            .count()
            .saturating_sub(before.matches('\n').count());
        if inserted > 0 {
            shifts.push(LineShift {
                line: diagnostic.line(),
                inserted,
            });
        }
        lines[slot] = after;
        resolved.push(index);
    }

    let text = if resolved.is_empty() {
        content.to_owned()
    } else {
        lines
            .iter()
            .flat_map(|line| line.split('\n'))
            .map(|line| format!("{}\n", line.trim_end()))
            .collect()
    };

    resolved.sort_unstable();
    Ok(LineFixOutcome {
        text,
        resolved,
        shifts,
    })
}
