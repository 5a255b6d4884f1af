//! Document positions shared by diagnostics, the syntax tree and spans.
//!
//! Lines are one-based, columns are zero-based. Diagnostic columns count
//! characters; syntax-tree and span columns count bytes within the line.

use serde::Serialize;
use std::fmt;

/// A position within a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Position {
    /// One-based line number.
    pub line: usize,
    /// Zero-based column.
    pub column: usize,
}

impl Position {
    /// Create a new position.
    #[must_use]
    pub const fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }

    /// The first column of the given line.
    #[must_use]
    pub const fn line_start(line: usize) -> Self {
        Self { line, column: 0 }
    }

    /// Zero-based line index, for indexing into a `Vec` of lines.
    #[must_use]
    pub const fn line_index(&self) -> usize {
        self.line.saturating_sub(1)
    }
}

impl From<tree_sitter::Point> for Position {
    fn from(p: tree_sitter::Point) -> Self {
        Self {
            line: p.row.saturating_add(1),
            column: p.column,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Convert a zero-based character column into a byte column within `line`.
///
/// A column one past the last character maps to `line.len()`; anything
/// further returns `None`.
#[must_use]
pub fn char_to_byte_column(line: &str, column: usize) -> Option<usize> {
    line.char_indices()
        .map(|(byte, _)| byte)
        .chain(std::iter::once(line.len()))
        .nth(column)
}
