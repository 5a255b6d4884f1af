//! Utilities module for flakefix.
//!
//! Offset/position conversion and path display helpers used across the crate.

use crate::position::Position;

/// A utility struct to convert byte offsets to positions and back.
///
/// Tree-sitter nodes carry byte offsets while spans are expressed as
/// line/column positions, so the import fixer needs both views of the text.
#[derive(Debug, Clone)]
pub struct LineIndex {
    /// Stores the byte index of the start of each line.
    line_starts: Vec<usize>,
    /// Total length of the indexed text.
    len: usize,
}

impl LineIndex {
    /// Creates a new `LineIndex` by scanning the source code for newlines.
    /// Uses byte iteration since '\n' is always a single byte in UTF-8.
    #[must_use]
    pub fn new(source: &str) -> Self {
        let mut line_starts = vec![0];
        for (i, byte) in source.as_bytes().iter().enumerate() {
            if *byte == b'\n' {
                line_starts.push(i + 1);
            }
        }
        Self {
            line_starts,
            len: source.len(),
        }
    }

    /// Converts a byte offset to a 1-indexed line number.
    #[must_use]
    pub fn line_index(&self, offset: usize) -> usize {
        match self.line_starts.binary_search(&offset) {
            Ok(line) => line + 1,
            Err(line) => line,
        }
    }

    /// Converts a byte offset to a position with a byte column.
    #[must_use]
    pub fn position(&self, offset: usize) -> Position {
        let line = self.line_index(offset.min(self.len));
        let start = self.line_starts[line - 1];
        Position::new(line, offset.min(self.len) - start)
    }

    /// Byte offset where the given 1-indexed line starts.
    #[must_use]
    pub fn line_start(&self, line: usize) -> Option<usize> {
        self.line_starts.get(line.checked_sub(1)?).copied()
    }

    /// Byte offset just past the newline terminating the given line,
    /// or the end of the text for the last line.
    #[must_use]
    pub fn next_line_start(&self, line: usize) -> usize {
        self.line_starts.get(line).copied().unwrap_or(self.len)
    }
}

/// Normalizes a path for CLI display.
///
/// Converts backslashes to forward slashes and strips a leading `./`.
///
/// # Examples
/// ```
/// use std::path::Path;
/// use flakefix::utils::normalize_display_path;
///
/// assert_eq!(normalize_display_path(Path::new("./src/main.py")), "src/main.py");
/// assert_eq!(normalize_display_path(Path::new("pkg\\mod.py")), "pkg/mod.py");
/// ```
#[must_use]
pub fn normalize_display_path(path: &std::path::Path) -> String {
    let normalized = path.to_string_lossy().replace('\\', "/");
    match normalized.strip_prefix("./") {
        Some(stripped) => stripped.to_owned(),
        None => normalized,
    }
}
