//! Line-addressed deletion splicer.
//!
//! Applies merged [`Span`]s to source text split into lines. Deletions run
//! from the last span to the first so earlier positions stay valid, and lines
//! left holding only whitespace after an edit are dropped.
//!
//! # Usage
//!
//! ```
//! use flakefix::fix::{LineSplicer, Span};
//! use flakefix::position::Position;
//!
//! let mut splicer = LineSplicer::new("import io, os\n");
//! splicer.add_span(Span::new(Position::new(1, 9), Position::new(1, 13)));
//! let fixed = splicer.apply().expect("should apply");
//! assert_eq!(fixed, "import io\n");
//! ```

use super::span::Span;
use crate::position::Position;
use thiserror::Error;

/// Error while splicing spans out of the text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpliceError {
    /// A span points past the end of a line or of the file.
    #[error("span {span} is outside the text ({lines} lines)")]
    OutOfBounds {
        /// The offending span.
        span: Span,
        /// Number of lines in the text.
        lines: usize,
    },
    /// A span endpoint falls inside a multi-byte character.
    #[error("span {span} does not fall on character boundaries")]
    NotCharBoundary {
        /// The offending span.
        span: Span,
    },
    /// Two spans overlap; callers must merge first.
    #[error("spans {first} and {second} overlap")]
    Overlapping {
        /// Earlier span.
        first: Span,
        /// Later span.
        second: Span,
    },
}

/// Deletes spans from text addressed by (line, byte column).
#[derive(Debug, Clone)]
pub struct LineSplicer {
    lines: Vec<String>,
    spans: Vec<Span>,
}

impl LineSplicer {
    /// Create a splicer over `source`.
    #[must_use]
    pub fn new(source: &str) -> Self {
        Self {
            lines: source.split('\n').map(str::to_owned).collect(),
            spans: Vec::new(),
        }
    }

    /// Queue a span for deletion.
    pub fn add_span(&mut self, span: Span) {
        self.spans.push(span);
    }

    /// Queue several spans.
    pub fn add_spans(&mut self, spans: impl IntoIterator<Item = Span>) {
        self.spans.extend(spans);
    }

    /// Check spans against the text without applying them.
    ///
    /// # Errors
    /// Returns error if a span is out of bounds, splits a character, or
    /// overlaps another span
    pub fn validate(&self) -> Result<(), SpliceError> {
        for span in &self.spans {
            for position in [span.start, span.end] {
                let line = Some(position.line)
                    .filter(|line| *line > 0)
                    .and_then(|_| self.lines.get(position.line_index()))
                    .ok_or(SpliceError::OutOfBounds {
                        span: *span,
                        lines: self.lines.len(),
                    })?;
                if position.column > line.len() {
                    return Err(SpliceError::OutOfBounds {
                        span: *span,
                        lines: self.lines.len(),
                    });
                }
                if !line.is_char_boundary(position.column) {
                    return Err(SpliceError::NotCharBoundary { span: *span });
                }
            }
        }

        let mut sorted = self.spans.clone();
        sorted.sort_unstable();
        for pair in sorted.windows(2) {
            if pair[1].start < pair[0].end {
                return Err(SpliceError::Overlapping {
                    first: pair[0],
                    second: pair[1],
                });
            }
        }

        Ok(())
    }

    /// Apply every span and return the resulting text.
    ///
    /// # Errors
    /// Returns error if validation fails
    pub fn apply(self) -> Result<String, SpliceError> {
        self.validate()?;

        let mut lines = self.lines;
        let mut touched = vec![false; lines.len()];
        let mut spans = self.spans;
        spans.sort_unstable_by(|a, b| b.cmp(a));

        for span in spans.into_iter().filter(|s| !s.is_empty()) {
            delete_span(&mut lines, &mut touched, span);
        }

        let kept: Vec<String> = lines
            .into_iter()
            .zip(touched)
            .filter(|(line, touched)| !(*touched && line.trim().is_empty()))
            .map(|(line, _)| line)
            .collect();
        Ok(kept.join("\n"))
    }
}

/// Remove one validated span. `lines` and `touched` stay parallel.
fn delete_span(lines: &mut Vec<String>, touched: &mut Vec<bool>, span: Span) {
    let Span { start, end } = span;
    let (first, last) = (start.line - 1, end.line - 1);

    if first == last {
        lines[first].replace_range(start.column..end.column, "");
        touched[first] = true;
        return;
    }

    let suffix = lines[last][end.column..].to_owned();
    lines[first].truncate(start.column);
    lines[first].push_str(&suffix);
    // A span covering whole lines leaves the following line as it was.
    touched[first] = if start.column == 0 && end.column == 0 {
        touched[last]
    } else {
        true
    };
    lines.drain(first + 1..=last);
    touched.drain(first + 1..=last);
}

/// Whether a span begins at the very start of the file.
#[must_use]
pub fn starts_file(span: &Span) -> bool {
    span.start == Position::line_start(1)
}
