//! Deletion spans and their merging.

use crate::position::Position;
use serde::Serialize;
use std::fmt;

/// Half-open range of text marked for deletion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Span {
    /// First deleted position.
    pub start: Position,
    /// First position kept after the deletion.
    pub end: Position,
}

impl Span {
    /// Create a span between two positions, in whichever order they are given.
    #[must_use]
    pub fn new(a: Position, b: Position) -> Self {
        Self {
            start: a.min(b),
            end: a.max(b),
        }
    }

    /// Whether the span covers nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Whether `position` is deleted by this span.
    #[must_use]
    pub fn contains(&self, position: Position) -> bool {
        self.start <= position && position < self.end
    }

    /// Whether `other` (starting at or after `self`) overlaps or touches this span.
    #[must_use]
    pub fn can_absorb(&self, other: &Self) -> bool {
        other.start <= self.end
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// Collapse spans into the minimal sorted set of disjoint spans with the
/// same coverage.
///
/// Touching spans merge as well as overlapping ones, and a chain of pairwise
/// overlapping spans collapses into one through the left fold.
#[must_use]
pub fn merge_spans(spans: impl IntoIterator<Item = Span>) -> Vec<Span> {
    let mut sorted: Vec<Span> = spans.into_iter().collect();
    sorted.sort_unstable();

    let mut merged: Vec<Span> = Vec::with_capacity(sorted.len());
    for span in sorted {
        match merged.last_mut() {
            Some(last) if last.can_absorb(&span) => last.end = last.end.max(span.end),
            _ => merged.push(span),
        }
    }
    merged
}
