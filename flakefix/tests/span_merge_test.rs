//! Laws of span merging, checked over generated span sets.
#![allow(clippy::unwrap_used)]

use flakefix::fix::{merge_spans, Span};
use flakefix::position::Position;
use proptest::prelude::*;

const LINES: usize = 5;
const COLUMNS: usize = 8;

fn position() -> impl Strategy<Value = Position> {
    (1..=LINES, 0..COLUMNS).prop_map(|(line, column)| Position::new(line, column))
}

fn span() -> impl Strategy<Value = Span> {
    (position(), position()).prop_map(|(a, b)| Span::new(a, b))
}

fn every_position() -> impl Iterator<Item = Position> {
    (1..=LINES + 1).flat_map(|line| (0..=COLUMNS).map(move |column| Position::new(line, column)))
}

fn covered(spans: &[Span], position: Position) -> bool {
    spans.iter().any(|s| s.contains(position))
}

proptest! {
    #[test]
    fn merged_spans_are_sorted_and_disjoint(spans in prop::collection::vec(span(), 0..12)) {
        let merged = merge_spans(spans);
        for pair in merged.windows(2) {
            prop_assert!(pair[0].end < pair[1].start, "{} then {}", pair[0], pair[1]);
        }
    }

    #[test]
    fn merging_preserves_coverage(spans in prop::collection::vec(span(), 0..12)) {
        let merged = merge_spans(spans.clone());
        for position in every_position() {
            prop_assert_eq!(covered(&spans, position), covered(&merged, position), "at {}", position);
        }
    }

    #[test]
    fn merging_never_adds_spans(spans in prop::collection::vec(span(), 0..12)) {
        let count = spans.len();
        prop_assert!(merge_spans(spans).len() <= count);
    }

    #[test]
    fn merging_is_idempotent(spans in prop::collection::vec(span(), 0..12)) {
        let once = merge_spans(spans);
        let twice = merge_spans(once.clone());
        prop_assert_eq!(once, twice);
    }
}

#[test]
fn test_chain_collapses_into_one() {
    let spans = [
        Span::new(Position::new(1, 0), Position::new(1, 4)),
        Span::new(Position::new(1, 3), Position::new(1, 8)),
        Span::new(Position::new(1, 8), Position::new(2, 0)),
    ];
    assert_eq!(
        merge_spans(spans),
        vec![Span::new(Position::new(1, 0), Position::new(2, 0))]
    );
}

#[test]
fn test_empty_input() {
    assert!(merge_spans(Vec::new()).is_empty());
}
