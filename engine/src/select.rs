//! Puzzle selection.
//!
//! Without a configured index a puzzle is drawn at random from
//! `0..=count`. The upper bound is inclusive, so one draw in `count + 1`
//! lands past the end of the book; that draw is reported as a selection
//! error like any other out-of-range index.

use sudoplot_resources::PuzzleBook;
use sudoplot_types::PuzzleGrid;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SelectionError {
    #[error("puzzle index {index} out of range: the book has {count} puzzles (0..={last})", last = .count.saturating_sub(1))]
    OutOfRange { index: usize, count: usize },
    #[error("random draw {index} fell past the last puzzle ({count} available)")]
    DrawOutOfRange { index: usize, count: usize },
}

/// Draw an index in `0..=upper`.
#[must_use]
pub fn random_draw(upper: usize) -> usize {
    rand::random_range(0..=upper)
}

/// Pick the configured puzzle, or draw one with `draw` (given the inclusive
/// upper bound) when none is configured.
pub fn select_puzzle(
    book: &PuzzleBook,
    configured: Option<usize>,
    draw: impl FnOnce(usize) -> usize,
) -> Result<(usize, &PuzzleGrid), SelectionError> {
    let count = book.len();
    let (index, drawn) = match configured {
        Some(index) => (index, false),
        None => (draw(count), true),
    };

    match book.get(index) {
        Some(grid) => {
            tracing::info!(index, count, random = drawn, "Selected puzzle");
            Ok((index, grid))
        }
        None if drawn => Err(SelectionError::DrawOutOfRange { index, count }),
        None => Err(SelectionError::OutOfRange { index, count }),
    }
}
