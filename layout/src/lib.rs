//! Layout engine: turns a puzzle grid and stroke font into the plotter's
//! drawing body.
//!
//! ```text
//! PuzzleGrid + GlyphSet + LayoutParams -> LayoutEngine::layout() -> InstructionStream
//!                                               |
//!                                 grid strokes, then digit glyphs
//! ```
//!
//! The engine is pure. It either returns the complete body or fails without
//! handing anything downstream.

mod engine;
mod params;
mod strokes;

use sudoplot_types::{Boundary, Digit, Point};
use thiserror::Error;

pub use engine::{LayoutEngine, glyph_point};
pub use params::{CELL_INSET, GLYPH_HEIGHT, LayoutParams};
pub use strokes::{
    DIVIDER_COLUMNS, DIVIDER_ROWS, LINES_PER_AXIS, Stroke, StrokeKind, grid_strokes,
    lateral_offset,
};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayoutError {
    /// A generated coordinate lies beyond the device boundary. `emitted` is
    /// the number of instructions produced before it.
    #[error("coordinate {point} exceeds device boundary {boundary}")]
    Overflow {
        point: Point,
        boundary: Boundary,
        emitted: usize,
    },
    #[error("no glyph for digit {digit} (row {row}, column {col})")]
    MissingGlyph { digit: Digit, row: usize, col: usize },
}
