//! Core domain types for sudoplot.
//!
//! Pure domain types with no IO and minimal dependencies: the puzzle grid,
//! the stroke font, device geometry, and the instruction stream handed to the
//! device session. Everything here can be used from any layer.

// Pedantic lint configuration - these are intentional design choices
#![allow(clippy::missing_errors_doc)] // Result-returning functions are self-explanatory
#![allow(clippy::missing_panics_doc)] // Panics are documented in assertions

mod geometry;
mod glyph;
mod grid;
mod instruction;

pub use geometry::{Boundary, PenSettings, Point, format_decimal};
pub use glyph::{GlyphCommand, GlyphSet};
pub use grid::{Digit, DigitError, GRID_SIZE, GridError, PuzzleGrid};
pub use instruction::{COMMENT_MARKER, Instruction, InstructionStream, Precision, is_noop_line};
