//! Puzzle grid: a 9x9 matrix of cells, each blank or holding a digit 1-9.

use std::fmt;

use thiserror::Error;

/// Cells per row and rows per grid.
pub const GRID_SIZE: usize = 9;

/// A non-blank puzzle digit, 1 through 9.
///
/// Zero is the blank marker in the puzzle resource and is represented as
/// `None` at the cell level, so it is unrepresentable here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Digit(u8);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("digit must be between 1 and 9 (got {0})")]
pub struct DigitError(pub u8);

impl Digit {
    pub fn new(value: u8) -> Result<Self, DigitError> {
        if (1..=9).contains(&value) {
            Ok(Self(value))
        } else {
            Err(DigitError(value))
        }
    }

    /// Parse a single resource character. `'0'` is rejected; callers treat it
    /// as a blank before reaching here.
    #[must_use]
    pub fn from_char(ch: char) -> Option<Self> {
        let value = ch.to_digit(10)?;
        Self::new(value as u8).ok()
    }

    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }
}

impl fmt::Display for Digit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("grid must have 9 rows (got {0})")]
    RowCount(usize),
    #[error("row {row} must have 9 cells (got {len})")]
    RowLength { row: usize, len: usize },
    #[error("row {row}, column {col}: '{ch}' is not a digit")]
    InvalidCell { row: usize, col: usize, ch: char },
}

/// Immutable 9x9 puzzle. `None` marks a blank cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PuzzleGrid {
    cells: [[Option<Digit>; GRID_SIZE]; GRID_SIZE],
}

impl PuzzleGrid {
    /// Build a grid from nine text rows of nine digit characters, `0` = blank.
    pub fn parse_rows<S: AsRef<str>>(rows: &[S]) -> Result<Self, GridError> {
        if rows.len() != GRID_SIZE {
            return Err(GridError::RowCount(rows.len()));
        }

        let mut cells = [[None; GRID_SIZE]; GRID_SIZE];
        for (row, (line, out)) in rows.iter().zip(cells.iter_mut()).enumerate() {
            let line = line.as_ref().trim();
            let len = line.chars().count();
            if len != GRID_SIZE {
                return Err(GridError::RowLength { row, len });
            }
            for (col, (ch, cell)) in line.chars().zip(out.iter_mut()).enumerate() {
                *cell = match ch {
                    '0' => None,
                    _ => Some(
                        Digit::from_char(ch).ok_or(GridError::InvalidCell { row, col, ch })?,
                    ),
                };
            }
        }

        Ok(Self { cells })
    }

    #[must_use]
    pub fn cell(&self, row: usize, col: usize) -> Option<Digit> {
        self.cells.get(row)?.get(col).copied().flatten()
    }

    /// Rows top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Option<Digit>; GRID_SIZE]> {
        self.cells.iter()
    }

    #[must_use]
    pub fn filled_count(&self) -> usize {
        self.cells.iter().flatten().filter(|c| c.is_some()).count()
    }
}

impl fmt::Display for PuzzleGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.cells.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            for cell in row {
                write!(f, "{}", cell.map_or(0, Digit::value))?;
            }
        }
        Ok(())
    }
}
