//! Puzzle book: blank-line separated blocks of nine 9-digit rows.

use sudoplot_types::PuzzleGrid;

use crate::error::ResourceError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PuzzleBook {
    grids: Vec<PuzzleGrid>,
}

impl PuzzleBook {
    /// Parse the book text. Runs of blank lines separate puzzles; leading
    /// and trailing blank lines are ignored.
    pub fn parse(text: &str) -> Result<Self, ResourceError> {
        let mut grids = Vec::new();
        let mut block: Vec<&str> = Vec::new();

        for line in text.lines().chain(std::iter::once("")) {
            if !line.trim().is_empty() {
                block.push(line);
                continue;
            }
            if block.is_empty() {
                continue;
            }
            let index = grids.len();
            let grid = PuzzleGrid::parse_rows(&block)
                .map_err(|source| ResourceError::Puzzle { index, source })?;
            grids.push(grid);
            block.clear();
        }

        if grids.is_empty() {
            return Err(ResourceError::EmptyBook);
        }
        Ok(Self { grids })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.grids.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.grids.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&PuzzleGrid> {
        self.grids.get(index)
    }
}
