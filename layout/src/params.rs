//! Geometry parameters for one layout run.

use sudoplot_types::{Boundary, GRID_SIZE, PenSettings, Point};

/// Glyph-local height of a digit, before scaling.
pub const GLYPH_HEIGHT: f64 = 100.0;

/// Gap between a cell's top-left grid corner and its glyph box.
pub const CELL_INSET: f64 = 3.0;

#[derive(Debug, Clone, PartialEq)]
pub struct LayoutParams {
    /// Grid top-left corner, measured right from the board's left edge and
    /// down from its top edge (`boundary.max_y`).
    pub origin: Point,
    pub pens: PenSettings,
    /// Glyph-local units to device units.
    pub font_scale: f64,
    pub boundary: Boundary,
    /// Cell edge length.
    pub pitch: f64,
    /// Settling pause after every pen change.
    pub dwell: f64,
    pub draw_grid: bool,
    pub draw_numbers: bool,
}

impl Default for LayoutParams {
    fn default() -> Self {
        Self {
            origin: Point::new(27.0, 0.0),
            pens: PenSettings::default(),
            font_scale: 0.2,
            boundary: Boundary::default(),
            pitch: 25.0,
            dwell: 60.0,
            draw_grid: true,
            draw_numbers: true,
        }
    }
}

impl LayoutParams {
    /// Full grid edge length (nine cells).
    #[must_use]
    pub fn span(&self) -> f64 {
        self.pitch * GRID_SIZE as f64
    }

    /// Device-space top-left corner of the grid.
    #[must_use]
    pub fn grid_top_left(&self) -> Point {
        Point::new(self.origin.x, self.boundary.max_y - self.origin.y)
    }

    /// Glyph anchor of the top-left cell; other cells are whole pitches away.
    #[must_use]
    pub fn first_glyph_anchor(&self) -> Point {
        let top_left = self.grid_top_left();
        Point::new(
            top_left.x + CELL_INSET,
            top_left.y - CELL_INSET - GLYPH_HEIGHT * self.font_scale,
        )
    }

    /// Glyph anchor of the cell at `(row, col)`.
    #[must_use]
    pub fn cell_anchor(&self, row: usize, col: usize) -> Point {
        let first = self.first_glyph_anchor();
        Point::new(
            first.x + col as f64 * self.pitch,
            first.y - row as f64 * self.pitch,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_anchor_sits_inside_first_cell() {
        let params = LayoutParams::default();
        assert_eq!(params.grid_top_left(), Point::new(27.0, 300.0));
        assert_eq!(params.first_glyph_anchor(), Point::new(30.0, 277.0));
        assert_eq!(params.span(), 225.0);
    }

    #[test]
    fn origin_offset_moves_grid_down() {
        let params = LayoutParams {
            origin: Point::new(10.0, 20.0),
            ..LayoutParams::default()
        };
        assert_eq!(params.grid_top_left(), Point::new(10.0, 280.0));
        assert_eq!(params.cell_anchor(1, 2), Point::new(63.0, 232.0));
    }
}
