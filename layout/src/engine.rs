//! Puzzle + font to instruction stream.

use sudoplot_types::{
    Boundary, GlyphCommand, GlyphSet, Instruction, InstructionStream, Point, Precision, PuzzleGrid,
};

use crate::LayoutError;
use crate::params::LayoutParams;
use crate::strokes::{Stroke, grid_strokes};

/// Translate a glyph-local offset into device space for a cell anchored at
/// `anchor`.
#[must_use]
pub fn glyph_point(anchor: Point, dx: f64, dy: f64, scale: f64) -> Point {
    Point::new(anchor.x + dx * scale, anchor.y + dy * scale)
}

/// Generates the drawing body for one puzzle.
///
/// Output order is grid lines then digits, each part present only when
/// enabled in the params. Every coordinate is checked against the boundary
/// as it is produced; the first violation aborts the run and the partial
/// stream is dropped.
#[derive(Debug, Clone, Copy)]
pub struct LayoutEngine<'a> {
    params: &'a LayoutParams,
}

impl<'a> LayoutEngine<'a> {
    #[must_use]
    pub fn new(params: &'a LayoutParams) -> Self {
        Self { params }
    }

    pub fn layout(
        &self,
        grid: &PuzzleGrid,
        glyphs: &GlyphSet,
    ) -> Result<InstructionStream, LayoutError> {
        let mut out = Emitter::new(self.params);

        if self.params.draw_grid {
            for stroke in grid_strokes(self.params) {
                out.stroke(&stroke)?;
            }
        }
        let grid_len = out.len();

        if self.params.draw_numbers {
            self.digits(grid, glyphs, &mut out)?;
        }

        tracing::debug!(
            grid = grid_len,
            digits = out.len() - grid_len,
            "Layout complete"
        );
        Ok(out.finish())
    }

    fn digits(
        &self,
        grid: &PuzzleGrid,
        glyphs: &GlyphSet,
        out: &mut Emitter,
    ) -> Result<(), LayoutError> {
        let scale = self.params.font_scale;

        for (row, cells) in grid.rows().enumerate() {
            for (col, cell) in cells.iter().enumerate() {
                let Some(digit) = *cell else {
                    continue;
                };
                let glyph = glyphs
                    .get(digit)
                    .ok_or(LayoutError::MissingGlyph { digit, row, col })?;
                let anchor = self.params.cell_anchor(row, col);

                for command in glyph {
                    match *command {
                        GlyphCommand::PenUp => out.pen_up(),
                        GlyphCommand::PenDown => out.pen_down(),
                        GlyphCommand::MoveTo { dx, dy } => out.move_to(
                            glyph_point(anchor, dx, dy, scale),
                            Precision::Hundredths,
                        )?,
                    }
                }
            }
        }
        Ok(())
    }
}

/// Appends instructions, pairing every pen change with a dwell and
/// rejecting out-of-bounds moves.
struct Emitter {
    instructions: Vec<Instruction>,
    boundary: Boundary,
    pen_up: f64,
    pen_down: f64,
    dwell: f64,
}

impl Emitter {
    fn new(params: &LayoutParams) -> Self {
        Self {
            instructions: Vec::new(),
            boundary: params.boundary,
            pen_up: params.pens.up,
            pen_down: params.pens.down,
            dwell: params.dwell,
        }
    }

    fn len(&self) -> usize {
        self.instructions.len()
    }

    fn pen_up(&mut self) {
        self.instructions.push(Instruction::PenUp(self.pen_up));
        self.instructions.push(Instruction::Dwell(self.dwell));
    }

    fn pen_down(&mut self) {
        self.instructions.push(Instruction::PenDown(self.pen_down));
        self.instructions.push(Instruction::Dwell(self.dwell));
    }

    fn move_to(&mut self, point: Point, precision: Precision) -> Result<(), LayoutError> {
        if !self.boundary.contains(point) {
            tracing::warn!(%point, boundary = %self.boundary, "Coordinate outside device boundary");
            return Err(LayoutError::Overflow {
                point,
                boundary: self.boundary,
                emitted: self.instructions.len(),
            });
        }
        self.instructions.push(Instruction::move_to(point, precision));
        Ok(())
    }

    fn stroke(&mut self, stroke: &Stroke) -> Result<(), LayoutError> {
        self.pen_up();
        self.move_to(stroke.from, Precision::Whole)?;
        self.pen_down();
        self.move_to(stroke.to, Precision::Whole)
    }

    fn finish(self) -> InstructionStream {
        InstructionStream::new(self.instructions)
    }
}
