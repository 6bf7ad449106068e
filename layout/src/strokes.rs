//! Grid stroke planning.
//!
//! Boundary lines alternate their starting side (boustrophedon) so the pen
//! travels up only the short hop between neighbouring line ends. The four box
//! dividers are drawn last at fixed interior offsets, always spanning the
//! full grid.

use sudoplot_types::{GRID_SIZE, Point};

use crate::params::LayoutParams;

/// Boundary lines per axis: one per cell edge, including the closing edge.
pub const LINES_PER_AXIS: usize = GRID_SIZE + 1;

/// Box-divider rows, measured down from the grid top.
pub const DIVIDER_ROWS: [f64; 2] = [74.0, 149.0];

/// Box-divider columns, measured right from the grid start.
pub const DIVIDER_COLUMNS: [f64; 2] = [76.0, 151.0];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrokeKind {
    Horizontal,
    Vertical,
    Divider,
}

/// One pen-down segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub kind: StrokeKind,
    pub from: Point,
    pub to: Point,
}

/// All grid strokes in draw order: horizontals top to bottom, verticals left
/// to right, then the dividers.
#[must_use]
pub fn grid_strokes(params: &LayoutParams) -> Vec<Stroke> {
    let mut strokes = Vec::with_capacity(2 * LINES_PER_AXIS + 4);
    strokes.extend(horizontal_lines(params));
    strokes.extend(vertical_lines(params));
    strokes.extend(box_dividers(params));
    strokes
}

/// Starts at the left edge, then alternates.
fn horizontal_lines(params: &LayoutParams) -> impl Iterator<Item = Stroke> + '_ {
    let top_left = params.grid_top_left();
    let span = params.span();
    let (x_start, x_end) = (top_left.x, top_left.x + span);

    (0..LINES_PER_AXIS).map(move |i| {
        let y = top_left.y - i as f64 * params.pitch;
        let offset = lateral_offset(i, span, false);
        Stroke {
            kind: StrokeKind::Horizontal,
            from: Point::new(x_start + offset, y),
            to: Point::new(x_end - offset, y),
        }
    })
}

/// Starts at the bottom edge, then alternates.
fn vertical_lines(params: &LayoutParams) -> impl Iterator<Item = Stroke> + '_ {
    let top_left = params.grid_top_left();
    let span = params.span();
    let (y_start, y_end) = (top_left.y, top_left.y - span);

    (0..LINES_PER_AXIS).map(move |i| {
        let x = top_left.x + i as f64 * params.pitch;
        let offset = lateral_offset(i, span, true);
        Stroke {
            kind: StrokeKind::Vertical,
            from: Point::new(x, y_start - offset),
            to: Point::new(x, y_end + offset),
        }
    })
}

/// `0` or `span` depending on the parity of `index`; `flipped` swaps which
/// parity starts at the far side.
#[must_use]
pub fn lateral_offset(index: usize, span: f64, flipped: bool) -> f64 {
    if (index % 2 == 1) ^ flipped { span } else { 0.0 }
}

fn box_dividers(params: &LayoutParams) -> [Stroke; 4] {
    let top_left = params.grid_top_left();
    let span = params.span();
    let (x_start, x_end) = (top_left.x, top_left.x + span);
    let (y_start, y_end) = (top_left.y, top_left.y - span);
    let [row_upper, row_lower] = DIVIDER_ROWS.map(|offset| y_start - offset);
    let [col_left, col_right] = DIVIDER_COLUMNS.map(|offset| x_start + offset);

    [
        Stroke {
            kind: StrokeKind::Divider,
            from: Point::new(x_end, row_lower),
            to: Point::new(x_start, row_lower),
        },
        Stroke {
            kind: StrokeKind::Divider,
            from: Point::new(x_start, row_upper),
            to: Point::new(x_end, row_upper),
        },
        Stroke {
            kind: StrokeKind::Divider,
            from: Point::new(col_right, y_start),
            to: Point::new(col_right, y_end),
        },
        Stroke {
            kind: StrokeKind::Divider,
            from: Point::new(col_left, y_end),
            to: Point::new(col_left, y_start),
        },
    ]
}
