//! Stroke font: per-digit pen command sequences in glyph-local units.

use std::collections::BTreeMap;

use crate::grid::Digit;

/// One pen-stroke command of a glyph.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GlyphCommand {
    PenUp,
    PenDown,
    /// Move to `(dx, dy)` relative to the cell anchor, before scaling.
    MoveTo { dx: f64, dy: f64 },
}

/// Immutable mapping from digit to its stroke sequence.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GlyphSet {
    glyphs: BTreeMap<Digit, Vec<GlyphCommand>>,
}

impl GlyphSet {
    #[must_use]
    pub fn new(glyphs: BTreeMap<Digit, Vec<GlyphCommand>>) -> Self {
        Self { glyphs }
    }

    #[must_use]
    pub fn get(&self, digit: Digit) -> Option<&[GlyphCommand]> {
        self.glyphs.get(&digit).map(Vec::as_slice)
    }

    #[must_use]
    pub fn contains(&self, digit: Digit) -> bool {
        self.glyphs.contains_key(&digit)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }
}

impl FromIterator<(Digit, Vec<GlyphCommand>)> for GlyphSet {
    fn from_iter<I: IntoIterator<Item = (Digit, Vec<GlyphCommand>)>>(iter: I) -> Self {
        Self {
            glyphs: iter.into_iter().collect(),
        }
    }
}
