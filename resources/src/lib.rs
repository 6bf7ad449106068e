//! Resource loading for sudoplot.
//!
//! Turns resource text into domain types:
//!
//! - **`puzzles`**: the puzzle book (`grids.txt`)
//! - **`font`**: the stroke font (`default_font.json`)
//! - **`template`**: wipe/start/end instruction templates (`*.gcode`)
//!
//! Default resources are compiled in; [`Resources::load_dir`] reads the same
//! file names from a directory instead.

mod error;
mod font;
mod puzzles;
mod template;

use std::fs;
use std::path::Path;

use sudoplot_types::{GlyphSet, PenSettings};

pub use error::ResourceError;
pub use font::parse_glyph_set;
pub use puzzles::PuzzleBook;
pub use template::{
    PEN_DOCK_PLACEHOLDER, PEN_DOWN_PLACEHOLDER, PEN_UP_PLACEHOLDER, Templates, render_template,
};

pub const PUZZLES_FILE: &str = "grids.txt";
pub const FONT_FILE: &str = "default_font.json";
pub const WIPE_FILE: &str = "wipe.gcode";
pub const START_FILE: &str = "start.gcode";
pub const END_FILE: &str = "end.gcode";

const EMBEDDED_PUZZLES: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/assets/grids.txt"));
const EMBEDDED_FONT: &str =
    include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/assets/default_font.json"));
const EMBEDDED_WIPE: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/assets/wipe.gcode"));
const EMBEDDED_START: &str =
    include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/assets/start.gcode"));
const EMBEDDED_END: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/assets/end.gcode"));

/// Everything the layout and assembler need, already parsed.
#[derive(Debug, Clone)]
pub struct Resources {
    pub puzzles: PuzzleBook,
    pub glyphs: GlyphSet,
    pub templates: Templates,
}

impl Resources {
    /// The compiled-in puzzle book, font and templates.
    pub fn embedded(pens: &PenSettings) -> Result<Self, ResourceError> {
        Self::from_texts(
            EMBEDDED_PUZZLES,
            EMBEDDED_FONT,
            [EMBEDDED_WIPE, EMBEDDED_START, EMBEDDED_END],
            pens,
        )
    }

    /// Read all five resource files from `dir`.
    pub fn load_dir(dir: &Path, pens: &PenSettings) -> Result<Self, ResourceError> {
        let puzzles = read(dir, PUZZLES_FILE)?;
        let font = read(dir, FONT_FILE)?;
        let wipe = read(dir, WIPE_FILE)?;
        let start = read(dir, START_FILE)?;
        let end = read(dir, END_FILE)?;

        tracing::info!(dir = %dir.display(), "Loading resources from directory");
        Self::from_texts(&puzzles, &font, [&wipe, &start, &end], pens)
    }

    fn from_texts(
        puzzles: &str,
        font: &str,
        [wipe, start, end]: [&str; 3],
        pens: &PenSettings,
    ) -> Result<Self, ResourceError> {
        let puzzles = PuzzleBook::parse(puzzles)?;
        let glyphs = parse_glyph_set(font)?;
        let templates = Templates {
            wipe: render_template(wipe, pens),
            start: render_template(start, pens),
            end: render_template(end, pens),
        };

        tracing::debug!(
            puzzles = puzzles.len(),
            glyphs = glyphs.len(),
            "Resources ready"
        );
        Ok(Self {
            puzzles,
            glyphs,
            templates,
        })
    }
}

fn read(dir: &Path, name: &str) -> Result<String, ResourceError> {
    let path = dir.join(name);
    fs::read_to_string(&path).map_err(|source| ResourceError::Read { path, source })
}
