use std::path::PathBuf;

use sudoplot_types::GridError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ResourceError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("puzzle {index}: {source}")]
    Puzzle { index: usize, source: GridError },
    #[error("puzzle book contains no puzzles")]
    EmptyBook,
    #[error("glyph data is not valid JSON: {0}")]
    GlyphJson(#[from] serde_json::Error),
    #[error("glyph key '{0}' is not a digit between 1 and 9")]
    GlyphKey(String),
    #[error("glyph {digit}, command {index}: unknown tag '{tag}' (expected u, d or m)")]
    GlyphTag {
        digit: String,
        index: usize,
        tag: String,
    },
}
