//! Stroke font loading.
//!
//! The font is a JSON object keyed by digit. Each value is an ordered list of
//! `[tag, dx, dy]` records where `tag` is `u` (pen up), `d` (pen down) or `m`
//! (move). Offsets on pen records are present but unused.

use std::collections::BTreeMap;

use sudoplot_types::{Digit, GlyphCommand, GlyphSet};

use crate::error::ResourceError;

type RawFont = BTreeMap<String, Vec<(String, f64, f64)>>;

pub fn parse_glyph_set(json: &str) -> Result<GlyphSet, ResourceError> {
    let raw: RawFont = serde_json::from_str(json)?;

    let mut glyphs = BTreeMap::new();
    for (key, records) in raw {
        let digit = parse_key(&key)?;
        let commands = records
            .into_iter()
            .enumerate()
            .map(|(index, (tag, dx, dy))| match tag.as_str() {
                "u" => Ok(GlyphCommand::PenUp),
                "d" => Ok(GlyphCommand::PenDown),
                "m" => Ok(GlyphCommand::MoveTo { dx, dy }),
                _ => Err(ResourceError::GlyphTag {
                    digit: key.clone(),
                    index,
                    tag,
                }),
            })
            .collect::<Result<Vec<_>, _>>()?;
        glyphs.insert(digit, commands);
    }

    tracing::debug!(glyphs = glyphs.len(), "Parsed stroke font");
    Ok(GlyphSet::new(glyphs))
}

fn parse_key(key: &str) -> Result<Digit, ResourceError> {
    let mut chars = key.trim().chars();
    match (chars.next(), chars.next()) {
        (Some(ch), None) => Digit::from_char(ch).ok_or_else(|| ResourceError::GlyphKey(key.into())),
        _ => Err(ResourceError::GlyphKey(key.into())),
    }
}
