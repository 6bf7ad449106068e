//! Prologue/epilogue instruction templates with pen placeholders.

use sudoplot_types::{InstructionStream, PenSettings, format_decimal};

pub const PEN_UP_PLACEHOLDER: &str = "{{pen_up}}";
pub const PEN_DOWN_PLACEHOLDER: &str = "{{pen_down}}";
pub const PEN_DOCK_PLACEHOLDER: &str = "{{pen_dock}}";

/// Substitute pen placeholders and split into raw instructions, one per line,
/// with trailing whitespace removed. Blank and `;` lines are kept; the
/// session skips them on the wire.
#[must_use]
pub fn render_template(text: &str, pens: &PenSettings) -> InstructionStream {
    let up = format_decimal(pens.up);
    let down = format_decimal(pens.down);
    let dock = format_decimal(pens.dock);

    InstructionStream::from_lines(text.lines().map(|line| {
        line.replace(PEN_UP_PLACEHOLDER, &up)
            .replace(PEN_DOWN_PLACEHOLDER, &down)
            .replace(PEN_DOCK_PLACEHOLDER, &dock)
            .trim_end()
            .to_string()
    }))
}

/// The three optional blocks wrapped around the generated body.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Templates {
    pub wipe: InstructionStream,
    pub start: InstructionStream,
    pub end: InstructionStream,
}
