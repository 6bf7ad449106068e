//! Wraps the generated body in the optional wipe, start and end blocks.

use sudoplot_resources::Templates;
use sudoplot_types::InstructionStream;

/// Which template blocks surround the body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Blocks {
    pub wipe: bool,
    pub start: bool,
    pub end: bool,
}

impl Default for Blocks {
    fn default() -> Self {
        Self {
            wipe: true,
            start: true,
            end: true,
        }
    }
}

/// `[wipe?] + [start?] + body + [end?]`. Omitted blocks contribute nothing.
#[must_use]
pub fn assemble(body: InstructionStream, templates: &Templates, blocks: Blocks) -> InstructionStream {
    let prologue = [
        (blocks.wipe, &templates.wipe),
        (blocks.start, &templates.start),
    ];
    let epilogue = blocks.end.then_some(&templates.end);

    prologue
        .into_iter()
        .filter_map(|(enabled, block)| enabled.then_some(block))
        .flat_map(|block| block.iter().cloned())
        .chain(body)
        .chain(epilogue.into_iter().flat_map(|block| block.iter().cloned()))
        .collect()
}
