//! From configuration and resources to the complete instruction program.

use sudoplot_config::PlotterConfig;
use sudoplot_layout::{LayoutEngine, LayoutParams};
use sudoplot_resources::{ResourceError, Resources};
use sudoplot_types::{InstructionStream, Point};

use crate::RunError;
use crate::assemble::{Blocks, assemble};
use crate::select::select_puzzle;

/// Everything that will be delivered for one run.
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub puzzle_index: usize,
    pub instructions: InstructionStream,
}

#[must_use]
pub fn layout_params(config: &PlotterConfig) -> LayoutParams {
    LayoutParams {
        origin: Point::new(f64::from(config.origin.x), f64::from(config.origin.y)),
        pens: config.pen.settings(),
        draw_grid: config.draw.grid,
        draw_numbers: config.draw.numbers,
        ..LayoutParams::default()
    }
}

#[must_use]
pub fn blocks(config: &PlotterConfig) -> Blocks {
    Blocks {
        wipe: config.draw.wipe,
        start: config.draw.start_end,
        end: config.draw.start_end,
    }
}

/// The directory override when configured, else the compiled-in set.
pub fn load_resources(config: &PlotterConfig) -> Result<Resources, ResourceError> {
    let pens = config.pen.settings();
    match &config.assets_dir {
        Some(dir) => Resources::load_dir(dir, &pens),
        None => Resources::embedded(&pens),
    }
}

/// Select a puzzle, lay it out and wrap it in the configured blocks.
///
/// Fails before anything reaches a device: a layout overflow means no
/// program at all.
pub fn build_program(
    config: &PlotterConfig,
    resources: &Resources,
    draw: impl FnOnce(usize) -> usize,
) -> Result<Program, RunError> {
    let (puzzle_index, grid) = select_puzzle(&resources.puzzles, config.puzzle, draw)?;
    tracing::debug!(puzzle = puzzle_index, clues = grid.filled_count(), "Laying out puzzle");

    let params = layout_params(config);
    let body = LayoutEngine::new(&params).layout(grid, &resources.glyphs)?;
    let instructions = assemble(body, &resources.templates, blocks(config));

    tracing::info!(
        puzzle = puzzle_index,
        instructions = instructions.len(),
        "Program assembled"
    );
    Ok(Program {
        puzzle_index,
        instructions,
    })
}
