//! Run orchestration for sudoplot.
//!
//! ```text
//! PlotterConfig -> load_resources() -> build_program() -> deliver()
//!                                      |                    |
//!                       select, layout, assemble    serial session or text
//! ```
//!
//! Everything up to [`deliver()`] is pure with respect to the device: a
//! selection or layout failure means the port is never opened.

mod assemble;
mod deliver;
mod error;
mod plan;
mod select;

use std::io::Write;

use sudoplot_config::PlotterConfig;
use sudoplot_device::SessionObserver;

pub use assemble::{Blocks, assemble};
pub use deliver::{Delivery, deliver, print_program, send_program};
pub use error::RunError;
pub use plan::{Program, blocks, build_program, layout_params, load_resources};
pub use select::{SelectionError, random_draw, select_puzzle};

/// One complete run: resources, program, delivery.
pub fn run<W: Write>(
    config: &PlotterConfig,
    observer: &mut dyn SessionObserver,
    out: &mut W,
) -> Result<(Program, Delivery), RunError> {
    let resources = load_resources(config)?;
    let program = build_program(config, &resources, random_draw)?;
    let delivery = deliver(&program.instructions, config, observer, out)?;

    match delivery {
        Delivery::Device(report) => tracing::info!(
            puzzle = program.puzzle_index,
            transmissions = report.transmissions,
            skipped = report.skipped,
            resends = report.resends,
            "Plot finished"
        ),
        Delivery::Printed(lines) => {
            tracing::info!(puzzle = program.puzzle_index, lines, "Instructions printed");
        }
    }
    Ok((program, delivery))
}
