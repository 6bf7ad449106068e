//! sudoplot - draws a sudoku puzzle on a pen plotter.
//!
//! ```text
//! main() -> PlotterConfig::load() -> sudoplot_engine::run() -> serial port | stdout
//!                                              |
//!                                              v
//!                                 Transcript (<< sent, >> received)
//! ```
//!
//! Without a configured port the instruction program is printed to stdout
//! and nothing else is written there; logs always go to stderr and, when it
//! can be opened, `~/.sudoplot/logs/sudoplot.log`.
//!
//! Exit status is zero on success and [`RunError::exit_code`] otherwise.

use std::fs::{self, OpenOptions};
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Mutex;

use anyhow::{Context, Result};
use sudoplot_config::{PlotterConfig, config_path};
use sudoplot_device::Transcript;
use sudoplot_engine::{Delivery, RunError};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn init_tracing() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let (log_file, init_warnings) = open_log_file();
    let log_path = log_file.as_ref().map(|(path, _)| path.clone());
    let file_layer = log_file
        .map(|(_, file)| fmt::layer().with_ansi(false).with_writer(Mutex::new(file)));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_writer(io::stderr))
        .with(file_layer)
        .init();

    if let Some(path) = log_path {
        tracing::debug!(path = %path.display(), "Logging initialized");
    }
    for warning in init_warnings {
        tracing::warn!("{warning}");
    }
}

fn open_log_file() -> (Option<(PathBuf, fs::File)>, Vec<String>) {
    let mut warnings = Vec::new();

    for candidate in log_file_candidates() {
        if let Some(parent) = candidate.parent()
            && let Err(e) = fs::create_dir_all(parent)
        {
            warnings.push(format!(
                "Failed to create log dir {}: {e}",
                parent.display()
            ));
            continue;
        }

        match OpenOptions::new().create(true).append(true).open(&candidate) {
            Ok(file) => return (Some((candidate, file)), warnings),
            Err(e) => {
                warnings.push(format!(
                    "Failed to open log file {}: {e}",
                    candidate.display()
                ));
            }
        }
    }

    (None, warnings)
}

fn log_file_candidates() -> Vec<PathBuf> {
    // ~/.sudoplot/logs/sudoplot.log, next to the config file
    config_path()
        .and_then(|path| path.parent().map(|dir| dir.join("logs").join("sudoplot.log")))
        .into_iter()
        .collect()
}

fn run() -> Result<()> {
    let config = PlotterConfig::load()
        .map_err(RunError::from)
        .context("loading configuration")?;

    let mut transcript = Transcript::new(io::stdout());
    let mut out = io::stdout();
    let (program, delivery) = sudoplot_engine::run(&config, &mut transcript, &mut out)?;

    if let Delivery::Device(report) = delivery {
        eprintln!(
            "Plotted puzzle {}: {} lines acknowledged, {} skipped, {} resent",
            program.puzzle_index, report.acknowledged, report.skipped, report.resends
        );
    }
    Ok(())
}

fn main() -> ExitCode {
    init_tracing();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            let code = err.downcast_ref::<RunError>().map_or(1, RunError::exit_code);
            ExitCode::from(code)
        }
    }
}
