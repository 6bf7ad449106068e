//! Hands the finished program to the plotter, or prints it when no port is
//! configured.

use std::io::Write;

use sudoplot_config::PlotterConfig;
use sudoplot_device::{
    Clock, DeviceSession, SerialSettings, SerialTransport, SessionConfig, SessionObserver,
    SessionReport, SystemClock, Transport, write_stream,
};
use sudoplot_types::InstructionStream;

use crate::RunError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    /// Streamed to the plotter.
    Device(SessionReport),
    /// Written as text; holds the line count.
    Printed(usize),
}

/// Stream `program` over `transport`. The transport is released before this
/// returns, on success or failure.
pub fn send_program<T: Transport, C: Clock>(
    program: &InstructionStream,
    transport: T,
    clock: C,
    config: SessionConfig,
    observer: &mut dyn SessionObserver,
) -> Result<SessionReport, RunError> {
    let report = DeviceSession::new(transport, clock, config).run(program, observer)?;
    Ok(report)
}

pub fn print_program<W: Write>(program: &InstructionStream, out: &mut W) -> Result<usize, RunError> {
    write_stream(program, out).map_err(RunError::Output)
}

/// Serial port when one is configured, `out` otherwise.
pub fn deliver<W: Write>(
    program: &InstructionStream,
    config: &PlotterConfig,
    observer: &mut dyn SessionObserver,
    out: &mut W,
) -> Result<Delivery, RunError> {
    let Some(port) = config.port() else {
        tracing::info!("No device port configured, printing instructions");
        return print_program(program, out).map(Delivery::Printed);
    };

    let transport = SerialTransport::open(SerialSettings::new(port)).map_err(|source| {
        RunError::Open {
            port: port.to_string(),
            source,
        }
    })?;
    send_program(
        program,
        transport,
        SystemClock,
        SessionConfig::default(),
        observer,
    )
    .map(Delivery::Device)
}
