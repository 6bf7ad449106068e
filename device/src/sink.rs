//! Text output for runs without a device.

use std::io::{self, Write};

use sudoplot_types::InstructionStream;

use crate::session::{SessionEvent, SessionObserver};

/// Write every line of `stream`, comments included, newline-terminated.
/// Returns the number of lines written.
pub fn write_stream<W: Write>(stream: &InstructionStream, out: &mut W) -> io::Result<usize> {
    let mut count = 0;
    for line in stream.lines() {
        writeln!(out, "{line}")?;
        count += 1;
    }
    out.flush()?;
    Ok(count)
}

/// Human-readable session log: `<< ` for sent lines, `>> ` for received
/// lines, `Waiting` while the controller is busy.
#[derive(Debug)]
pub struct Transcript<W: Write> {
    out: W,
}

impl<W: Write> Transcript<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> SessionObserver for Transcript<W> {
    fn on_event(&mut self, event: &SessionEvent) {
        let result = match event {
            SessionEvent::Sent { line, .. } => writeln!(self.out, "<< {line}"),
            SessionEvent::Received { line, .. } => writeln!(self.out, ">> {line}"),
            SessionEvent::Busy { .. } => writeln!(self.out, "Waiting"),
            SessionEvent::Retrying { index, attempt } => {
                writeln!(self.out, "Resending line {index} (attempt {attempt})")
            }
            SessionEvent::TimedOut { index } => {
                writeln!(self.out, "No response to line {index}")
            }
            SessionEvent::Skipped { .. } | SessionEvent::Acknowledged { .. } => Ok(()),
        };
        // A broken console must not abort a half-drawn plot.
        if let Err(err) = result {
            tracing::debug!("Transcript write failed: {err}");
        }
    }
}
