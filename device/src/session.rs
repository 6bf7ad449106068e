//! Acknowledged line delivery.
//!
//! One line in flight at a time. After each write the session polls the
//! transport at a fixed cadence until the controller answers:
//!
//! - `busy:processing` alone: wait, discard it, keep polling with a fresh
//!   silence budget.
//! - a response containing the line `ok 0`: advance.
//! - anything else, even a bare line terminator: resend the same line.
//! - no bytes at all for the whole silence budget: fail with [`SessionError::Timeout`].
//!
//! The transport is released when the session ends, whichever way it ends.

use std::io;
use std::time::Duration;

use sudoplot_types::InstructionStream;
use thiserror::Error;

use crate::clock::Clock;
use crate::codec::{Reply, ResponseBuffer, encode_line};
use crate::state::{SessionState, Signal, TransitionError};
use crate::transport::Transport;

/// Poll cadence while awaiting a reply.
pub const POLL_INTERVAL: Duration = Duration::from_millis(200);

/// Consecutive silent polls tolerated per transmission.
pub const MAX_SILENT_POLLS: u32 = 100;

/// Pause after a busy reply before polling resumes.
pub const BUSY_WAIT: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    pub poll_interval: Duration,
    pub max_silent_polls: u32,
    pub busy_wait: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            poll_interval: POLL_INTERVAL,
            max_silent_polls: MAX_SILENT_POLLS,
            busy_wait: BUSY_WAIT,
        }
    }
}

impl SessionConfig {
    /// Silence tolerated before giving up on one transmission.
    #[must_use]
    pub fn silence_timeout(&self) -> Duration {
        self.poll_interval * self.max_silent_polls
    }
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("no response to line {index} ({line:?}) after {polls} polls")]
    Timeout {
        index: usize,
        line: String,
        polls: u32,
    },
    #[error("transport failure while cycling the port: {0}")]
    Cycle(#[source] io::Error),
    #[error("transport failure while {action} line {index}: {source}")]
    Transport {
        action: &'static str,
        index: usize,
        source: io::Error,
    },
    #[error(transparent)]
    InvalidTransition(#[from] TransitionError),
}

/// Progress notifications, in the order they happen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    Sent { index: usize, line: String },
    Received { index: usize, line: String },
    Busy { index: usize },
    Skipped { index: usize },
    Retrying { index: usize, attempt: u32 },
    Acknowledged { index: usize },
    TimedOut { index: usize },
}

pub trait SessionObserver {
    fn on_event(&mut self, event: &SessionEvent);
}

impl<F: FnMut(&SessionEvent)> SessionObserver for F {
    fn on_event(&mut self, event: &SessionEvent) {
        self(event);
    }
}

/// Counters for a completed session.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SessionReport {
    /// Lines the controller acknowledged.
    pub acknowledged: usize,
    /// Comment and blank lines never sent.
    pub skipped: usize,
    /// Writes, including resends.
    pub transmissions: usize,
    pub resends: usize,
    pub busy_waits: usize,
}

pub struct DeviceSession<T: Transport, C: Clock> {
    transport: T,
    clock: C,
    config: SessionConfig,
}

impl<T: Transport, C: Clock> DeviceSession<T, C> {
    pub fn new(transport: T, clock: C, config: SessionConfig) -> Self {
        Self {
            transport,
            clock,
            config,
        }
    }

    /// Deliver every line of `stream`. Consumes the session; the transport is
    /// closed on return.
    pub fn run(
        mut self,
        stream: &InstructionStream,
        observer: &mut dyn SessionObserver,
    ) -> Result<SessionReport, SessionError> {
        let result = self.drive(stream, observer);
        self.transport.close();
        match &result {
            Ok(report) => tracing::info!(
                acknowledged = report.acknowledged,
                resends = report.resends,
                "Session complete"
            ),
            Err(err) => tracing::error!("Session aborted: {err}"),
        }
        result
    }

    fn drive(
        &mut self,
        stream: &InstructionStream,
        observer: &mut dyn SessionObserver,
    ) -> Result<SessionReport, SessionError> {
        // Controllers that reset on DTR need a fresh connection before the
        // first line or they swallow it.
        self.transport.cycle().map_err(SessionError::Cycle)?;

        let mut report = SessionReport::default();
        let mut state = SessionState::Idle;
        let mut buffer = ResponseBuffer::new();
        let mut index = 0;
        let mut line = String::new();
        let mut polls = 0;
        let mut attempt = 0;

        loop {
            let signal = match state {
                SessionState::Idle => {
                    let Some(instruction) = stream.get(index) else {
                        state.transition(Signal::Exhausted)?;
                        return Ok(report);
                    };
                    if instruction.is_protocol_noop() {
                        tracing::trace!(index, "Skipping non-command line");
                        observer.on_event(&SessionEvent::Skipped { index });
                        report.skipped += 1;
                        index += 1;
                        Signal::Skip
                    } else {
                        line = instruction.text().trim().to_string();
                        attempt = 0;
                        Signal::Next
                    }
                }
                SessionState::Sending => {
                    buffer.clear();
                    polls = 0;
                    self.transport
                        .send(&encode_line(&line))
                        .map_err(|source| SessionError::Transport {
                            action: "sending",
                            index,
                            source,
                        })?;
                    report.transmissions += 1;
                    tracing::debug!(index, line = %line, "Sent");
                    observer.on_event(&SessionEvent::Sent {
                        index,
                        line: line.clone(),
                    });
                    Signal::Transmitted
                }
                SessionState::AwaitingResponse => {
                    self.clock.sleep(self.config.poll_interval);
                    self.transport
                        .read_available(buffer.bytes_mut())
                        .map_err(|source| SessionError::Transport {
                            action: "reading reply to",
                            index,
                            source,
                        })?;
                    polls += 1;

                    if buffer.is_empty() {
                        if polls >= self.config.max_silent_polls {
                            Signal::SilenceLimit
                        } else {
                            Signal::Silence
                        }
                    } else {
                        for received in buffer.lines() {
                            observer.on_event(&SessionEvent::Received {
                                index,
                                line: received,
                            });
                        }
                        match buffer.classify() {
                            Reply::Busy => Signal::BusyReply,
                            Reply::Ack => Signal::OkReply,
                            Reply::Rejected => Signal::RejectedReply,
                        }
                    }
                }
                SessionState::Busy => {
                    tracing::debug!(index, "Controller busy, waiting");
                    observer.on_event(&SessionEvent::Busy { index });
                    report.busy_waits += 1;
                    self.clock.sleep(self.config.busy_wait);
                    buffer.clear();
                    polls = 0;
                    Signal::Settled
                }
                SessionState::Retrying => {
                    attempt += 1;
                    report.resends += 1;
                    tracing::warn!(
                        index,
                        attempt,
                        response = %buffer.text().trim(),
                        "Line not acknowledged, resending"
                    );
                    observer.on_event(&SessionEvent::Retrying { index, attempt });
                    Signal::Resend
                }
                SessionState::Acknowledged => {
                    observer.on_event(&SessionEvent::Acknowledged { index });
                    report.acknowledged += 1;
                    index += 1;
                    Signal::Advance
                }
                SessionState::TimedOut => {
                    tracing::warn!(
                        index,
                        polls,
                        "No response within {:?}",
                        self.config.silence_timeout()
                    );
                    observer.on_event(&SessionEvent::TimedOut { index });
                    return Err(SessionError::Timeout {
                        index,
                        line: std::mem::take(&mut line),
                        polls,
                    });
                }
            };
            state = state.transition(signal)?;
        }
    }
}
