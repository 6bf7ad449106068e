//! Session state machine.
//!
//! Every move the session makes goes through [`SessionState::transition`].
//! Pairs not in the table are errors rather than silently ignored, so a
//! driver bug surfaces as [`TransitionError`] instead of a wedged plotter.

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionState {
    /// Between lines.
    Idle,
    /// A line is being written.
    Sending,
    /// Polling for a reply to the last write.
    AwaitingResponse,
    /// Controller reported it is still working; waiting it out.
    Busy,
    /// Reply did not acknowledge; the same line goes out again.
    Retrying,
    Acknowledged,
    /// Silence limit reached. Terminal.
    TimedOut,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Signal {
    /// Next line is transmittable.
    Next,
    /// Next line is a comment or blank.
    Skip,
    /// No lines remain.
    Exhausted,
    Transmitted,
    /// A poll found nothing new.
    Silence,
    /// A poll found nothing and the silence budget is spent.
    SilenceLimit,
    BusyReply,
    OkReply,
    RejectedReply,
    /// Busy wait elapsed.
    Settled,
    Resend,
    Advance,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("invalid session transition: {signal:?} in state {from:?}")]
pub struct TransitionError {
    pub from: SessionState,
    pub signal: Signal,
}

impl SessionState {
    #[allow(clippy::match_same_arms)] // one row per table entry
    pub fn transition(self, signal: Signal) -> Result<Self, TransitionError> {
        use SessionState::{Acknowledged, AwaitingResponse, Busy, Idle, Retrying, Sending, TimedOut};

        let next = match (self, signal) {
            (Idle, Signal::Next) => Sending,
            (Idle, Signal::Skip | Signal::Exhausted) => Idle,
            (Sending, Signal::Transmitted) => AwaitingResponse,
            (AwaitingResponse, Signal::Silence) => AwaitingResponse,
            (AwaitingResponse, Signal::SilenceLimit) => TimedOut,
            (AwaitingResponse, Signal::BusyReply) => Busy,
            (AwaitingResponse, Signal::OkReply) => Acknowledged,
            (AwaitingResponse, Signal::RejectedReply) => Retrying,
            (Busy, Signal::Settled) => AwaitingResponse,
            (Retrying, Signal::Resend) => Sending,
            (Acknowledged, Signal::Advance) => Idle,
            (from, signal) => return Err(TransitionError { from, signal }),
        };
        Ok(next)
    }
}
