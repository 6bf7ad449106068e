//! Line framing for the plotter's serial protocol.
//!
//! Outbound: one instruction per line, terminated by `\r\n`.
//! Inbound: whatever bytes the controller has sent since the last
//! transmission, accumulated in a [`ResponseBuffer`] and classified as soon
//! as any byte has arrived.

use std::borrow::Cow;

/// Sent while the controller is still executing a previous command.
pub const BUSY_REPLY: &str = "busy:processing";

/// Acknowledgment line. Any response containing it as a complete line counts.
pub const ACK_REPLY: &str = "ok 0";

const LINE_TERMINATOR: &str = "\r\n";

/// Encode one instruction line for the wire.
#[must_use]
pub fn encode_line(line: &str) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(line.len() + LINE_TERMINATOR.len());
    bytes.extend_from_slice(line.as_bytes());
    bytes.extend_from_slice(LINE_TERMINATOR.as_bytes());
    bytes
}

/// How the controller answered a transmitted line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reply {
    Busy,
    Ack,
    /// Anything else: an error report or noise. The line is resent.
    Rejected,
}

/// Bytes received since the last transmission.
#[derive(Debug, Default, Clone)]
pub struct ResponseBuffer {
    bytes: Vec<u8>,
}

impl ResponseBuffer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw sink for transports to append into.
    pub fn bytes_mut(&mut self) -> &mut Vec<u8> {
        &mut self.bytes
    }

    pub fn clear(&mut self) {
        self.bytes.clear();
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Decoded text. Invalid UTF-8 is replaced rather than rejected; the
    /// controller occasionally emits garbage after a reset.
    #[must_use]
    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.bytes)
    }

    /// Non-empty response lines with terminators stripped.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        self.text()
            .lines()
            .map(|line| line.trim_end_matches('\r'))
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect()
    }

    #[must_use]
    pub fn classify(&self) -> Reply {
        classify_response(&self.text())
    }
}

/// Classify a complete response text.
#[must_use]
pub fn classify_response(text: &str) -> Reply {
    if text.trim() == BUSY_REPLY {
        return Reply::Busy;
    }
    if text.lines().any(|line| line.trim_end_matches('\r') == ACK_REPLY) {
        Reply::Ack
    } else {
        Reply::Rejected
    }
}
