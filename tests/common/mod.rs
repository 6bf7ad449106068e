//! Shared test utilities and fixtures
//!
//! A scripted serial transport, an instant clock, and config files in
//! temporary directories.

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::VecDeque;
use std::io;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::time::Duration;

use sudoplot_device::{Clock, SessionEvent, Transport};

/// What the controller side of the wire saw and will say.
#[derive(Debug, Default)]
pub struct Wire {
    pub written: Vec<String>,
    /// One entry per poll; `""` is a silent poll. Running out means silence.
    pub replies: VecDeque<String>,
    /// Reply automatically with `ok 0` to every line once `replies` runs out.
    pub auto_ack: bool,
    /// Fail the write with this zero-based ordinal.
    pub fail_send: Option<usize>,
    pub cycles: usize,
    pub closed: bool,
    pub dropped: bool,
    pending_ack: bool,
}

impl Wire {
    /// Lines as sent, without terminators.
    pub fn sent_lines(&self) -> Vec<&str> {
        self.written
            .iter()
            .map(|line| line.trim_end_matches("\r\n"))
            .collect()
    }
}

#[derive(Debug)]
pub struct ScriptedTransport {
    wire: Rc<RefCell<Wire>>,
}

impl ScriptedTransport {
    pub fn new(replies: &[&str]) -> (Self, Rc<RefCell<Wire>>) {
        let wire = Rc::new(RefCell::new(Wire {
            replies: replies.iter().map(|reply| (*reply).to_string()).collect(),
            ..Wire::default()
        }));
        (
            Self {
                wire: Rc::clone(&wire),
            },
            wire,
        )
    }

    /// Acknowledges every line on the first poll.
    pub fn acking() -> (Self, Rc<RefCell<Wire>>) {
        let (transport, wire) = Self::new(&[]);
        wire.borrow_mut().auto_ack = true;
        (transport, wire)
    }
}

impl Transport for ScriptedTransport {
    fn send(&mut self, bytes: &[u8]) -> io::Result<()> {
        let mut wire = self.wire.borrow_mut();
        if wire.closed {
            return Err(io::Error::new(io::ErrorKind::NotConnected, "closed"));
        }
        if wire.fail_send == Some(wire.written.len()) {
            return Err(io::Error::new(io::ErrorKind::BrokenPipe, "cable pulled"));
        }
        wire.written.push(String::from_utf8_lossy(bytes).into_owned());
        wire.pending_ack = wire.auto_ack;
        Ok(())
    }

    fn read_available(&mut self, buf: &mut Vec<u8>) -> io::Result<usize> {
        let mut wire = self.wire.borrow_mut();
        let reply = match wire.replies.pop_front() {
            Some(reply) => reply,
            None if wire.pending_ack => {
                wire.pending_ack = false;
                "ok 0\r\n".to_string()
            }
            None => String::new(),
        };
        buf.extend_from_slice(reply.as_bytes());
        Ok(reply.len())
    }

    fn cycle(&mut self) -> io::Result<()> {
        self.wire.borrow_mut().cycles += 1;
        Ok(())
    }

    fn close(&mut self) {
        self.wire.borrow_mut().closed = true;
    }
}

impl Drop for ScriptedTransport {
    fn drop(&mut self) {
        self.wire.borrow_mut().dropped = true;
    }
}

/// Records requested sleeps instead of sleeping.
#[derive(Debug, Default)]
pub struct FakeClock {
    pub slept: Vec<Duration>,
}

impl FakeClock {
    pub fn total(&self) -> Duration {
        self.slept.iter().sum()
    }
}

impl Clock for FakeClock {
    fn sleep(&mut self, duration: Duration) {
        self.slept.push(duration);
    }
}

/// Collects session events for later assertions.
#[derive(Debug, Default)]
pub struct Recorder {
    pub events: Vec<SessionEvent>,
}

impl sudoplot_device::SessionObserver for Recorder {
    fn on_event(&mut self, event: &SessionEvent) {
        self.events.push(event.clone());
    }
}

/// Write `config.toml` into `dir` and return its path.
pub fn write_config(dir: &Path, body: &str) -> PathBuf {
    let path = dir.join("config.toml");
    std::fs::write(&path, body).unwrap();
    path
}
