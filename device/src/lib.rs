//! Plotter device protocol.
//!
//! ```text
//! InstructionStream -> DeviceSession::run() -> Transport (serial port)
//!                            |        ^
//!                            v        |
//!                       SessionObserver  ResponseBuffer (busy / ok 0 / other)
//! ```
//!
//! Without a device, [`write_stream`] prints the same stream as text.

mod clock;
mod codec;
mod session;
mod sink;
mod state;
mod transport;

pub use clock::{Clock, SystemClock};
pub use codec::{ACK_REPLY, BUSY_REPLY, Reply, ResponseBuffer, classify_response, encode_line};
pub use session::{
    BUSY_WAIT, DeviceSession, MAX_SILENT_POLLS, POLL_INTERVAL, SessionConfig, SessionError,
    SessionEvent, SessionObserver, SessionReport,
};
pub use sink::{Transcript, write_stream};
pub use state::{SessionState, Signal, TransitionError};
pub use transport::{DEFAULT_BAUD_RATE, SerialSettings, SerialTransport, Transport};
