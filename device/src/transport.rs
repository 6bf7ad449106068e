//! Byte transport to the controller.

use std::io::{self, Read, Write};
use std::time::Duration;

use serialport::{DataBits, FlowControl, Parity, SerialPort, StopBits};

/// Controller line rate.
pub const DEFAULT_BAUD_RATE: u32 = 115_200;

/// Read/write timeout on the underlying port. Reads never block on it in
/// practice since only already-buffered bytes are requested.
const IO_TIMEOUT: Duration = Duration::from_millis(100);

/// Line-oriented byte channel used by the session.
///
/// `read_available` must not block waiting for data; the session drives its
/// own poll cadence.
pub trait Transport {
    /// Write already-encoded bytes and flush.
    fn send(&mut self, bytes: &[u8]) -> io::Result<()>;

    /// Append every byte currently waiting to `buf`. Returns how many were
    /// appended; zero means silence.
    fn read_available(&mut self, buf: &mut Vec<u8>) -> io::Result<usize>;

    /// Close and reopen the channel.
    fn cycle(&mut self) -> io::Result<()>;

    /// Release the channel. Idempotent.
    fn close(&mut self);
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn send(&mut self, bytes: &[u8]) -> io::Result<()> {
        (**self).send(bytes)
    }

    fn read_available(&mut self, buf: &mut Vec<u8>) -> io::Result<usize> {
        (**self).read_available(buf)
    }

    fn cycle(&mut self) -> io::Result<()> {
        (**self).cycle()
    }

    fn close(&mut self) {
        (**self).close();
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SerialSettings {
    pub path: String,
    pub baud_rate: u32,
}

impl SerialSettings {
    /// 8 data bits, no parity, one stop bit at [`DEFAULT_BAUD_RATE`].
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            baud_rate: DEFAULT_BAUD_RATE,
        }
    }
}

/// Serial port handle. The port is closed when the transport is dropped, on
/// every exit path.
pub struct SerialTransport {
    settings: SerialSettings,
    port: Option<Box<dyn SerialPort>>,
}

impl std::fmt::Debug for SerialTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SerialTransport")
            .field("settings", &self.settings)
            .field("open", &self.port.is_some())
            .finish()
    }
}

impl SerialTransport {
    pub fn open(settings: SerialSettings) -> io::Result<Self> {
        let port = open_port(&settings)?;
        tracing::info!(path = %settings.path, baud = settings.baud_rate, "Serial port opened");
        Ok(Self {
            settings,
            port: Some(port),
        })
    }

    fn port(&mut self) -> io::Result<&mut Box<dyn SerialPort>> {
        self.port
            .as_mut()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotConnected, "serial port is closed"))
    }
}

fn open_port(settings: &SerialSettings) -> io::Result<Box<dyn SerialPort>> {
    serialport::new(settings.path.as_str(), settings.baud_rate)
        .data_bits(DataBits::Eight)
        .parity(Parity::None)
        .stop_bits(StopBits::One)
        .flow_control(FlowControl::None)
        .timeout(IO_TIMEOUT)
        .open()
        .map_err(io::Error::from)
}

impl Transport for SerialTransport {
    fn send(&mut self, bytes: &[u8]) -> io::Result<()> {
        let port = self.port()?;
        port.write_all(bytes)?;
        port.flush()
    }

    fn read_available(&mut self, buf: &mut Vec<u8>) -> io::Result<usize> {
        let port = self.port()?;
        let waiting = port.bytes_to_read().map_err(io::Error::from)? as usize;
        if waiting == 0 {
            return Ok(0);
        }

        let mut chunk = vec![0u8; waiting];
        match port.read(&mut chunk) {
            Ok(n) => {
                buf.extend_from_slice(&chunk[..n]);
                Ok(n)
            }
            Err(err) if err.kind() == io::ErrorKind::TimedOut => Ok(0),
            Err(err) => Err(err),
        }
    }

    fn cycle(&mut self) -> io::Result<()> {
        // Drop the old handle first; some drivers refuse a second open.
        self.port = None;
        self.port = Some(open_port(&self.settings)?);
        tracing::debug!(path = %self.settings.path, "Serial port cycled");
        Ok(())
    }

    fn close(&mut self) {
        if self.port.take().is_some() {
            tracing::info!(path = %self.settings.path, "Serial port closed");
        }
    }
}

impl Drop for SerialTransport {
    fn drop(&mut self) {
        self.close();
    }
}
