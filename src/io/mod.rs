//! Host-facing transport layer.

mod serial;

use std::fmt::{Debug, Display};
use std::time::Duration;

pub use serial::Serial;

use crate::errors::Error;

/// The byte stream between the controller and its host.
///
/// Reception is a non-blocking poll: the control loop checks
/// [`HostLink::bytes_available`] and only then reads, so a silent host never
/// stalls input sampling.
pub trait HostLink: Debug + Display {
    /// Opens communication (in a blocking way) using the transport layer.
    fn open(&mut self) -> Result<(), Error>;

    /// Gracefully shuts down the transport layer.
    fn close(&mut self) -> Result<(), Error>;

    /// Sets a timeout for blocking operations on the transport layer.
    fn set_timeout(&mut self, duration: Duration) -> Result<(), Error>;

    /// Returns the number of bytes that can be read without blocking.
    fn bytes_available(&mut self) -> Result<usize, Error>;

    /// Reads up to `buf.len()` bytes; returns the number of bytes read
    /// (possibly zero).
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Error>;

    /// Writes the whole buffer to the internal connection.
    fn write_all(&mut self, buf: &[u8]) -> Result<(), Error>;

    /// Writes one event record followed by its line terminator.
    fn write_line(&mut self, line: &str) -> Result<(), Error> {
        self.write_all(line.as_bytes())?;
        self.write_all(b"\n")
    }
}
