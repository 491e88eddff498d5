use std::fmt::{Debug, Display, Formatter};
use std::io::{Read, Write};
use std::time::Duration;

use log::trace;
use serialport::{DataBits, FlowControl, Parity, SerialPort, StopBits};

use crate::errors::Error;
use crate::errors::Error::LinkNotOpen;
use crate::io::HostLink;

/// [`HostLink`] over a physical serial port (`serialport` crate), 8N1.
pub struct Serial {
    /// The connection port.
    port: String,
    baud_rate: u32,
    /// A Read/Write io object, present once opened.
    io: Option<Box<dyn SerialPort>>,
}

impl Serial {
    /// Constructs a new `Serial` link for communication through the specified port.
    ///
    /// # Arguments
    /// * `port` - The serial port to use for communication.
    /// * `baud_rate` - The link speed (the deck host protocol uses 115200).
    pub fn new<P: Into<String>>(port: P, baud_rate: u32) -> Self {
        Self {
            port: port.into(),
            baud_rate,
            io: None,
        }
    }

    /// Retrieves the configured port.
    pub fn get_port(&self) -> String {
        self.port.clone()
    }
}

impl Display for Serial {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Serial({})", self.port)
    }
}

impl Debug for Serial {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Serial")
            .field("port", &self.port)
            .field("baud_rate", &self.baud_rate)
            .field("opened", &self.io.is_some())
            .finish()
    }
}

impl HostLink for Serial {
    fn open(&mut self) -> Result<(), Error> {
        let connexion = serialport::new(self.port.clone(), self.baud_rate)
            .data_bits(DataBits::Eight)
            .parity(Parity::None)
            .stop_bits(StopBits::One)
            .flow_control(FlowControl::None)
            .timeout(Duration::from_millis(50))
            .open()?;
        trace!("Serial port is now opened: {:?}", connexion);

        self.io = Some(connexion);

        Ok(())
    }

    fn close(&mut self) -> Result<(), Error> {
        self.io = None;
        Ok(())
    }

    fn set_timeout(&mut self, duration: Duration) -> Result<(), Error> {
        self.io
            .as_mut()
            .ok_or(LinkNotOpen)?
            .set_timeout(duration)?;
        Ok(())
    }

    fn bytes_available(&mut self) -> Result<usize, Error> {
        let count = self.io.as_mut().ok_or(LinkNotOpen)?.bytes_to_read()?;
        Ok(count as usize)
    }

    /// Reads from the internal connection. A read timeout is reported as
    /// zero bytes read, not as an error, so the poll loop can carry on.
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Error> {
        let port = self.io.as_mut().ok_or(LinkNotOpen)?;
        match port.read(buf) {
            Ok(count) => Ok(count),
            Err(error) if error.kind() == std::io::ErrorKind::TimedOut => Ok(0),
            Err(error) => Err(error.into()),
        }
    }

    fn write_all(&mut self, buf: &[u8]) -> Result<(), Error> {
        self.io.as_mut().ok_or(LinkNotOpen)?.write_all(buf)?;
        Ok(())
    }
}

impl From<serialport::Error> for Error {
    fn from(value: serialport::Error) -> Self {
        std::io::Error::from(value).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_serial_link() {
        let link = Serial::new("/dev/ttyACM0", 115_200);
        assert_eq!(link.get_port(), "/dev/ttyACM0");
        assert!(link.io.is_none());
    }

    #[test]
    fn test_unopened_link_errors() {
        let mut link = Serial::new("/dev/ttyACM0", 115_200);

        assert!(link.bytes_available().is_err());
        assert!(link.read(&mut [0; 4]).is_err());
        assert!(link.write_all(&[1, 2, 3]).is_err());
        assert!(link.set_timeout(Duration::from_millis(10)).is_err());
        assert_eq!(
            link.write_line("S,1").unwrap_err().to_string(),
            "Link has not been opened."
        );

        // Closing a never-opened link is fine.
        assert!(link.close().is_ok());
    }

    #[test]
    fn test_from_serial_error() {
        let serial_error = serialport::Error {
            kind: serialport::ErrorKind::Unknown,
            description: String::from("test error"),
        };
        let custom_error: Error = serial_error.into();
        assert_eq!(custom_error.to_string(), "Link error: test error.");

        let serial_error = serialport::Error {
            kind: serialport::ErrorKind::Io(std::io::ErrorKind::NotFound),
            description: String::from("IO error"),
        };
        let custom_error: Error = serial_error.into();
        assert_eq!(
            custom_error.to_string(),
            "Link error: Port not found or already in use."
        );
    }

    #[test]
    fn test_display_serial_link() {
        let link = Serial::new("/dev/ttyACM0", 115_200);
        assert_eq!(format!("{}", link), "Serial(/dev/ttyACM0)");
    }
}
