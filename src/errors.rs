use log::error;
use snafu::Snafu;

pub use crate::errors::Error::*;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum Error {
    /// Link error: {info}.
    LinkError { info: String },
    /// Link has not been opened.
    LinkNotOpen,
    /// Hardware error: {info}.
    HardwareError { info: String },
    /// Configuration error: {info}.
    ConfigError { info: String },
    /// Unknown error: {info}.
    Unknown { info: String },
}

impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        error!("std::io error {:?}", error);
        let info = match error.kind() {
            std::io::ErrorKind::NotFound => String::from("Port not found or already in use"),
            std::io::ErrorKind::PermissionDenied => String::from("Link connection lost"),
            _ => error.to_string(),
        };
        Self::LinkError { info }
    }
}

#[cfg(test)]
mod tests {
    use std::io;

    use super::*;

    #[test]
    fn test_error_display() {
        let link_error = LinkError {
            info: "I/O error message".to_string(),
        };
        assert_eq!(format!("{}", link_error), "Link error: I/O error message.");

        let not_open = LinkNotOpen;
        assert_eq!(format!("{}", not_open), "Link has not been opened.");

        let hardware_error = HardwareError {
            info: "bus fault".to_string(),
        };
        assert_eq!(format!("{}", hardware_error), "Hardware error: bus fault.");

        let config_error = ConfigError {
            info: "bad json".to_string(),
        };
        assert_eq!(format!("{}", config_error), "Configuration error: bad json.");
    }

    #[test]
    fn test_from_io_error() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let error: Error = io_error.into();
        assert_eq!(
            format!("{}", error),
            "Link error: Port not found or already in use."
        );

        let io_error = io::Error::new(io::ErrorKind::PermissionDenied, "denied");
        let error: Error = io_error.into();
        assert_eq!(format!("{}", error), "Link error: Link connection lost.");
    }
}
