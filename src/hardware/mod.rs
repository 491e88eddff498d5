//! Hardware seams between the control logic and the physical buses.
//!
//! The control loop never talks to a bus directly: it goes through the three
//! traits below so the whole crate runs (and is tested) without a board
//! attached. The `linux` backends implement them over `rppal`.

mod linux;
mod pca9685;

use std::fmt::Debug;

pub use linux::{LinuxI2c, LinuxPin};
pub use pca9685::Pca9685;

use crate::errors::Error;

/// Raw register access to an I2C peripheral at a fixed address.
pub trait I2cBus: Debug {
    /// Writes `data` to the peripheral starting at `register`.
    fn write_register(&mut self, register: u8, data: &[u8]) -> Result<(), Error>;
}

/// The single operation the gauges need from the PWM chip: set a channel's
/// pulse width, in 12-bit ticks (0-4095).
pub trait PulseDriver: Debug {
    fn set_pulse(&mut self, channel: u8, ticks: u16) -> Result<(), Error>;

    /// Releases the outputs on shutdown. Optional; defaults to a no-op.
    fn shutdown(&mut self) -> Result<(), Error> {
        Ok(())
    }
}

/// A pull-up digital input: inactive reads high, active reads grounded.
pub trait DigitalSense: Debug {
    /// Returns `true` when the contact is grounded (active).
    fn is_grounded(&mut self) -> Result<bool, Error>;
}
