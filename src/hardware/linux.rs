//! `rppal`-backed implementations of the hardware seams, for the Linux
//! single-board computer the deck runs on.

use log::trace;
use rppal::gpio::{Gpio, InputPin};
use rppal::i2c::I2c;

use crate::errors::Error;
use crate::hardware::{DigitalSense, I2cBus};

/// [`I2cBus`] over a Linux I2C device, locked to one peripheral address.
#[derive(Debug)]
pub struct LinuxI2c {
    i2c: I2c,
}

impl LinuxI2c {
    /// Opens `/dev/i2c-<bus>` and selects the peripheral at `address`.
    pub fn open(bus: u8, address: u8) -> Result<Self, Error> {
        let mut i2c = I2c::with_bus(bus)?;
        i2c.set_slave_address(u16::from(address))?;
        trace!("I2C bus {} opened, peripheral at 0x{:02X}", bus, address);
        Ok(Self { i2c })
    }
}

impl I2cBus for LinuxI2c {
    fn write_register(&mut self, register: u8, data: &[u8]) -> Result<(), Error> {
        self.i2c.block_write(register, data)?;
        Ok(())
    }
}

/// [`DigitalSense`] over a GPIO pin with the internal pull-up enabled.
#[derive(Debug)]
pub struct LinuxPin {
    pin: InputPin,
}

impl LinuxPin {
    /// Claims GPIO `number` (BCM numbering) as a pull-up input.
    pub fn open_pullup(number: u8) -> Result<Self, Error> {
        let pin = Gpio::new()?.get(number)?.into_input_pullup();
        trace!("GPIO {} claimed as pull-up input", number);
        Ok(Self { pin })
    }
}

impl DigitalSense for LinuxPin {
    fn is_grounded(&mut self) -> Result<bool, Error> {
        Ok(self.pin.is_low())
    }
}

impl From<rppal::i2c::Error> for Error {
    fn from(value: rppal::i2c::Error) -> Self {
        Self::HardwareError {
            info: value.to_string(),
        }
    }
}

impl From<rppal::gpio::Error> for Error {
    fn from(value: rppal::gpio::Error) -> Self {
        Self::HardwareError {
            info: value.to_string(),
        }
    }
}
