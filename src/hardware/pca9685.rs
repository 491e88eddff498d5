// ***********
// All information are relative to PCA9685 datasheets:
// https://www.digikey.jp/htmldatasheets/production/2459480/0/0/1/pca9685.html

use log::trace;

use crate::errors::{Error, HardwareError, Unknown};
use crate::hardware::{I2cBus, PulseDriver};

/// 16-channel, 12-bit PWM driver chip, addressed over I2C.
#[derive(Debug)]
pub struct Pca9685 {
    bus: Box<dyn I2cBus>,
    // Frequency in Hz (the deck runs its servos at 50Hz).
    frequency: u16,
}

impl Pca9685 {
    // Registers.
    const MODE1: u8 = 0x00;
    const PRESCALE: u8 = 0xFE;
    const BASE: u8 = 0x06;
    // Magic bits.
    const SLEEP: u8 = 0x10;
    const RESET: u8 = 0x00;
    const RESTART: u8 = 0x80;
    const AUTO_INCREMENT: u8 = 0x20;
    // PCA9685 physical constraints.
    const MIN_FREQUENCY: u16 = 24; // Minimum frequency in Hz
    const MAX_FREQUENCY: u16 = 1526; // Maximum frequency in Hz
    const OSC_CLOCK: f32 = 25_000_000.0; // PCA9685 clock frequency

    /// Pulse resolution: ticks per PWM frame.
    pub const RESOLUTION: u16 = 4096;
    /// Number of output channels on the chip.
    pub const CHANNELS: u8 = 16;

    /// Configures the chip on the given bus at the given PWM frequency.
    pub fn new(bus: Box<dyn I2cBus>, frequency: u16) -> Result<Self, Error> {
        let mut chip = Self { bus, frequency };
        chip.set_frequency(frequency)?;
        Ok(chip)
    }

    // Sets the PWM frequency (in Hz) for the entire PCA9685: from 24 to 1526 Hz.
    pub fn set_frequency(&mut self, frequency: u16) -> Result<(), Error> {
        // Validate frequency range
        if !(Self::MIN_FREQUENCY..=Self::MAX_FREQUENCY).contains(&frequency) {
            return Err(HardwareError {
                info: format!(
                    "Frequency must be between {} and {} Hz",
                    Self::MIN_FREQUENCY,
                    Self::MAX_FREQUENCY
                ),
            });
        };

        self.frequency = frequency;

        // 7.3.1 Mode register 1, MODE1 - Reset / Sleep
        // Sets the register mode to reset, then sleep.
        self.write_to_reg(Self::MODE1, Self::RESET)?;
        self.write_to_reg(Self::MODE1, Self::SLEEP)?;

        // 7.3.5 PWM frequency PRE_SCALE
        // prescale = round((osc_clock / (4096 x rate)) - 1) - with PCA9685 clock at 25Mhz
        let prescale = ((Self::OSC_CLOCK / (4096.0 * f32::from(self.frequency))) + 0.5 - 1.0)
            .clamp(3.0, 255.0) as u8;
        self.write_to_reg(Self::PRESCALE, prescale)?;

        // Wake up and restart in auto-increment mode
        self.write_to_reg(Self::MODE1, Self::RESET)?;
        self.write_to_reg(Self::MODE1, Self::RESTART | Self::AUTO_INCREMENT)?;

        trace!("PCA9685 configured at {}Hz (prescale {})", frequency, prescale);
        Ok(())
    }

    pub fn get_frequency(&self) -> u16 {
        self.frequency
    }

    fn write_to_reg(&mut self, register: u8, value: u8) -> Result<(), Error> {
        self.bus.write_register(register, &[value])
    }
}

impl PulseDriver for Pca9685 {
    /// Writes a square signal on `channel`: ON at tick 0, OFF at `ticks`.
    fn set_pulse(&mut self, channel: u8, ticks: u16) -> Result<(), Error> {
        if channel >= Self::CHANNELS {
            return Err(Unknown {
                info: format!("No such PCA9685 channel: {}", channel),
            });
        }
        let off = ticks.min(Self::RESOLUTION - 1);

        // The registers corresponding to the channel (LEDn_ON_L..LEDn_OFF_H)
        // start at BASE - see table 7 of the datasheet.
        let register = Self::BASE + 4 * channel;
        self.bus.write_register(
            register,
            &[0x00, 0x00, (off & 0xFF) as u8, (off >> 8) as u8],
        )
    }

    /// Puts the oscillator back to sleep, releasing all outputs.
    fn shutdown(&mut self) -> Result<(), Error> {
        self.write_to_reg(Self::MODE1, Self::SLEEP)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mocks::MockI2cBus;

    #[test]
    fn test_initialization_writes_prescale() {
        let bus = MockI2cBus::default();
        let chip = Pca9685::new(Box::new(bus.clone()), 50).unwrap();
        assert_eq!(chip.get_frequency(), 50);

        // 25MHz / (4096 * 50Hz) rounds to prescale 121.
        assert!(bus.writes().contains(&(Pca9685::PRESCALE, vec![121])));
    }

    #[test]
    fn test_set_frequency_outofbound() {
        let bus = MockI2cBus::default();
        let mut chip = Pca9685::new(Box::new(bus), 50).unwrap();

        let result = chip.set_frequency(20);
        assert!(result.is_err());
        assert_eq!(
            result.err().unwrap().to_string(),
            "Hardware error: Frequency must be between 24 and 1526 Hz."
        );

        let result = chip.set_frequency(1600);
        assert!(result.is_err());
    }

    #[test]
    fn test_set_pulse_register_layout() {
        let bus = MockI2cBus::default();
        let mut chip = Pca9685::new(Box::new(bus.clone()), 50).unwrap();

        chip.set_pulse(1, 0x0123).unwrap();

        // Channel 1 starts at register BASE + 4: full ON at 0, OFF at 0x0123.
        let last = bus.writes().last().cloned().unwrap();
        assert_eq!(last, (Pca9685::BASE + 4, vec![0x00, 0x00, 0x23, 0x01]));
    }

    #[test]
    fn test_set_pulse_clamps_to_resolution() {
        let bus = MockI2cBus::default();
        let mut chip = Pca9685::new(Box::new(bus.clone()), 50).unwrap();

        chip.set_pulse(0, 9999).unwrap();
        let last = bus.writes().last().cloned().unwrap();
        assert_eq!(last, (Pca9685::BASE, vec![0x00, 0x00, 0xFF, 0x0F]));
    }

    #[test]
    fn test_set_pulse_unknown_channel() {
        let bus = MockI2cBus::default();
        let mut chip = Pca9685::new(Box::new(bus), 50).unwrap();

        let result = chip.set_pulse(16, 100);
        assert!(result.is_err());
        assert_eq!(
            result.err().unwrap().to_string(),
            "Unknown error: No such PCA9685 channel: 16."
        );
    }

    #[test]
    fn test_shutdown_sleeps_oscillator() {
        let bus = MockI2cBus::default();
        let mut chip = Pca9685::new(Box::new(bus.clone()), 50).unwrap();

        chip.shutdown().unwrap();
        let last = bus.writes().last().cloned().unwrap();
        assert_eq!(last, (Pca9685::MODE1, vec![Pca9685::SLEEP]));
    }
}
