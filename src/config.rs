//! Deck configuration: link settings, bus wiring and per-gauge calibration.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::Error;
use crate::utils::Range;

/// Number of gauges on the deck.
pub const GAUGE_COUNT: usize = 6;

/// Gauge names, in channel order. Matches the command field order expected
/// from the host (`U,weather,temp,water,stand,event,commute`).
pub const GAUGE_NAMES: [&str; GAUGE_COUNT] =
    ["weather", "temp", "water", "stand", "event", "commute"];

/// Calibration for one gauge needle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelConfig {
    pub name: String,
    /// Servo pulse bounds in PCA9685 ticks (12-bit, 0-4095).
    pub pulse_range: Range<u16>,
}

impl ChannelConfig {
    fn new(name: &str) -> Self {
        Self {
            name: String::from(name),
            // 600-2400us at 50Hz, in 4096ths of the 20ms frame.
            pulse_range: Range::from([123, 491]),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Serial device connected to the host.
    pub serial_port: String,
    pub baud_rate: u32,
    /// I2C bus number the PCA9685 sits on.
    pub i2c_bus: u8,
    pub i2c_address: u8,
    /// GPIO (BCM numbering) of the water button, pull-up wired.
    pub button_pin: u8,
    /// GPIO (BCM numbering) of the sit/stand switch, pull-up wired.
    pub switch_pin: u8,
    /// Ticks added per motion step during a sweep.
    pub step_ticks: u16,
    /// Pause between motion steps, in milliseconds.
    pub step_delay_ms: u64,
    pub channels: [ChannelConfig; GAUGE_COUNT],
}

impl Default for Config {
    fn default() -> Self {
        Self {
            serial_port: String::from("/dev/ttyAMA0"),
            baud_rate: 115_200,
            i2c_bus: 1,
            i2c_address: 0x40,
            button_pin: 17,
            switch_pin: 27,
            step_ticks: 4,
            step_delay_ms: 3,
            channels: std::array::from_fn(|index| ChannelConfig::new(GAUGE_NAMES[index])),
        }
    }
}

impl Config {
    /// Loads a configuration from a JSON file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let content = fs::read_to_string(&path).map_err(|error| Error::ConfigError {
            info: format!("{}: {}", path.as_ref().display(), error),
        })?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Writes the configuration as pretty JSON, for bootstrapping a deck.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), Error> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(&path, content).map_err(|error| Error::ConfigError {
            info: format!("{}: {}", path.as_ref().display(), error),
        })?;
        Ok(())
    }
}

impl From<serde_json::Error> for Error {
    fn from(value: serde_json::Error) -> Self {
        Self::ConfigError {
            info: value.to_string(),
        }
    }
}
