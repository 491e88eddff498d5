//! The channel registry, the value mapper and the motion controller.
//!
//! [`GaugeBank`] owns all per-channel state. A host value (0-100) is mapped
//! onto a channel's calibrated pulse range, then the needle is swept there in
//! fixed-size steps with a fixed inter-step pause: constant angular velocity,
//! which reads as a smooth sweep on an analog dial. While a sweep runs
//! nothing else happens - sweeps are short and commands are infrequent, so
//! the loop tolerates the stall.

use std::time::Duration;

use log::trace;

use crate::config::{ChannelConfig, GAUGE_COUNT};
use crate::errors::Error;
use crate::hardware::PulseDriver;
use crate::protocol::Command;
use crate::utils::Range;

/// Physical PCA9685 channel 0 is reserved on the deck board; logical gauge
/// `i` drives physical channel `i + 1`.
const CHANNEL_OFFSET: u8 = 1;

/// One gauge needle: calibration bounds plus the last commanded pulse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Channel {
    pulse_range: Range<u16>,
    current: u16,
}

impl Channel {
    fn new(pulse_range: Range<u16>) -> Self {
        let pulse_range = pulse_range.normalized();
        Self {
            pulse_range,
            current: pulse_range.start,
        }
    }

    /// Last commanded pulse. Always within the calibration bounds.
    pub fn current(&self) -> u16 {
        self.current
    }

    pub fn pulse_range(&self) -> Range<u16> {
        self.pulse_range
    }
}

/// The six-channel registry and its motion settings.
#[derive(Debug)]
pub struct GaugeBank {
    channels: [Channel; GAUGE_COUNT],
    step: u16,
    step_delay: Duration,
}

impl GaugeBank {
    pub fn new(
        configs: &[ChannelConfig; GAUGE_COUNT],
        step: u16,
        step_delay: Duration,
    ) -> Self {
        Self {
            channels: std::array::from_fn(|index| Channel::new(configs[index].pulse_range)),
            step: step.max(1),
            step_delay,
        }
    }

    pub fn channel(&self, index: usize) -> &Channel {
        &self.channels[index]
    }

    /// Maps a raw host value onto the channel's calibrated pulse range.
    ///
    /// Pure: clamps `raw` to 0-100, then interpolates linearly with integer
    /// arithmetic (widened to avoid overflow, division truncated). The result
    /// always lies within the channel's bounds.
    pub fn pulse_for(&self, index: usize, raw: i32) -> u16 {
        let range = self.channels[index].pulse_range;
        let raw = raw.clamp(0, 100) as u32;
        let span = u32::from(range.end - range.start);
        range.start + (span * raw / 100) as u16
    }

    /// Sweeps one channel to `target`, one step at a time, pausing between
    /// steps. Blocks until the needle settles.
    ///
    /// The target is clamped into the channel's bounds here too, so the
    /// method is safe to call directly with an unmapped value. Calling with
    /// the current position performs zero driver writes.
    pub fn move_to(
        &mut self,
        driver: &mut dyn PulseDriver,
        index: usize,
        target: u16,
    ) -> Result<(), Error> {
        let channel = &mut self.channels[index];
        let target = channel.pulse_range.clamp(target);
        if target == channel.current {
            return Ok(());
        }
        trace!("gauge {}: sweep {} -> {}", index, channel.current, target);

        while channel.current != target {
            // Advance by one step, clamped to land exactly on the target.
            channel.current = if target > channel.current {
                target.min(channel.current.saturating_add(self.step))
            } else {
                target.max(channel.current.saturating_sub(self.step))
            };
            driver.set_pulse(index as u8 + CHANNEL_OFFSET, channel.current)?;
            if !self.step_delay.is_zero() {
                std::thread::sleep(self.step_delay);
            }
        }
        Ok(())
    }

    /// Applies one host command: channels move strictly in index order, each
    /// fully settled before the next begins.
    pub fn apply(&mut self, driver: &mut dyn PulseDriver, command: &Command) -> Result<(), Error> {
        for index in 0..GAUGE_COUNT {
            let target = self.pulse_for(index, command.values[index]);
            self.move_to(driver, index, target)?;
        }
        Ok(())
    }

    /// Writes every channel's resting pulse out once, parking the needles at
    /// a known position on startup.
    pub fn park(&mut self, driver: &mut dyn PulseDriver) -> Result<(), Error> {
        for (index, channel) in self.channels.iter().enumerate() {
            driver.set_pulse(index as u8 + CHANNEL_OFFSET, channel.current)?;
        }
        Ok(())
    }
}
