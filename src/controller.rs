//! The control loop: one single-threaded poll cycle gluing the decoder, the
//! gauges and the input reporters together.
//!
//! Per iteration: sample inputs -> emit events on change -> drain available
//! serial bytes -> on a complete line, decode and apply to all six channels
//! in index order. Events sampled in an iteration always reach the wire
//! before that iteration's command is applied, because sampling comes first
//! in the loop body.

use std::time::Duration;

use log::{info, trace};

use crate::config::Config;
use crate::errors::Error;
use crate::gauges::GaugeBank;
use crate::hardware::{DigitalSense, PulseDriver};
use crate::inputs::{Button, StandSwitch};
use crate::io::HostLink;
use crate::protocol::LineDecoder;

/// Announced once on the link when the controller is up.
pub const READY_BANNER: &str = "GAUGE_PCA9685_READY";
/// Protocol hint for whoever is watching the port.
pub const PROTOCOL_HINT: &str = "Expect: U,weather,temp,water,stand,event,commute";

/// Pause when an iteration had nothing to do, so an idle deck does not spin
/// a core. Short enough to be invisible on the inputs.
const IDLE_SLEEP: Duration = Duration::from_millis(2);

pub struct Controller {
    link: Box<dyn HostLink>,
    driver: Box<dyn PulseDriver>,
    gauges: GaugeBank,
    button: Button,
    switch: StandSwitch,
    decoder: LineDecoder,
}

impl Controller {
    /// Wires a controller from its four collaborators. The link must already
    /// be opened; the driver must already be configured.
    pub fn new(
        config: &Config,
        link: Box<dyn HostLink>,
        driver: Box<dyn PulseDriver>,
        button_pin: Box<dyn DigitalSense>,
        switch_pin: Box<dyn DigitalSense>,
    ) -> Self {
        Self {
            link,
            driver,
            gauges: GaugeBank::new(
                &config.channels,
                config.step_ticks,
                Duration::from_millis(config.step_delay_ms),
            ),
            button: Button::new(button_pin),
            switch: StandSwitch::new(switch_pin),
            decoder: LineDecoder::new(),
        }
    }

    pub fn gauges(&self) -> &GaugeBank {
        &self.gauges
    }

    /// Parks the needles, announces the protocol and reports the switch
    /// baseline. Must run once before the first [`Self::tick`].
    pub fn startup(&mut self) -> Result<(), Error> {
        self.gauges.park(self.driver.as_mut())?;
        self.link.write_line(READY_BANNER)?;
        self.link.write_line(PROTOCOL_HINT)?;

        let baseline = self.switch.initial_report()?;
        self.link.write_line(&baseline.to_line())?;
        info!("controller ready, switch baseline {}", baseline);
        Ok(())
    }

    /// One control-loop iteration. Returns `true` when any byte was consumed
    /// (so the caller knows whether to idle).
    pub fn tick(&mut self) -> Result<bool, Error> {
        // Inputs first: their events must hit the wire before this
        // iteration's command moves anything.
        if let Some(event) = self.button.sample()? {
            self.link.write_line(&event.to_line())?;
        }
        if let Some(event) = self.switch.sample()? {
            self.link.write_line(&event.to_line())?;
        }

        // Drain whatever the host sent since last iteration.
        let mut consumed = false;
        let mut buf = [0u8; 64];
        while self.link.bytes_available()? > 0 {
            let count = self.link.read(&mut buf)?;
            if count == 0 {
                break;
            }
            consumed = true;
            for &byte in &buf[..count] {
                if let Some(command) = self.decoder.push(byte) {
                    trace!("applying {:?}", command.values);
                    self.gauges.apply(self.driver.as_mut(), &command)?;
                }
            }
        }
        Ok(consumed)
    }

    /// Runs the control loop until the link or the bus fails. Malformed
    /// input never ends the loop; only a transport/hardware fault does.
    pub fn run(&mut self) -> Result<(), Error> {
        self.startup()?;
        let result = self.serve();
        // Best effort: release the outputs on the way out.
        let _ = self.driver.shutdown();
        result
    }

    fn serve(&mut self) -> Result<(), Error> {
        loop {
            if !self.tick()? {
                std::thread::sleep(IDLE_SLEEP);
            }
        }
    }
}
