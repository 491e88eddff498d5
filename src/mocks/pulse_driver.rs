use std::sync::{Arc, Mutex};

use crate::errors::Error;
use crate::hardware::PulseDriver;

/// [`PulseDriver`] that records every pulse write.
#[derive(Debug, Clone, Default)]
pub struct MockPulseDriver {
    writes: Arc<Mutex<Vec<(u8, u16)>>>,
}

impl MockPulseDriver {
    /// All `(channel, ticks)` writes so far, in order.
    pub fn writes(&self) -> Vec<(u8, u16)> {
        self.writes.lock().unwrap().clone()
    }

    pub fn write_count(&self) -> usize {
        self.writes.lock().unwrap().len()
    }

    /// Last pulse written to a given physical channel, if any.
    pub fn last_for_channel(&self, channel: u8) -> Option<u16> {
        self.writes
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|&&(written, _)| written == channel)
            .map(|&(_, ticks)| ticks)
    }

    pub fn clear(&self) {
        self.writes.lock().unwrap().clear();
    }
}

impl PulseDriver for MockPulseDriver {
    fn set_pulse(&mut self, channel: u8, ticks: u16) -> Result<(), Error> {
        self.writes.lock().unwrap().push((channel, ticks));
        Ok(())
    }
}
