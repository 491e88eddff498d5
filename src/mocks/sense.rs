use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::errors::Error;
use crate::hardware::DigitalSense;

/// [`DigitalSense`] whose level is set by the test.
#[derive(Debug, Clone, Default)]
pub struct MockSense {
    grounded: Arc<AtomicBool>,
}

impl MockSense {
    pub fn grounded(initial: bool) -> Self {
        Self {
            grounded: Arc::new(AtomicBool::new(initial)),
        }
    }

    pub fn set_grounded(&self, grounded: bool) {
        self.grounded.store(grounded, Ordering::SeqCst);
    }
}

impl DigitalSense for MockSense {
    fn is_grounded(&mut self) -> Result<bool, Error> {
        Ok(self.grounded.load(Ordering::SeqCst))
    }
}
