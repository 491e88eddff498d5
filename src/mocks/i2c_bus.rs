use std::sync::{Arc, Mutex};

use crate::errors::Error;
use crate::hardware::I2cBus;

/// [`I2cBus`] that records every register write.
#[derive(Debug, Clone, Default)]
pub struct MockI2cBus {
    writes: Arc<Mutex<Vec<(u8, Vec<u8>)>>>,
}

impl MockI2cBus {
    /// All `(register, data)` writes so far, in order.
    pub fn writes(&self) -> Vec<(u8, Vec<u8>)> {
        self.writes.lock().unwrap().clone()
    }
}

impl I2cBus for MockI2cBus {
    fn write_register(&mut self, register: u8, data: &[u8]) -> Result<(), Error> {
        self.writes.lock().unwrap().push((register, data.to_vec()));
        Ok(())
    }
}
