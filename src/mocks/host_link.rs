use std::collections::VecDeque;
use std::fmt::{Display, Formatter};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::errors::Error;
use crate::io::HostLink;

#[derive(Debug, Default)]
struct Inner {
    connected: bool,
    input: VecDeque<u8>,
    output: Vec<u8>,
}

/// [`HostLink`] whose input is scripted and whose output is captured.
#[derive(Debug, Clone, Default)]
pub struct MockHostLink {
    inner: Arc<Mutex<Inner>>,
}

impl MockHostLink {
    /// Queues bytes to be "received" by the controller.
    pub fn feed(&self, bytes: &[u8]) {
        self.inner.lock().unwrap().input.extend(bytes.iter().copied());
    }

    /// Everything written so far, split into lines.
    pub fn output_lines(&self) -> Vec<String> {
        let inner = self.inner.lock().unwrap();
        String::from_utf8_lossy(&inner.output)
            .lines()
            .map(str::to_string)
            .collect()
    }

    pub fn is_connected(&self) -> bool {
        self.inner.lock().unwrap().connected
    }
}

impl Display for MockHostLink {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "MockHostLink")
    }
}

impl HostLink for MockHostLink {
    fn open(&mut self) -> Result<(), Error> {
        self.inner.lock().unwrap().connected = true;
        Ok(())
    }

    fn close(&mut self) -> Result<(), Error> {
        self.inner.lock().unwrap().connected = false;
        Ok(())
    }

    fn set_timeout(&mut self, _: Duration) -> Result<(), Error> {
        Ok(())
    }

    fn bytes_available(&mut self) -> Result<usize, Error> {
        Ok(self.inner.lock().unwrap().input.len())
    }

    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Error> {
        let mut inner = self.inner.lock().unwrap();
        let mut count = 0;
        for slot in buf.iter_mut() {
            match inner.input.pop_front() {
                Some(byte) => {
                    *slot = byte;
                    count += 1;
                }
                None => break,
            }
        }
        Ok(count)
    }

    fn write_all(&mut self, buf: &[u8]) -> Result<(), Error> {
        self.inner.lock().unwrap().output.extend_from_slice(buf);
        Ok(())
    }
}
