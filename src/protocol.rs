//! Line protocol decoder for host commands.
//!
//! The host sends one update per line:
//!
//! ```text
//! U,<weather>,<temp>,<water>,<stand>,<event>,<commute>\n
//! ```
//!
//! Six integer fields, each meant as a 0-100 percentage (clamping happens in
//! the mapper, not here). Malformed input is dropped silently: the protocol
//! has no negative acknowledgement, so a bad line simply produces no motion.

use log::{debug, trace};

/// Number of integer fields in a command.
pub const FIELD_COUNT: usize = 6;

/// Longest raw line accepted before the buffer is force-reset. Bounds memory
/// against an unterminated or garbage stream.
pub const MAX_LINE_LEN: usize = 200;

const PREFIX: &str = "U,";

/// One parsed host update. Ephemeral: built from a line, applied, discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Command {
    pub values: [i32; FIELD_COUNT],
}

impl Command {
    /// Decodes a complete line (terminator stripped).
    ///
    /// Returns `None` when the line does not start with `U,`, does not hold
    /// exactly six comma-delimited fields, or holds an empty field. A
    /// non-numeric field is not an error: it parses as zero.
    pub fn decode(line: &str) -> Option<Self> {
        let rest = line.strip_prefix(PREFIX)?;

        let mut values = [0i32; FIELD_COUNT];
        let mut tokens = rest.split(',');
        for value in &mut values {
            let token = tokens.next()?;
            if token.is_empty() {
                return None;
            }
            *value = token.parse().unwrap_or(0);
        }
        // Exactly six fields: trailing content fails the whole line.
        if tokens.next().is_some() {
            return None;
        }
        Some(Self { values })
    }
}

/// Accumulates serial bytes into lines and decodes terminated commands.
#[derive(Debug, Default)]
pub struct LineDecoder {
    buffer: String,
}

impl LineDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds one byte; returns a command when this byte terminated a valid
    /// line. The buffer is cleared after every terminator, whatever the
    /// decode outcome.
    pub fn push(&mut self, byte: u8) -> Option<Command> {
        match byte {
            b'\r' => None,
            b'\n' => {
                let command = Command::decode(&self.buffer);
                match command {
                    Some(command) => trace!("decoded command: {:?}", command.values),
                    None if !self.buffer.is_empty() => {
                        debug!("dropped malformed line: {:?}", self.buffer);
                    }
                    None => {}
                }
                self.buffer.clear();
                command
            }
            byte => {
                if self.buffer.len() >= MAX_LINE_LEN {
                    trace!("line exceeded {} chars, buffer reset", MAX_LINE_LEN);
                    self.buffer.clear();
                } else {
                    self.buffer.push(byte as char);
                }
                None
            }
        }
    }
}
