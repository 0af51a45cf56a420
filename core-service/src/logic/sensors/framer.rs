//! Line Framer - turns a serial byte stream into complete lines
//!
//! Serial reads return whatever bytes arrived before the timeout, which may
//! end mid-packet. Bytes are kept until the terminating `\n` shows up. A line
//! longer than the limit is discarded up to its next newline.

/// Byte accumulator yielding complete lines
#[derive(Debug)]
pub struct LineFramer {
    buffer: Vec<u8>,
    max_line: usize,
    overflowing: bool,
    discarded: u64,
}

impl LineFramer {
    pub fn new(max_line: usize) -> Self {
        Self {
            buffer: Vec::with_capacity(max_line),
            max_line,
            overflowing: false,
            discarded: 0,
        }
    }

    /// Feed raw bytes, returning every line completed by them
    pub fn push(&mut self, bytes: &[u8]) -> Vec<String> {
        let mut lines = Vec::new();

        for &byte in bytes {
            if byte == b'\n' {
                if self.overflowing {
                    self.overflowing = false;
                } else {
                    lines.push(String::from_utf8_lossy(&self.buffer).into_owned());
                }
                self.buffer.clear();
                continue;
            }

            if self.overflowing {
                continue;
            }

            if self.buffer.len() >= self.max_line {
                log::debug!("Discarding over-long serial line ({} bytes)", self.buffer.len());
                self.buffer.clear();
                self.overflowing = true;
                self.discarded += 1;
                continue;
            }

            self.buffer.push(byte);
        }

        lines
    }

    /// Bytes waiting for a newline
    pub fn pending(&self) -> usize {
        self.buffer.len()
    }

    /// Over-long lines thrown away since the last call
    pub fn take_discarded(&mut self) -> u64 {
        std::mem::take(&mut self.discarded)
    }

    /// Drop any partial line (e.g. after a reconnect)
    pub fn reset(&mut self) {
        self.buffer.clear();
        self.overflowing = false;
    }
}
