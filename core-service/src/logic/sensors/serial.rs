//! Serial Sensor - packets from the sensor board over a serial link
//!
//! The board prints one packet per line (see `packet.rs`). Reads are bounded
//! by the port timeout; a timeout is simply "nothing new this cycle". When the
//! link fails the port is dropped and reopened on a later read, no more often
//! than the reconnect interval.

use std::io::{self, Read};
use std::time::{Duration, Instant};

use serialport::SerialPort;

use super::framer::LineFramer;
use super::packet::parse_packet;
use super::readings::SensorReadings;
use super::{SensorError, SensorSource};
use crate::constants::{
    DEFAULT_RECONNECT_MS, DEFAULT_SERIAL_BAUD, DEFAULT_SERIAL_PORT, DEFAULT_SERIAL_TIMEOUT_MS,
    MAX_PACKET_LINE,
};

// ============================================================================
// CONFIG
// ============================================================================

#[derive(Debug, Clone)]
pub struct SerialConfig {
    pub port: String,
    pub baud_rate: u32,
    pub timeout: Duration,
    pub reconnect_interval: Duration,
}

impl Default for SerialConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_SERIAL_PORT.to_string(),
            baud_rate: DEFAULT_SERIAL_BAUD,
            timeout: Duration::from_millis(DEFAULT_SERIAL_TIMEOUT_MS),
            reconnect_interval: Duration::from_millis(DEFAULT_RECONNECT_MS),
        }
    }
}

// ============================================================================
// PACKET READER
// ============================================================================

/// Frames and parses packets from any byte reader
#[derive(Debug)]
pub struct PacketReader<R> {
    reader: R,
    framer: LineFramer,
    dropped: u64,
}

impl<R: Read> PacketReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            framer: LineFramer::new(MAX_PACKET_LINE),
            dropped: 0,
        }
    }

    /// Read once; return the newest valid packet completed by this read
    pub fn poll(&mut self) -> io::Result<Option<SensorReadings>> {
        let mut buf = [0u8; 256];

        let n = match self.reader.read(&mut buf) {
            Ok(n) => n,
            Err(e) if is_transient(&e) => return Ok(None),
            Err(e) => return Err(e),
        };

        let lines = self.framer.push(&buf[..n]);
        self.dropped += self.framer.take_discarded();

        let mut latest = None;
        for line in lines {
            match parse_packet(&line) {
                Ok(readings) => latest = Some(readings),
                Err(e) => {
                    log::debug!("Dropping sensor packet {:?}: {}", line, e);
                    self.dropped += 1;
                }
            }
        }

        Ok(latest)
    }

    /// Packets rejected since the last call
    pub fn take_dropped(&mut self) -> u64 {
        std::mem::take(&mut self.dropped)
    }
}

fn is_transient(e: &io::Error) -> bool {
    matches!(
        e.kind(),
        io::ErrorKind::TimedOut | io::ErrorKind::WouldBlock | io::ErrorKind::Interrupted
    )
}

// ============================================================================
// SERIAL SENSOR
// ============================================================================

/// Sensor source backed by a serial port
pub struct SerialSensor {
    config: SerialConfig,
    reader: Option<PacketReader<Box<dyn SerialPort>>>,
    last_attempt: Option<Instant>,
    dropped: u64,
}

impl SerialSensor {
    /// Create without touching the port; the first `read` opens it
    pub fn new(config: SerialConfig) -> Self {
        Self {
            config,
            reader: None,
            last_attempt: None,
            dropped: 0,
        }
    }

    fn reconnect_due(&self) -> bool {
        self.last_attempt
            .map(|at| at.elapsed() >= self.config.reconnect_interval)
            .unwrap_or(true)
    }

    fn open(&mut self) -> Result<(), SensorError> {
        self.last_attempt = Some(Instant::now());

        let port = serialport::new(&self.config.port, self.config.baud_rate)
            .timeout(self.config.timeout)
            .open()
            .map_err(|source| SensorError::Open {
                port: self.config.port.clone(),
                source,
            })?;

        log::info!("Serial sensor connected on {} @ {} baud", self.config.port, self.config.baud_rate);
        self.reader = Some(PacketReader::new(port));
        Ok(())
    }
}

impl SensorSource for SerialSensor {
    fn name(&self) -> &'static str {
        "serial"
    }

    fn read(&mut self) -> Result<Option<SensorReadings>, SensorError> {
        if self.reader.is_none() {
            if !self.reconnect_due() {
                return Ok(None);
            }
            self.open()?;
        }

        let Some(reader) = self.reader.as_mut() else {
            return Ok(None);
        };

        let result = reader.poll();
        self.dropped += reader.take_dropped();

        match result {
            Ok(readings) => Ok(readings),
            Err(e) => {
                log::warn!("Serial link on {} failed: {}", self.config.port, e);
                self.reader = None;
                Err(SensorError::Io(e))
            }
        }
    }

    fn take_dropped(&mut self) -> u64 {
        std::mem::take(&mut self.dropped)
    }

    fn is_connected(&self) -> bool {
        self.reader.is_some()
    }
}
