//! Sensors Module - environmental readings for the dashboard and model
//!
//! Sources (mock, serial) produce `SensorReadings`; the hub and poller move
//! them into the shared `SensorState`.

pub mod readings;
pub mod packet;
pub mod framer;
pub mod mock;
pub mod serial;
pub mod state;
pub mod poller;
pub mod hub;

// Re-export common types
pub use readings::SensorReadings;
pub use mock::MockSensor;
pub use serial::{SerialConfig, SerialSensor};
pub use state::{SensorSnapshot, SensorState};
pub use poller::SensorPoller;
pub use hub::{HubMode, SensorHub};

// ============================================================================
// ERROR HANDLING
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum SensorError {
    #[error("failed to open serial port {port}: {source}")]
    Open {
        port: String,
        #[source]
        source: serialport::Error,
    },

    #[error("serial I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("sensor disconnected")]
    Disconnected,
}

// ============================================================================
// SENSOR SOURCE TRAIT
// ============================================================================

/// Anything that can produce sensor readings
pub trait SensorSource: Send {
    /// Short label used in logs and the status endpoint
    fn name(&self) -> &'static str;

    /// Produce the next reading; `Ok(None)` means nothing new this cycle
    fn read(&mut self) -> Result<Option<SensorReadings>, SensorError>;

    /// Malformed packets skipped since the last call
    fn take_dropped(&mut self) -> u64 {
        0
    }

    fn is_connected(&self) -> bool {
        true
    }
}
