//! Sensor State - the single shared slot holding the latest reading
//!
//! One writer (poller or on-demand sampler), many readers (HTTP handlers).

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use super::readings::SensorReadings;

/// Latest readings plus bookkeeping
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorSnapshot {
    pub readings: SensorReadings,
    pub updated_at: Option<DateTime<Utc>>,
    pub source: String,
    pub connected: bool,
    pub packets_accepted: u64,
    pub packets_dropped: u64,
}

impl SensorSnapshot {
    pub fn empty(source: &str) -> Self {
        Self {
            readings: SensorReadings::zeroed(),
            updated_at: None,
            source: source.to_string(),
            connected: false,
            packets_accepted: 0,
            packets_dropped: 0,
        }
    }
}

/// Shared, lock-protected sensor slot
#[derive(Debug)]
pub struct SensorState {
    inner: RwLock<SensorSnapshot>,
}

impl SensorState {
    pub fn new(source: &str) -> Self {
        Self {
            inner: RwLock::new(SensorSnapshot::empty(source)),
        }
    }

    /// Copy of the full snapshot
    pub fn snapshot(&self) -> SensorSnapshot {
        self.inner.read().clone()
    }

    /// Latest readings (zeroed until the first one arrives)
    pub fn readings(&self) -> SensorReadings {
        self.inner.read().readings
    }

    /// Overwrite the readings in place
    pub fn record(&self, readings: SensorReadings) {
        let mut snapshot = self.inner.write();
        snapshot.readings = readings;
        snapshot.updated_at = Some(Utc::now());
        snapshot.connected = true;
        snapshot.packets_accepted += 1;
    }

    pub fn record_dropped(&self, count: u64) {
        if count > 0 {
            self.inner.write().packets_dropped += count;
        }
    }

    pub fn set_connected(&self, connected: bool) {
        self.inner.write().connected = connected;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_zeroed() {
        let state = SensorState::new("serial");
        let snapshot = state.snapshot();

        assert_eq!(snapshot.readings, SensorReadings::zeroed());
        assert!(snapshot.updated_at.is_none());
        assert!(!snapshot.connected);
        assert_eq!(snapshot.source, "serial");
    }

    #[test]
    fn test_record_overwrites() {
        let state = SensorState::new("mock");
        let first = SensorReadings { temperature: 25.0, ..Default::default() };
        let second = SensorReadings { temperature: 26.5, humidity: 70.0, ..Default::default() };

        state.record(first);
        state.record(second);

        let snapshot = state.snapshot();
        assert_eq!(snapshot.readings, second);
        assert_eq!(snapshot.packets_accepted, 2);
        assert!(snapshot.updated_at.is_some());
    }

    #[test]
    fn test_dropped_keeps_readings() {
        let state = SensorState::new("serial");
        let readings = SensorReadings { water_level: 40.0, ..Default::default() };
        state.record(readings);
        state.record_dropped(3);

        assert_eq!(state.readings(), readings);
        assert_eq!(state.snapshot().packets_dropped, 3);
    }
}
