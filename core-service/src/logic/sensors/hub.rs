//! Sensor Hub - what request handlers read sensors through
//!
//! Two modes:
//! - on-demand: every `current()` samples the source (mock board, no
//!   background task)
//! - polled: a `SensorPoller` owns the source; `current()` returns the
//!   latest stored readings

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;

use super::poller::{poll_once, SensorPoller};
use super::readings::SensorReadings;
use super::state::{SensorSnapshot, SensorState};
use super::SensorSource;

/// How readings reach the shared state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HubMode {
    OnDemand,
    Polled,
}

pub struct SensorHub {
    state: Arc<SensorState>,
    on_demand: Option<Mutex<Box<dyn SensorSource>>>,
    poller: Mutex<Option<SensorPoller>>,
}

impl SensorHub {
    /// Sample `source` on every request
    pub fn on_demand(source: Box<dyn SensorSource>) -> Self {
        Self {
            state: Arc::new(SensorState::new(source.name())),
            on_demand: Some(Mutex::new(source)),
            poller: Mutex::new(None),
        }
    }

    /// Hand `source` to a background poller
    pub fn polled(source: Box<dyn SensorSource>, interval: Duration) -> std::io::Result<Self> {
        let state = Arc::new(SensorState::new(source.name()));
        let poller = SensorPoller::spawn(source, state.clone(), interval)?;

        Ok(Self {
            state,
            on_demand: None,
            poller: Mutex::new(Some(poller)),
        })
    }

    /// Hub over an existing state with no producer (tests, fixed readings)
    pub fn from_state(state: Arc<SensorState>) -> Self {
        Self {
            state,
            on_demand: None,
            poller: Mutex::new(None),
        }
    }

    pub fn mode(&self) -> HubMode {
        if self.on_demand.is_some() {
            HubMode::OnDemand
        } else {
            HubMode::Polled
        }
    }

    /// Latest readings, sampling first in on-demand mode
    pub fn current(&self) -> SensorReadings {
        if let Some(source) = &self.on_demand {
            let mut source = source.lock();
            poll_once(source.as_mut(), &self.state);
        }

        self.state.readings()
    }

    /// Full snapshot without triggering a sample
    pub fn snapshot(&self) -> SensorSnapshot {
        self.state.snapshot()
    }

    /// Stop the background poller, if any
    pub fn shutdown(&self) {
        if let Some(mut poller) = self.poller.lock().take() {
            poller.stop();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::sensors::MockSensor;

    #[test]
    fn test_on_demand_samples_each_call() {
        let hub = SensorHub::on_demand(Box::new(MockSensor::seeded(11)));
        assert_eq!(hub.mode(), HubMode::OnDemand);

        hub.current();
        hub.current();

        assert_eq!(hub.snapshot().packets_accepted, 2);
        assert_eq!(hub.snapshot().source, "mock");
    }

    #[test]
    fn test_idle_hub_returns_zeroed() {
        let hub = SensorHub::from_state(Arc::new(SensorState::new("serial")));
        assert_eq!(hub.current(), SensorReadings::zeroed());
        hub.shutdown();
    }

    #[test]
    fn test_polled_hub_shutdown() {
        let hub = SensorHub::polled(Box::new(MockSensor::seeded(5)), Duration::from_millis(10)).unwrap();
        assert_eq!(hub.mode(), HubMode::Polled);
        hub.shutdown();
        hub.shutdown();
    }
}
