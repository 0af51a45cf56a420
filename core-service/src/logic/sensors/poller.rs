//! Sensor Poller - background thread feeding the shared state
//!
//! Runs on a dedicated OS thread because serial reads block. Failures are
//! logged and the state keeps whatever it last had.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use super::state::SensorState;
use super::SensorSource;

/// Handle to a running poller thread
pub struct SensorPoller {
    running: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl SensorPoller {
    /// Start polling `source` every `interval`
    pub fn spawn(
        mut source: Box<dyn SensorSource>,
        state: Arc<SensorState>,
        interval: Duration,
    ) -> std::io::Result<Self> {
        let running = Arc::new(AtomicBool::new(true));
        let flag = running.clone();

        let handle = thread::Builder::new()
            .name(format!("sensor-poller-{}", source.name()))
            .spawn(move || {
                log::info!("Sensor poller started ({}, every {:?})", source.name(), interval);

                while flag.load(Ordering::Relaxed) {
                    poll_once(source.as_mut(), &state);
                    sleep_while_running(&flag, interval);
                }

                log::info!("Sensor poller stopped");
            })?;

        Ok(Self {
            running,
            handle: Some(handle),
        })
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Relaxed)
    }

    /// Signal the thread and wait for it to finish
    pub fn stop(&mut self) {
        self.running.store(false, Ordering::Relaxed);

        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                log::error!("Sensor poller thread panicked");
            }
        }
    }
}

impl Drop for SensorPoller {
    fn drop(&mut self) {
        self.stop();
    }
}

/// One poll cycle: read, record, account for drops
pub fn poll_once(source: &mut dyn SensorSource, state: &SensorState) {
    match source.read() {
        Ok(Some(readings)) => state.record(readings),
        Ok(None) => state.set_connected(source.is_connected()),
        Err(e) => {
            log::warn!("Sensor read failed ({}): {}", source.name(), e);
            state.set_connected(false);
        }
    }

    state.record_dropped(source.take_dropped());
}

/// Sleep in short slices so `stop` is not held up by a long interval
fn sleep_while_running(flag: &AtomicBool, interval: Duration) {
    const SLICE: Duration = Duration::from_millis(50);

    let mut remaining = interval;
    while !remaining.is_zero() && flag.load(Ordering::Relaxed) {
        let step = remaining.min(SLICE);
        thread::sleep(step);
        remaining -= step;
    }
}
