//! Mock Sensor - random readings for running off the field hardware
//!
//! Values are drawn uniformly from plausible ranges and rounded to one
//! decimal, so the dashboard has something to show without a board attached.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::readings::SensorReadings;
use super::{SensorError, SensorSource};
use crate::constants::{
    round_to, HUMIDITY_RANGE, READING_DECIMALS, SOIL_MOISTURE_RANGE, TEMPERATURE_RANGE,
    WATER_LEVEL_RANGE,
};

/// Random sensor source
#[derive(Debug)]
pub struct MockSensor {
    rng: StdRng,
}

impl MockSensor {
    pub fn new() -> Self {
        Self { rng: StdRng::from_entropy() }
    }

    /// Deterministic source for tests
    pub fn seeded(seed: u64) -> Self {
        Self { rng: StdRng::seed_from_u64(seed) }
    }

    /// Draw one set of readings
    pub fn sample(&mut self) -> SensorReadings {
        SensorReadings {
            soil_moisture: self.uniform(SOIL_MOISTURE_RANGE),
            water_level: self.uniform(WATER_LEVEL_RANGE),
            temperature: self.uniform(TEMPERATURE_RANGE),
            humidity: self.uniform(HUMIDITY_RANGE),
        }
    }

    fn uniform(&mut self, (min, max): (f64, f64)) -> f64 {
        round_to(self.rng.gen_range(min..=max), READING_DECIMALS)
    }
}

impl Default for MockSensor {
    fn default() -> Self {
        Self::new()
    }
}

impl SensorSource for MockSensor {
    fn name(&self) -> &'static str {
        "mock"
    }

    fn read(&mut self) -> Result<Option<SensorReadings>, SensorError> {
        Ok(Some(self.sample()))
    }
}
