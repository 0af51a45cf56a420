//! Sensor Readings - the four environmental values shown on the dashboard

use serde::{Deserialize, Serialize};

use crate::constants::{round_to, READING_DECIMALS};

/// Latest environmental reading.
///
/// Always serialized with exactly these four keys; before the first real
/// reading every value is zero.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SensorReadings {
    /// Soil moisture, %
    pub soil_moisture: f64,
    /// Water level, %
    pub water_level: f64,
    /// Air temperature, °C
    pub temperature: f64,
    /// Relative humidity, %
    pub humidity: f64,
}

impl SensorReadings {
    /// Zeroed readings used until a sensor reports
    pub fn zeroed() -> Self {
        Self::default()
    }

    /// Same readings rounded for display
    pub fn rounded(&self) -> Self {
        Self {
            soil_moisture: round_to(self.soil_moisture, READING_DECIMALS),
            water_level: round_to(self.water_level, READING_DECIMALS),
            temperature: round_to(self.temperature, READING_DECIMALS),
            humidity: round_to(self.humidity, READING_DECIMALS),
        }
    }
}
