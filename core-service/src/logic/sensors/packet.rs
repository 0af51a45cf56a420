//! Sensor Packet - one comma-separated line from the sensor board
//!
//! Wire format (one packet per line, ASCII):
//!
//! ```text
//! temperature,humidity,soil_moisture,water_level\n
//! 27.4,61.0,48.2,73.9
//! ```

use super::readings::SensorReadings;

/// Fields per packet
pub const PACKET_FIELDS: usize = 4;

/// Why a packet line was rejected
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PacketError {
    #[error("empty packet")]
    Empty,

    #[error("expected 4 fields, got {0}")]
    FieldCount(usize),

    #[error("field {index} is not a finite number: {raw:?}")]
    InvalidField { index: usize, raw: String },
}

/// Parse one packet line into readings
pub fn parse_packet(line: &str) -> Result<SensorReadings, PacketError> {
    let line = line.trim();
    if line.is_empty() {
        return Err(PacketError::Empty);
    }

    let parts: Vec<&str> = line.split(',').collect();
    if parts.len() != PACKET_FIELDS {
        return Err(PacketError::FieldCount(parts.len()));
    }

    let mut values = [0.0f64; PACKET_FIELDS];
    for (index, (slot, raw)) in values.iter_mut().zip(parts.iter()).enumerate() {
        *slot = raw
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| PacketError::InvalidField { index, raw: raw.to_string() })?;
    }

    let [temperature, humidity, soil_moisture, water_level] = values;

    Ok(SensorReadings {
        soil_moisture,
        water_level,
        temperature,
        humidity,
    })
}
