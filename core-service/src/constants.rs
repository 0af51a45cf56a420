//! Central Configuration Constants
//!
//! Single source of truth for defaults shared by the core library and the
//! web server. Environment lookups live in the server's `config` module.

/// App version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// App name
pub const APP_NAME: &str = "Crop Yield Service";

/// Default model artifact path
pub const DEFAULT_MODEL_PATH: &str = "crop_yield_prediction_model.json";

/// Unit attached to every prediction
pub const YIELD_UNIT: &str = "tons/hectare";

/// Decimal places kept in a prediction
pub const PREDICTION_DECIMALS: i32 = 2;

/// Decimal places kept in a mock sensor reading
pub const READING_DECIMALS: i32 = 1;

// ============================================
// Prediction messages
// ============================================

/// Returned whenever a prediction field is not a number
pub const INVALID_NUMBER_MESSAGE: &str = "Error: Please ensure all fields contain valid numbers.";

/// Prefix for every other prediction failure
pub const GENERIC_ERROR_PREFIX: &str = "An error occurred: ";

// ============================================
// Sensor defaults
// ============================================

/// Default serial device
pub const DEFAULT_SERIAL_PORT: &str = "/dev/ttyUSB0";

/// Default serial baud rate
pub const DEFAULT_SERIAL_BAUD: u32 = 9600;

/// Default serial read timeout (milliseconds)
pub const DEFAULT_SERIAL_TIMEOUT_MS: u64 = 1_000;

/// Default delay between sensor polls (milliseconds)
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 2_000;

/// Default minimum delay between serial reconnect attempts (milliseconds)
pub const DEFAULT_RECONNECT_MS: u64 = 5_000;

/// Longest packet line accepted from the serial link (bytes)
pub const MAX_PACKET_LINE: usize = 256;

/// Mock ranges: (min, max)
pub const SOIL_MOISTURE_RANGE: (f64, f64) = (30.0, 85.0);
pub const WATER_LEVEL_RANGE: (f64, f64) = (10.0, 95.0);
pub const TEMPERATURE_RANGE: (f64, f64) = (24.0, 32.0);
pub const HUMIDITY_RANGE: (f64, f64) = (50.0, 80.0);

// ============================================
// Helpers
// ============================================

/// Round half away from zero to `decimals` places.
///
/// Values too large to scale are already past any meaningful decimal and
/// come back unchanged.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    let scaled = value * factor;
    if !scaled.is_finite() {
        return value;
    }
    scaled.round() / factor
}

/// Format a rounded yield the way the dashboard shows it ("4.3", "5.0", "4.27")
pub fn format_yield(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{:.1}", value)
    } else {
        format!("{}", value)
    }
}

/// Human readable prediction line
pub fn prediction_text(value: f64) -> String {
    format!("Predicted Crop Yield: {} {}", format_yield(value), YIELD_UNIT)
}
