//! Configuration module

use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use cropyield_core::constants::{
    DEFAULT_MODEL_PATH, DEFAULT_POLL_INTERVAL_MS, DEFAULT_RECONNECT_MS, DEFAULT_SERIAL_BAUD,
    DEFAULT_SERIAL_PORT, DEFAULT_SERIAL_TIMEOUT_MS,
};
use cropyield_core::logic::model::ModelConfig;
use cropyield_core::logic::sensors::SerialConfig;

/// Where sensor readings come from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorMode {
    /// Random values, sampled per request
    Mock,
    /// Serial board, polled in the background
    Serial,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("unknown SENSOR_MODE `{0}` (expected `mock` or `serial`)")]
pub struct UnknownSensorMode(String);

impl FromStr for SensorMode {
    type Err = UnknownSensorMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mock" => Ok(Self::Mock),
            "serial" => Ok(Self::Serial),
            other => Err(UnknownSensorMode(other.to_string())),
        }
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Bind address
    pub host: String,

    /// Server port
    pub port: u16,

    /// Model artifact
    pub model_path: PathBuf,

    /// Expected SHA-256 of the model artifact
    pub model_sha256: Option<String>,

    /// Sensor source
    pub sensor_mode: SensorMode,

    /// Serial device path
    pub serial_port: String,

    /// Serial baud rate
    pub serial_baud: u32,

    /// Serial read timeout in milliseconds
    pub serial_timeout_ms: u64,

    /// Delay between background polls in milliseconds
    pub poll_interval_ms: u64,

    /// Minimum delay between serial reconnects in milliseconds
    pub reconnect_ms: u64,

    /// Log output format
    pub log_format: LogFormat,

    /// Environment (development, production)
    pub environment: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            model_path: PathBuf::from(DEFAULT_MODEL_PATH),
            model_sha256: None,
            sensor_mode: SensorMode::Mock,
            serial_port: DEFAULT_SERIAL_PORT.to_string(),
            serial_baud: DEFAULT_SERIAL_BAUD,
            serial_timeout_ms: DEFAULT_SERIAL_TIMEOUT_MS,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            reconnect_ms: DEFAULT_RECONNECT_MS,
            log_format: LogFormat::Text,
            environment: "development".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, UnknownSensorMode> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary lookup (env in production)
    pub fn from_lookup<F>(lookup: F) -> Result<Self, UnknownSensorMode>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let sensor_mode = match lookup("SENSOR_MODE") {
            Some(mode) => mode.parse()?,
            None => defaults.sensor_mode,
        };

        Ok(Self {
            host: lookup("HOST").unwrap_or(defaults.host),

            port: parse_var(lookup("PORT")).unwrap_or(defaults.port),

            model_path: lookup("MODEL_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.model_path),

            model_sha256: lookup("MODEL_SHA256").filter(|s| !s.trim().is_empty()),

            sensor_mode,

            serial_port: lookup("SERIAL_PORT").unwrap_or(defaults.serial_port),

            serial_baud: parse_var(lookup("SERIAL_BAUD")).unwrap_or(defaults.serial_baud),

            serial_timeout_ms: parse_var(lookup("SERIAL_TIMEOUT_MS")).unwrap_or(defaults.serial_timeout_ms),

            poll_interval_ms: parse_var(lookup("SENSOR_POLL_INTERVAL_MS")).unwrap_or(defaults.poll_interval_ms),

            reconnect_ms: parse_var(lookup("SERIAL_RECONNECT_MS")).unwrap_or(defaults.reconnect_ms),

            log_format: match lookup("LOG_FORMAT").as_deref().map(str::trim) {
                Some(f) if f.eq_ignore_ascii_case("json") => LogFormat::Json,
                _ => LogFormat::Text,
            },

            environment: lookup("ENVIRONMENT").unwrap_or(defaults.environment),
        })
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn model_config(&self) -> ModelConfig {
        ModelConfig {
            path: self.model_path.clone(),
            sha256: self.model_sha256.clone(),
        }
    }

    pub fn serial_config(&self) -> SerialConfig {
        SerialConfig {
            port: self.serial_port.clone(),
            baud_rate: self.serial_baud,
            timeout: Duration::from_millis(self.serial_timeout_ms),
            reconnect_interval: Duration::from_millis(self.reconnect_ms),
        }
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

/// Parse an optional env value, ignoring garbage
fn parse_var<T: FromStr>(value: Option<String>) -> Option<T> {
    value.and_then(|v| v.trim().parse().ok())
}
