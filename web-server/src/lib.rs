//! Crop Yield Server
//!
//! HTTP front for the crop-yield model and the field sensor dashboard.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                    CROP YIELD SERVER                     │
//! ├──────────────────────────────────────────────────────────┤
//! │  ┌────────────┐   ┌──────────────┐   ┌────────────────┐  │
//! │  │  Router    │──▶│ YieldModel   │   │ Sensor Poller  │  │
//! │  │  (Axum)    │   │ (read-only)  │   │ (serial thread)│  │
//! │  └─────┬──────┘   └──────────────┘   └───────┬────────┘  │
//! │        │          ┌──────────────┐           │           │
//! │        └─────────▶│ SensorState  │◀──────────┘           │
//! │                   │ (RwLock)     │                       │
//! │                   └──────────────┘                       │
//! └──────────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod error;
pub mod handlers;
pub mod page;

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{
    trace::TraceLayer,
    compression::CompressionLayer,
};

use cropyield_core::logic::sensors::{MockSensor, SerialSensor};
use cropyield_core::{SensorHub, YieldModel};

pub use config::{Config, SensorMode};
pub use error::{AppError, AppResult};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub model: Arc<YieldModel>,
    pub sensors: Arc<SensorHub>,
    pub config: Config,
}

impl AppState {
    pub fn new(model: YieldModel, sensors: SensorHub, config: Config) -> Self {
        Self {
            model: Arc::new(model),
            sensors: Arc::new(sensors),
            config,
        }
    }
}

/// Build the sensor hub for the configured mode
pub fn build_sensor_hub(config: &Config) -> std::io::Result<SensorHub> {
    match config.sensor_mode {
        SensorMode::Mock => {
            tracing::info!("Sensors: mock (sampled per request)");
            Ok(SensorHub::on_demand(Box::new(MockSensor::new())))
        }
        SensorMode::Serial => {
            let serial = config.serial_config();
            tracing::info!(
                "Sensors: serial {} @ {} baud, polled every {}ms",
                serial.port, serial.baud_rate, config.poll_interval_ms
            );
            SensorHub::polled(Box::new(SerialSensor::new(serial)), config.poll_interval())
        }
    }
}

/// Create the main router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::dashboard::index))
        .route("/health", get(handlers::health::check))
        .route("/predict", post(handlers::predict::predict))
        .route("/api/sensor_readings", get(handlers::sensors::readings))
        .route("/api/sensors", get(handlers::sensors::readings))
        .route("/api/sensors/status", get(handlers::sensors::status))
        .route("/api/model", get(handlers::model::info))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
