#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::header::CONTENT_TYPE;
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use cropyield_core::logic::model::LinearRegressor;
use cropyield_core::logic::sensors::{MockSensor, SensorState};
use cropyield_core::{SensorHub, YieldModel};
use cropyield_server::{create_router, AppState, Config};

/// `2.0 + 0.0123 * N`; every other feature has zero weight
pub fn test_model() -> YieldModel {
    let mut coefficients = vec![0.0; 9];
    coefficients[0] = 0.0123;

    YieldModel::from_regressor(Box::new(LinearRegressor::new(coefficients, 2.0)), "test")
        .expect("test model has nine features")
}

/// App whose sensors never report (readings stay zeroed)
pub fn build_test_app() -> Router {
    let hub = SensorHub::from_state(Arc::new(SensorState::new("test")));
    create_router(AppState::new(test_model(), hub, Config::default()))
}

/// App sampling a seeded mock board on every request
pub fn build_mock_app() -> Router {
    let hub = SensorHub::on_demand(Box::new(MockSensor::seeded(7)));
    create_router(AppState::new(test_model(), hub, Config::default()))
}

pub async fn get(app: Router, uri: &str) -> Response {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    app.oneshot(request).await.unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    app.oneshot(request).await.unwrap()
}

pub async fn post_form(app: Router, uri: &str, pairs: &[(&str, &str)]) -> Response {
    let body = pairs
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join("&");

    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body))
        .unwrap();

    app.oneshot(request).await.unwrap()
}

pub async fn body_bytes(response: Response) -> Vec<u8> {
    response.into_body().collect().await.unwrap().to_bytes().to_vec()
}

pub async fn body_json(response: Response) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

pub async fn body_text(response: Response) -> String {
    String::from_utf8(body_bytes(response).await).unwrap()
}

/// A complete, valid submission
pub fn valid_fields() -> Vec<(&'static str, &'static str)> {
    vec![
        ("N", "90"),
        ("P", "42"),
        ("K", "43"),
        ("ph", "6.5"),
        ("rainfall", "202.9"),
        ("temperature", "27.3"),
        ("humidity", "64.4"),
        ("soil_moisture", "55.1"),
        ("water_level", "70.2"),
    ]
}
