//! Integration tests for the HTTP surface.

mod common;

use axum::http::header::CONTENT_TYPE;
use axum::http::StatusCode;
use serde_json::json;

use common::{body_json, body_text, build_mock_app, build_test_app, get, post_form, post_json, valid_fields};

const INVALID: &str = "Error: Please ensure all fields contain valid numbers.";

fn valid_json() -> serde_json::Value {
    json!({
        "N": 90, "P": 42, "K": 43, "ph": 6.5, "rainfall": 202.9,
        "temperature": 27.3, "humidity": 64.4, "soil_moisture": 55.1, "water_level": 70.2
    })
}

// ---------------------------------------------------------------------------
// Health and routing
// ---------------------------------------------------------------------------

#[tokio::test]
async fn health_check_returns_ok() {
    let response = get(build_test_app(), "/health").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["status"], "healthy");
    assert!(json["version"].is_string());
    assert_eq!(json["sensor_source"], "test");
}

#[tokio::test]
async fn unknown_route_returns_404() {
    let response = get(build_test_app(), "/this-route-does-not-exist").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn predict_rejects_get() {
    let response = get(build_test_app(), "/predict").await;
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

// ---------------------------------------------------------------------------
// Sensor endpoints
// ---------------------------------------------------------------------------

#[tokio::test]
async fn sensor_readings_are_zeroed_before_first_reading() {
    let json = body_json(get(build_test_app(), "/api/sensor_readings").await).await;

    let object = json.as_object().unwrap();
    assert_eq!(object.len(), 4);
    for key in ["soil_moisture", "water_level", "temperature", "humidity"] {
        assert_eq!(object[key], 0.0, "{key} should start at zero");
    }
}

#[tokio::test]
async fn sensors_alias_matches_readings() {
    let a = body_json(get(build_test_app(), "/api/sensors").await).await;
    let b = body_json(get(build_test_app(), "/api/sensor_readings").await).await;
    assert_eq!(a, b);
}

#[tokio::test]
async fn mock_readings_are_in_range() {
    let json = body_json(get(build_mock_app(), "/api/sensor_readings").await).await;

    let t = json["temperature"].as_f64().unwrap();
    let h = json["humidity"].as_f64().unwrap();
    let s = json["soil_moisture"].as_f64().unwrap();
    let w = json["water_level"].as_f64().unwrap();

    assert!((24.0..=32.0).contains(&t));
    assert!((50.0..=80.0).contains(&h));
    assert!((30.0..=85.0).contains(&s));
    assert!((10.0..=95.0).contains(&w));
}

#[tokio::test]
async fn sensor_status_reports_counters() {
    let json = body_json(get(build_mock_app(), "/api/sensors/status").await).await;

    assert_eq!(json["source"], "mock");
    assert_eq!(json["packets_accepted"], 0);
    assert!(json["updated_at"].is_null());
}

// ---------------------------------------------------------------------------
// Dashboard
// ---------------------------------------------------------------------------

#[tokio::test]
async fn dashboard_renders_form() {
    let response = get(build_test_app(), "/").await;
    assert_eq!(response.status(), StatusCode::OK);

    let html = body_text(response).await;
    assert!(html.contains("action=\"/predict\""));
    assert!(html.contains("name=\"rainfall\""));
    assert!(!html.contains("{{"));
}

// ---------------------------------------------------------------------------
// Prediction
// ---------------------------------------------------------------------------

#[tokio::test]
async fn predict_json_returns_rounded_value() {
    let response = post_json(build_test_app(), "/predict", valid_json()).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["prediction"], 3.11);
    assert_eq!(json["unit"], "tons/hectare");
    assert_eq!(json["prediction_text"], "Predicted Crop Yield: 3.11 tons/hectare");
}

#[tokio::test]
async fn predict_json_accepts_numeric_strings() {
    let mut body = valid_json();
    body["N"] = json!(" 90 ");

    let json = body_json(post_json(build_test_app(), "/predict", body).await).await;
    assert_eq!(json["prediction"], 3.11);
}

#[tokio::test]
async fn predict_json_rejects_non_numeric() {
    let mut body = valid_json();
    body["ph"] = json!("acidic");

    let response = post_json(build_test_app(), "/predict", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["error"], INVALID);
}

#[tokio::test]
async fn predict_json_missing_field_is_generic_error() {
    let mut body = valid_json();
    body.as_object_mut().unwrap().remove("rainfall");

    let response = post_json(build_test_app(), "/predict", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["error"], "An error occurred: missing field `rainfall`");
}

#[tokio::test]
async fn predict_form_renders_prediction() {
    let response = post_form(build_test_app(), "/predict", &valid_fields()).await;
    assert_eq!(response.status(), StatusCode::OK);

    let content_type = response.headers()[CONTENT_TYPE].to_str().unwrap().to_string();
    assert!(content_type.starts_with("text/html"));

    let html = body_text(response).await;
    assert!(html.contains("Predicted Crop Yield: 3.11 tons/hectare"));
}

#[tokio::test]
async fn predict_form_renders_fixed_error() {
    let mut fields = valid_fields();
    fields[1] = ("P", "abc");

    let response = post_form(build_test_app(), "/predict", &fields).await;
    assert_eq!(response.status(), StatusCode::OK);

    let html = body_text(response).await;
    assert!(html.contains(INVALID));
    assert!(!html.contains("Predicted Crop Yield"));
}

#[tokio::test]
async fn predict_rejects_other_content_types() {
    let request = axum::http::Request::builder()
        .method("POST")
        .uri("/predict")
        .header(CONTENT_TYPE, "text/plain")
        .body(axum::body::Body::from("N=1"))
        .unwrap();

    let response = tower::ServiceExt::oneshot(build_test_app(), request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
}

// ---------------------------------------------------------------------------
// Model info
// ---------------------------------------------------------------------------

#[tokio::test]
async fn model_info_lists_layout() {
    let response = get(build_test_app(), "/api/model").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["metadata"]["model_kind"], "linear");
    assert_eq!(json["metadata"]["features"], 9);
    assert_eq!(json["layout"]["feature_names"][0], "N");
    assert_eq!(json["layout"]["manual_features"], json!(["N", "P", "K", "ph", "rainfall"]));
    assert_eq!(
        json["layout"]["sensor_features"],
        json!(["temperature", "humidity", "soil_moisture", "water_level"])
    );
}

#[tokio::test]
async fn serves_model_loaded_from_disk() {
    use std::io::Write;
    use std::sync::Arc;

    use cropyield_core::logic::sensors::SensorState;
    use cropyield_core::{SensorHub, YieldModel};
    use cropyield_server::{create_router, AppState, Config};

    let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
    write!(
        file,
        r#"{{"kind": "linear", "coefficients": [0, 0, 0, 0, 0, 0, 0.01, 0, 0], "intercept": 1.5}}"#
    )
    .unwrap();

    let config = Config {
        model_path: file.path().to_path_buf(),
        ..Config::default()
    };
    let model = YieldModel::load(&config.model_config()).unwrap();
    let hub = SensorHub::from_state(Arc::new(SensorState::new("test")));
    let app = create_router(AppState::new(model, hub, config));

    // 1.5 + 0.01 * 202.9
    let json = body_json(post_json(app.clone(), "/predict", valid_json()).await).await;
    assert_eq!(json["prediction"], 3.53);

    let info = body_json(get(app, "/api/model").await).await;
    assert_eq!(info["metadata"]["sha256"].as_str().unwrap().len(), 64);
}
