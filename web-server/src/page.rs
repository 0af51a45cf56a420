//! Dashboard page
//!
//! A single embedded HTML page with `{{name}}` placeholders. Only the
//! readings and the prediction line are substituted.

use axum::response::Html;

use cropyield_core::SensorReadings;

const INDEX_TEMPLATE: &str = include_str!("../templates/index.html");

/// Render the dashboard with the given readings and optional prediction line
pub fn render_dashboard(readings: &SensorReadings, prediction_text: Option<&str>) -> Html<String> {
    let readings = readings.rounded();

    let body = INDEX_TEMPLATE
        .replace("{{soil_moisture}}", &format!("{:.1}", readings.soil_moisture))
        .replace("{{water_level}}", &format!("{:.1}", readings.water_level))
        .replace("{{temperature}}", &format!("{:.1}", readings.temperature))
        .replace("{{humidity}}", &format!("{:.1}", readings.humidity))
        .replace("{{prediction_text}}", &escape_html(prediction_text.unwrap_or("")));

    Html(body)
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
