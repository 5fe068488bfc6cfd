//! Structural validation of forecast payloads submitted for saving
//!
//! A payload is accepted only if it is a non-empty array of forecast-shaped
//! objects. Validation is total: any input shape yields a bool, never a
//! panic, and the first violation fails the whole payload.

use serde_json::Value;

/// Check that a candidate payload conforms to the saved-forecast shape.
///
/// Every element must be an object carrying `dt_txt`, a `main` object with a
/// numeric `temp`, and a non-empty `weather` array whose first element is an
/// object with a `description`.
pub fn is_valid_forecast_payload(payload: &Value) -> bool {
    let items = match payload.as_array() {
        Some(items) if !items.is_empty() => items,
        _ => return false,
    };

    items.iter().all(is_valid_forecast_item)
}

fn is_valid_forecast_item(item: &Value) -> bool {
    let obj = match item.as_object() {
        Some(obj) => obj,
        None => return false,
    };

    if !obj.contains_key("dt_txt") || !obj.contains_key("main") || !obj.contains_key("weather") {
        return false;
    }

    let main = match obj.get("main").and_then(Value::as_object) {
        Some(main) => main,
        None => return false,
    };
    if !main.get("temp").map(Value::is_number).unwrap_or(false) {
        return false;
    }

    let weather = match obj.get("weather").and_then(Value::as_array) {
        Some(weather) if !weather.is_empty() => weather,
        _ => return false,
    };

    weather[0]
        .as_object()
        .map(|w| w.contains_key("description"))
        .unwrap_or(false)
}
