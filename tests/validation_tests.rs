//! Forecast payload validation tests
//!
//! Covers acceptance of well-formed payloads, rejection on each missing
//! field, and totality over arbitrary JSON input.

use proptest::prelude::*;
use serde_json::{json, Value};

use weatherlog::validation::is_valid_forecast_payload;

fn valid_item(hour: u8, temp: f64) -> Value {
    json!({
        "dt_txt": format!("2024-06-01 {:02}:00:00", hour),
        "main": {"temp": temp, "humidity": 55, "pressure": 1013},
        "weather": [{"description": "scattered clouds", "icon": "03d", "main": "Clouds"}],
        "wind": {"speed": 3.2}
    })
}

fn valid_payload(n: usize) -> Value {
    Value::Array((0..n).map(|i| valid_item((i % 8) as u8 * 3, 15.0 + i as f64)).collect())
}

#[test]
fn accepts_payloads_of_any_positive_length() {
    for n in [1, 5, 40] {
        assert!(is_valid_forecast_payload(&valid_payload(n)));
    }
}

#[test]
fn removing_any_required_field_rejects_the_payload() {
    // Top-level fields
    for field in ["dt_txt", "main", "weather"] {
        let mut payload = valid_payload(3);
        payload[1].as_object_mut().unwrap().remove(field);
        assert!(
            !is_valid_forecast_payload(&payload),
            "missing {} should reject",
            field
        );
    }

    // Nested requirements
    let mut payload = valid_payload(3);
    payload[2]["main"].as_object_mut().unwrap().remove("temp");
    assert!(!is_valid_forecast_payload(&payload));

    let mut payload = valid_payload(3);
    payload[0]["weather"][0]
        .as_object_mut()
        .unwrap()
        .remove("description");
    assert!(!is_valid_forecast_payload(&payload));

    let mut payload = valid_payload(3);
    payload[0]["weather"] = json!([]);
    assert!(!is_valid_forecast_payload(&payload));
}

#[test]
fn rejects_trivially_malformed_inputs() {
    assert!(!is_valid_forecast_payload(&json!(null)));
    assert!(!is_valid_forecast_payload(&json!([])));
    assert!(!is_valid_forecast_payload(&json!("not a list")));
    assert!(!is_valid_forecast_payload(&json!([1, 2, 3])));
    assert!(!is_valid_forecast_payload(&json!({"list": [valid_item(12, 20.0)]})));
}

/// Arbitrary JSON values, nested a few levels deep
fn arb_json() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(|n| json!(n)),
        any::<f64>().prop_map(|f| json!(f)),
        "[a-zA-Z0-9 _.-]{0,12}".prop_map(Value::String),
    ];
    leaf.prop_recursive(4, 32, 6, |inner| {
        prop_oneof![
            proptest::collection::vec(inner.clone(), 0..6).prop_map(Value::Array),
            proptest::collection::btree_map("[a-z_]{1,10}", inner, 0..6)
                .prop_map(|m| Value::Object(m.into_iter().collect())),
        ]
    })
}

proptest! {
    /// The validator must return a bool for any input, never panic
    #[test]
    fn validator_is_total(payload in arb_json()) {
        let _ = is_valid_forecast_payload(&payload);
    }

    /// Wrapping arbitrary junk around a valid payload never crashes, and a
    /// payload containing a non-conforming element is always rejected
    #[test]
    fn junk_elements_always_reject(junk in arb_json(), n in 1usize..6) {
        prop_assume!(junk.get("dt_txt").is_none() || !junk.is_object());
        let mut payload = valid_payload(n);
        payload.as_array_mut().unwrap().push(junk);
        prop_assert!(!is_valid_forecast_payload(&payload));
    }
}
