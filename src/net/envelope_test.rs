use super::*;
use serde_json::json;

fn envelope(value: serde_json::Value) -> Envelope {
    serde_json::from_value(value).expect("envelope should parse")
}

// =============================================================
// Parsing
// =============================================================

#[test]
fn parses_numeric_code() {
    let parsed = envelope(json!({ "code": 200, "data": { "id": 1 } }));
    assert_eq!(parsed.code, 200);
    assert!(parsed.is_success());
}

#[test]
fn parses_string_code_from_older_server_revisions() {
    let parsed = envelope(json!({ "code": "401", "msg": { "detail": "token expired" } }));
    assert_eq!(parsed.code, 401);
    assert!(!parsed.is_success());
}

#[test]
fn missing_data_and_msg_parse_as_none() {
    let parsed = envelope(json!({ "code": 204 }));
    assert!(parsed.data.is_none());
    assert!(parsed.msg.is_none());
}

#[test]
fn non_numeric_code_is_rejected() {
    let result = serde_json::from_value::<Envelope>(json!({ "code": "created" }));
    assert!(result.is_err());
}

#[test]
fn code_201_is_success() {
    assert!(envelope(json!({ "code": 201, "data": {} })).is_success());
}

// =============================================================
// decode_data
// =============================================================

#[derive(Debug, PartialEq, serde::Deserialize)]
struct Payload {
    id: i64,
}

#[test]
fn decode_data_returns_typed_payload() {
    let parsed = envelope(json!({ "code": 200, "data": { "id": 7 } }));
    assert_eq!(parsed.decode_data::<Payload>(), Some(Payload { id: 7 }));
}

#[test]
fn decode_data_returns_none_on_shape_mismatch() {
    let parsed = envelope(json!({ "code": 200, "data": { "id": "seven" } }));
    assert_eq!(parsed.decode_data::<Payload>(), None);
}

#[test]
fn decode_data_returns_none_when_data_absent() {
    let parsed = envelope(json!({ "code": 500 }));
    assert_eq!(parsed.decode_data::<Payload>(), None);
}

// =============================================================
// display_message normalization (total for any msg shape)
// =============================================================

#[test]
fn display_message_uses_detail_string() {
    let parsed = envelope(json!({ "code": 401, "msg": { "detail": "token expired" } }));
    assert_eq!(parsed.display_message(), "token expired");
}

#[test]
fn display_message_joins_field_level_messages() {
    let parsed = envelope(json!({ "code": 400, "msg": { "password": ["incorrect"] } }));
    assert_eq!(parsed.display_message(), "incorrect");
}

#[test]
fn display_message_joins_multiple_fields_with_commas() {
    let parsed = envelope(json!({
        "code": 400,
        "msg": { "email": ["already exists"], "name": "too short" }
    }));
    let message = parsed.display_message();
    assert!(message.contains("already exists"));
    assert!(message.contains("too short"));
    assert!(message.contains(", "));
}

#[test]
fn display_message_uses_bare_string() {
    let parsed = envelope(json!({ "code": 500, "msg": "server exploded" }));
    assert_eq!(parsed.display_message(), "server exploded");
}

#[test]
fn display_message_falls_back_when_msg_absent() {
    let parsed = envelope(json!({ "code": 500 }));
    assert_eq!(parsed.display_message(), GENERIC_ERROR);
}

#[test]
fn display_message_falls_back_on_empty_string() {
    let parsed = envelope(json!({ "code": 500, "msg": "  " }));
    assert_eq!(parsed.display_message(), GENERIC_ERROR);
}

#[test]
fn display_message_falls_back_on_non_string_shapes() {
    let parsed = envelope(json!({ "code": 500, "msg": 42 }));
    assert_eq!(parsed.display_message(), GENERIC_ERROR);
    let parsed = envelope(json!({ "code": 500, "msg": { "fields": [1, 2] } }));
    assert_eq!(parsed.display_message(), GENERIC_ERROR);
}
