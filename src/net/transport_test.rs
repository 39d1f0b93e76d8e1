use super::*;
use serde_json::json;

// =============================================================
// RequestBody encoding
// =============================================================

#[test]
fn json_body_encodes_as_compact_json() {
    let body = RequestBody::Json(json!({ "name": "Ada" }));
    assert_eq!(body.encode(), r#"{"name":"Ada"}"#);
}

#[test]
fn form_body_encodes_as_urlencoded_pairs() {
    let body = RequestBody::Form(vec![
        ("email".to_owned(), "a@b.com".to_owned()),
        ("password".to_owned(), "p w".to_owned()),
    ]);
    assert_eq!(body.encode(), "email=a%40b.com&password=p%20w");
}

#[test]
fn empty_form_body_encodes_as_empty_string() {
    assert_eq!(RequestBody::Form(Vec::new()).encode(), "");
}

// =============================================================
// percent_encode
// =============================================================

#[test]
fn percent_encode_passes_unreserved_characters() {
    assert_eq!(percent_encode("Abc-123_.~"), "Abc-123_.~");
}

#[test]
fn percent_encode_escapes_reserved_bytes_uppercase() {
    assert_eq!(percent_encode("a b&c=d"), "a%20b%26c%3Dd");
}

#[test]
fn percent_encode_escapes_every_utf8_byte() {
    assert_eq!(percent_encode("é"), "%C3%A9");
}

// =============================================================
// HttpRequest / HttpMethod
// =============================================================

#[test]
fn http_method_as_str_matches_wire_names() {
    assert_eq!(HttpMethod::Get.as_str(), "GET");
    assert_eq!(HttpMethod::Patch.as_str(), "PATCH");
    assert_eq!(HttpMethod::Delete.as_str(), "DELETE");
}

#[test]
fn request_header_lookup_is_case_insensitive() {
    let request = HttpRequest {
        method: HttpMethod::Get,
        url: "/x".to_owned(),
        headers: vec![("Authorization".to_owned(), "Bearer t".to_owned())],
        body: None,
    };
    assert_eq!(request.header("authorization"), Some("Bearer t"));
    assert!(request.header("x-csrftoken").is_none());
}
