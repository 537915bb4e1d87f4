use crate::{Client, ClientError};

use serde_json::json;

#[test]
fn test_base_url_trailing_slash_trimmed() {
    let client = Client::new("http://localhost:9090/");
    assert_eq!(client.base_url, "http://localhost:9090");
}

#[test]
fn test_base_url_no_trailing_slash() {
    let client = Client::new("http://localhost:9090");
    assert_eq!(client.base_url, "http://localhost:9090");
}

#[test]
fn test_error_body_code_and_message_extracted() {
    let body = json!({ "error": { "code": "CONFLICT", "message": "App 'web' already exists" } });

    let err = ClientError::from_body(reqwest::StatusCode::CONFLICT, &body);

    assert_eq!(err.code(), Some("CONFLICT"));
    assert!(err.to_string().contains("App 'web' already exists"));
}

#[test]
fn test_error_body_without_error_object_uses_status() {
    let err = ClientError::from_body(reqwest::StatusCode::BAD_GATEWAY, &serde_json::Value::Null);

    assert_eq!(err.code(), Some("502"));
}
