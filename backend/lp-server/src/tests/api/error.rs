use crate::ApiError;

use lp_core::SupervisorError;

use std::panic::Location;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use error_location::ErrorLocation;
use http_body_util::BodyExt;

async fn body_json(response: Response) -> serde_json::Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

#[tokio::test]
async fn test_not_found_returns_404_with_json_body() {
    let error = ApiError::NotFound {
        message: "App 'web' not found".into(),
        location: ErrorLocation::from(Location::caller()),
    };
    let response = error.into_response();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let json = body_json(response).await;
    assert_eq!(json["error"]["code"], "NOT_FOUND");
    assert_eq!(json["error"]["message"], "App 'web' not found");
    assert!(json["error"].get("field").is_none());
}

#[tokio::test]
async fn test_core_validation_error_keeps_field() {
    let error: ApiError = SupervisorError::validation("port", "port is required").into();
    let response = error.into_response();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["error"]["code"], "VALIDATION_ERROR");
    assert_eq!(json["error"]["field"], "port");
    assert_eq!(json["error"]["message"], "port is required");
}

#[tokio::test]
async fn test_invalid_command_maps_to_validation_on_command() {
    let error: ApiError = SupervisorError::InvalidCommand {
        name: "web".into(),
        command: "\"\"".into(),
        location: ErrorLocation::from(Location::caller()),
    }
    .into();
    let response = error.into_response();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"]["field"], "command");
}

#[tokio::test]
async fn test_duplicate_port_maps_to_409_without_location() {
    let error: ApiError = SupervisorError::DuplicatePort {
        port: 4000,
        owner: "api".into(),
        location: ErrorLocation::from(Location::caller()),
    }
    .into();
    let response = error.into_response();

    assert_eq!(response.status(), StatusCode::CONFLICT);

    let json = body_json(response).await;
    assert_eq!(json["error"]["code"], "CONFLICT");
    assert_eq!(
        json["error"]["message"],
        "Port 4000 is already assigned to app 'api'"
    );
}

#[tokio::test]
async fn test_already_running_maps_to_409() {
    let error: ApiError = SupervisorError::AlreadyRunning {
        name: "web".into(),
        pid: 1234,
        location: ErrorLocation::from(Location::caller()),
    }
    .into();

    assert_eq!(error.into_response().status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_log_not_found_maps_to_404() {
    let error: ApiError = SupervisorError::log_not_found("web").into();

    assert_eq!(error.into_response().status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_store_io_error_maps_to_500_and_hides_path() {
    let error: ApiError = SupervisorError::io(
        "/secret/apps.json",
        std::io::Error::other("disk on fire"),
    )
    .into();
    let response = error.into_response();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let json = body_json(response).await;
    assert_eq!(json["error"]["code"], "INTERNAL_ERROR");
    assert!(!json["error"]["message"].as_str().unwrap().contains("secret"));
}

#[tokio::test]
async fn test_launch_failure_maps_to_500_with_reason() {
    let error: ApiError = SupervisorError::LaunchFailed {
        name: "ghost".into(),
        source: std::io::Error::from(std::io::ErrorKind::NotFound),
        location: ErrorLocation::from(Location::caller()),
    }
    .into();
    let response = error.into_response();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = body_json(response).await;
    assert!(
        json["error"]["message"]
            .as_str()
            .unwrap()
            .contains("Failed to launch app 'ghost'")
    );
}
