#![allow(dead_code)]

//! Test infrastructure for lp-server API tests

use lp_core::Supervisor;
use lp_server::{AppState, build_router};

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use tempfile::TempDir;
use tower::ServiceExt;

/// Router over a supervisor rooted in a temp directory.
///
/// Dropping it stops every app the test started.
pub struct TestServer {
    pub temp: TempDir,
    pub state: AppState,
}

impl TestServer {
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp dir");
        let supervisor = Supervisor::new(temp.path().join("apps.json"), temp.path().join("logs"));
        Self {
            temp,
            state: AppState::new(supervisor),
        }
    }

    pub fn router(&self) -> Router {
        build_router(self.state.clone())
    }

    pub async fn send(
        &self,
        method: &str,
        uri: &str,
        body: Option<serde_json::Value>,
    ) -> (StatusCode, Vec<u8>) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, bytes.to_vec())
    }

    pub async fn send_json(
        &self,
        method: &str,
        uri: &str,
        body: Option<serde_json::Value>,
    ) -> (StatusCode, serde_json::Value) {
        let (status, bytes) = self.send(method, uri, body).await;
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    pub async fn add_app(&self, name: &str, port: u16, command: &str) -> serde_json::Value {
        let (status, json) = self
            .send_json(
                "POST",
                "/api/v1/apps",
                Some(serde_json::json!({ "name": name, "port": port, "command": command })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "add {name} failed: {json}");
        json
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        let _ = self.state.supervisor.stop_all();
    }
}
