use crate::{CliClientResult, ClientError};

use reqwest::{Client as ReqwestClient, Method, Url};
use serde::Serialize;
use serde_json::Value;

/// HTTP client for the lp-server REST API
pub struct Client {
    pub base_url: String,
    client: ReqwestClient,
}

impl Client {
    /// `base_url` e.g. "http://127.0.0.1:9090"; a trailing slash is ignored.
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: ReqwestClient::new(),
        }
    }

    fn request(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        self.client.request(method, &url)
    }

    /// Request against `/api/v1/apps/<name>[/<action>]`.
    ///
    /// The name goes in as one path segment, percent-encoded by `Url`.
    fn app_request(
        &self,
        method: Method,
        name: &str,
        action: Option<&str>,
    ) -> CliClientResult<reqwest::RequestBuilder> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| ClientError::invalid_url(&self.base_url, e.to_string()))?;

        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|()| ClientError::invalid_url(&self.base_url, "cannot be a base URL"))?;
            segments.pop_if_empty().extend(["api", "v1", "apps", name]);
            if let Some(action) = action {
                segments.push(action);
            }
        }

        Ok(self.client.request(method, url))
    }

    /// Send and decode a JSON answer; error bodies become `ClientError::Api`.
    async fn execute(&self, req: reqwest::RequestBuilder) -> CliClientResult<Value> {
        let response = req.send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;

        // Error bodies may be empty or plain text (unmatched routes, 405s)
        if !status.is_success() {
            let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
            return Err(ClientError::from_body(status, &body));
        }

        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Send and return a plain-text answer.
    async fn execute_text(&self, req: reqwest::RequestBuilder) -> CliClientResult<String> {
        let response = req.send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            let body = serde_json::from_str(&text).unwrap_or(Value::Null);
            return Err(ClientError::from_body(status, &body));
        }

        Ok(text)
    }

    // =========================================================================
    // App Operations
    // =========================================================================

    /// List all apps (the server reconciles PIDs first)
    pub async fn list_apps(&self) -> CliClientResult<Value> {
        let req = self.request(Method::GET, "/api/v1/apps");
        self.execute(req).await
    }

    pub async fn add_app(&self, name: &str, port: u16, command: &str) -> CliClientResult<Value> {
        #[derive(Serialize)]
        struct CreateAppRequest<'a> {
            name: &'a str,
            port: u16,
            command: &'a str,
        }

        let body = CreateAppRequest {
            name,
            port,
            command,
        };
        let req = self.request(Method::POST, "/api/v1/apps").json(&body);
        self.execute(req).await
    }

    pub async fn delete_app(&self, name: &str) -> CliClientResult<Value> {
        let req = self.app_request(Method::DELETE, name, None)?;
        self.execute(req).await
    }

    pub async fn start_app(&self, name: &str) -> CliClientResult<Value> {
        let req = self.app_request(Method::POST, name, Some("start"))?;
        self.execute(req).await
    }

    pub async fn stop_app(&self, name: &str) -> CliClientResult<Value> {
        let req = self.app_request(Method::POST, name, Some("stop"))?;
        self.execute(req).await
    }

    /// Raw log text
    pub async fn app_logs(&self, name: &str) -> CliClientResult<String> {
        let req = self.app_request(Method::GET, name, Some("logs"))?;
        self.execute_text(req).await
    }

    // =========================================================================
    // Bulk Operations
    // =========================================================================

    pub async fn start_all(&self) -> CliClientResult<Value> {
        let req = self.request(Method::POST, "/api/v1/start-all");
        self.execute(req).await
    }

    pub async fn stop_all(&self) -> CliClientResult<Value> {
        let req = self.request(Method::POST, "/api/v1/stop-all");
        self.execute(req).await
    }
}
