//! HTTP transport to the game API.

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use serde_json::Value;

use crate::error::ClientError;

/// Seam between the session controller and the network.
///
/// The controller never touches HTTP directly; tests substitute a mock to
/// observe exactly which requests a handler issues (or that it issues none).
#[cfg_attr(test, automock)]
#[async_trait]
pub trait Transport: Send + Sync {
    /// POST a JSON body to an API path (e.g. `"storage"`) and decode the
    /// JSON reply. A 401-class status maps to [`ClientError::Unauthorized`]
    /// uniformly, regardless of the endpoint.
    async fn post(&self, path: &str, body: Value) -> Result<Value, ClientError>;
}

/// reqwest-backed transport against a base URL like
/// `http://127.0.0.1:8000/api`.
pub struct HttpTransport {
    base_url: String,
    http: reqwest::Client,
}

impl HttpTransport {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            http: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn post(&self, path: &str, body: Value) -> Result<Value, ClientError> {
        let url = format!("{}/{}", self.base_url, path);
        tracing::debug!("POST {}", url);

        let response = self
            .http
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| ClientError::Transport(e.to_string()))?;

        let status = response.status();
        if status.as_u16() == 401 {
            return Err(ClientError::Unauthorized);
        }
        if !status.is_success() {
            return Err(ClientError::Transport(format!("HTTP {}", status)));
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| ClientError::Parse(e.to_string()))
    }
}
