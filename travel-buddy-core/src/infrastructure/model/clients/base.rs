//! Base HTTP client with shared logic

use crate::infrastructure::model::types::ModelError;
use reqwest::{Client, RequestBuilder, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;

/// Base HTTP client with shared functionality
pub struct HttpClientBase {
    pub id: String,
    pub endpoint: String,
    api_key: Option<SecretString>,
    pub http: Client,
}

impl HttpClientBase {
    pub fn new(id: String, endpoint: String, api_key: Option<SecretString>, http: Client) -> Self {
        Self {
            id,
            endpoint,
            api_key,
            http,
        }
    }

    /// Build URL from endpoint and path
    pub fn build_url(&self, path: &str) -> String {
        let base = self.endpoint.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{base}/{path}")
    }

    /// Post JSON with bearer auth
    pub async fn post_with_bearer<Req>(&self, url: &str, body: &Req) -> Result<Value, ModelError>
    where
        Req: Serialize,
    {
        let api_key = self.require_api_key()?;
        let request = self
            .http
            .post(url)
            .bearer_auth(api_key.expose_secret())
            .json(body);
        self.send_json(request).await
    }

    /// Post JSON without auth (for local services like Ollama)
    pub async fn post_no_auth<Req>(&self, url: &str, body: &Req) -> Result<Value, ModelError>
    where
        Req: Serialize,
    {
        self.send_json(self.http.post(url).json(body)).await
    }

    /// GET `url` and return the status code, bounded by `timeout`
    pub async fn get_status(&self, url: &str, timeout: Duration) -> Result<StatusCode, ModelError> {
        self.http
            .get(url)
            .timeout(timeout)
            .send()
            .await
            .map(|response| response.status())
            .map_err(|e| ModelError::network(&self.id, e))
    }

    async fn send_json(&self, request: RequestBuilder) -> Result<Value, ModelError> {
        let response = request
            .send()
            .await
            .map_err(|e| ModelError::network(&self.id, e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ModelError::status(&self.id, status, body));
        }

        let text = response
            .text()
            .await
            .map_err(|e| ModelError::network(&self.id, e))?;
        match serde_json::from_str::<Value>(&text) {
            Ok(value) => Ok(value),
            Err(_) => Ok(Value::String(text)),
        }
    }

    fn require_api_key(&self) -> Result<&SecretString, ModelError> {
        self.api_key
            .as_ref()
            .filter(|k| !k.expose_secret().trim().is_empty())
            .ok_or_else(|| ModelError::missing_api_key(&self.id))
    }
}
