//! Ollama client implementation

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, info, warn};

use super::base::HttpClientBase;
use crate::constants::{OLLAMA_CHAT_PATH, OLLAMA_VERSION_PATH};
use crate::infrastructure::model::adapter::MessageAdapter;
use crate::infrastructure::model::traits::ModelClient;
use crate::infrastructure::model::types::{ModelError, ModelRequest, ModelResponse};

/// Ollama client for a locally hosted model service
pub struct OllamaClient {
    base: HttpClientBase,
}

impl OllamaClient {
    pub fn new(id: impl Into<String>, endpoint: impl Into<String>, http: Client) -> Self {
        Self {
            base: HttpClientBase::new(id.into(), endpoint.into(), None, http),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.base.endpoint
    }

    /// Liveness probe against `/api/version`.
    ///
    /// Succeeds only on HTTP 200 within `timeout`.
    pub async fn probe(&self, timeout: Duration) -> Result<(), ModelError> {
        let url = self.base.build_url(OLLAMA_VERSION_PATH);
        debug!(provider = self.base.id.as_str(), %url, ?timeout, "Probing Ollama service");

        let status = self.base.get_status(&url, timeout).await?;
        if status == reqwest::StatusCode::OK {
            Ok(())
        } else {
            warn!(provider = self.base.id.as_str(), %status, "Ollama probe returned non-OK status");
            Err(ModelError::status(&self.base.id, status, "liveness probe failed"))
        }
    }
}

#[async_trait]
impl ModelClient for OllamaClient {
    fn id(&self) -> &str {
        &self.base.id
    }

    async fn chat(&self, request: ModelRequest) -> Result<ModelResponse, ModelError> {
        let url = self.base.build_url(OLLAMA_CHAT_PATH);

        let payload = OllamaRequest {
            model: request.model.clone(),
            messages: MessageAdapter::to_ollama_format(&request.messages),
            stream: false,
        };

        info!(
            provider = self.base.id.as_str(),
            model = request.model.as_str(),
            messages = request.messages.len(),
            "Sending request to Ollama"
        );

        let reply = self.base.post_no_auth(&url, &payload).await?;
        debug!("Received response from Ollama");

        Ok(ModelResponse::new(MessageAdapter::normalize_reply(
            reply,
            MessageAdapter::ollama_text,
        )))
    }
}

#[derive(Serialize)]
struct OllamaRequest {
    model: String,
    messages: Vec<serde_json::Value>,
    stream: bool,
}
