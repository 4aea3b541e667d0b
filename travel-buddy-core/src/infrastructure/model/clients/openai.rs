//! OpenAI-compatible client implementation

use async_trait::async_trait;
use reqwest::Client;
use secrecy::SecretString;
use serde::Serialize;
use tracing::{debug, info};

use super::base::HttpClientBase;
use crate::constants::OPENAI_CHAT_PATH;
use crate::infrastructure::model::adapter::MessageAdapter;
use crate::infrastructure::model::traits::ModelClient;
use crate::infrastructure::model::types::{ModelError, ModelRequest, ModelResponse};

/// OpenAI-compatible client (works with OpenAI, Groq, Mistral, vLLM, etc.)
pub struct OpenAIClient {
    base: HttpClientBase,
    api_path: String,
    temperature: f32,
}

impl OpenAIClient {
    pub fn new(
        id: impl Into<String>,
        endpoint: impl Into<String>,
        api_key: SecretString,
        http: Client,
    ) -> Self {
        Self {
            base: HttpClientBase::new(id.into(), endpoint.into(), Some(api_key), http),
            api_path: OPENAI_CHAT_PATH.to_string(),
            temperature: crate::config::defaults::DEFAULT_TEMPERATURE,
        }
    }

    pub fn with_api_path(mut self, api_path: Option<String>) -> Self {
        if let Some(path) = api_path {
            self.api_path = path;
        }
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn temperature(&self) -> f32 {
        self.temperature
    }
}

#[async_trait]
impl ModelClient for OpenAIClient {
    fn id(&self) -> &str {
        &self.base.id
    }

    async fn chat(&self, request: ModelRequest) -> Result<ModelResponse, ModelError> {
        let url = self.base.build_url(&self.api_path);

        let payload = OpenAIRequest {
            model: request.model.clone(),
            messages: MessageAdapter::to_openai_format(&request.messages),
            temperature: self.temperature,
            stream: false,
        };

        info!(
            provider = self.base.id.as_str(),
            model = request.model.as_str(),
            messages = request.messages.len(),
            temperature = self.temperature,
            "Sending request to OpenAI-compatible provider"
        );

        let reply = self.base.post_with_bearer(&url, &payload).await?;
        debug!("Received response from OpenAI-compatible provider");

        Ok(ModelResponse::new(MessageAdapter::normalize_reply(
            reply,
            MessageAdapter::openai_text,
        )))
    }
}

#[derive(Serialize)]
struct OpenAIRequest {
    model: String,
    messages: Vec<serde_json::Value>,
    temperature: f32,
    stream: bool,
}
