use super::traits::ModelClient;
use super::types::{ModelError, ModelRequest};
use crate::types::ChatMessage;
use std::fmt;
use tracing::debug;

/// A live binding to one provider's endpoint and model.
pub struct Session {
    provider_id: String,
    model: String,
    system_prompt: Option<String>,
    client: Box<dyn ModelClient>,
}

impl Session {
    pub fn new(
        provider_id: impl Into<String>,
        model: impl Into<String>,
        client: Box<dyn ModelClient>,
    ) -> Self {
        Self {
            provider_id: provider_id.into(),
            model: model.into(),
            system_prompt: None,
            client,
        }
    }

    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(prompt.into());
        self
    }

    pub fn provider_id(&self) -> &str {
        &self.provider_id
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn system_prompt(&self) -> Option<&str> {
        self.system_prompt.as_deref()
    }

    /// Send one prompt and wait for the normalized reply text.
    pub async fn send(&self, prompt: &str) -> Result<String, ModelError> {
        let mut messages = Vec::with_capacity(2);
        if let Some(system) = &self.system_prompt {
            messages.push(ChatMessage::system(system.clone()));
        }
        messages.push(ChatMessage::user(prompt));

        debug!(
            provider = self.provider_id.as_str(),
            model = self.model.as_str(),
            prompt_len = prompt.len(),
            "Dispatching prompt"
        );

        let response = self
            .client
            .chat(ModelRequest {
                model: self.model.clone(),
                messages,
            })
            .await?;
        Ok(response.into_text())
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("provider_id", &self.provider_id)
            .field("model", &self.model)
            .field("client", &self.client.id())
            .finish_non_exhaustive()
    }
}
