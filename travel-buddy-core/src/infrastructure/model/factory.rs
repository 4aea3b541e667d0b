//! Session factory - opens sessions from registry descriptors

use super::clients::{OllamaClient, OpenAIClient};
use super::registry::{ProviderDescriptor, ProviderKind};
use super::session::Session;
use super::types::ConnectError;
use crate::config::defaults::DEFAULT_SYSTEM_PROMPT;
use reqwest::Client;
use secrecy::SecretString;
use std::env;
use tracing::{debug, info, warn};

/// Resolve a hosted credential.
///
/// A supplied value is used as-is (trimmed) and a blank one resolves to
/// nothing. Only when no value is supplied at all is the provider's
/// configured environment variable consulted.
pub fn resolve_credential(
    provider: &str,
    explicit: Option<&str>,
    env_var: Option<&str>,
) -> Option<String> {
    if let Some(value) = explicit {
        let value = value.trim();
        return (!value.is_empty()).then(|| value.to_string());
    }
    let name = env_var.map(str::trim).filter(|v| !v.is_empty())?;
    match env::var(name) {
        Ok(value) if !value.trim().is_empty() => {
            debug!(provider, env_var = name, "Using credential from environment");
            Some(value.trim().to_string())
        }
        Ok(_) => None,
        Err(err) => {
            warn!(
                provider,
                env_var = name,
                %err,
                "API key environment variable is not set"
            );
            None
        }
    }
}

/// Opens sessions, running the family-specific initialization first.
#[derive(Debug, Clone)]
pub struct SessionFactory {
    http: Client,
    system_prompt: String,
}

impl Default for SessionFactory {
    fn default() -> Self {
        Self::new(DEFAULT_SYSTEM_PROMPT)
    }
}

impl SessionFactory {
    pub fn new(system_prompt: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            system_prompt: system_prompt.into(),
        }
    }

    pub fn with_http_client(mut self, http: Client) -> Self {
        self.http = http;
        self
    }

    /// Create a session for `descriptor`.
    ///
    /// Local providers must answer the liveness probe. Hosted providers only
    /// need a non-blank credential; it is not checked against the remote
    /// service here, so a bad key shows up on the first chat.
    pub async fn connect(
        &self,
        descriptor: &ProviderDescriptor,
        credential: Option<&str>,
    ) -> Result<Session, ConnectError> {
        match &descriptor.kind {
            ProviderKind::Local {
                endpoint,
                probe_timeout,
            } => {
                let client = OllamaClient::new(&descriptor.id, endpoint, self.http.clone());
                client.probe(*probe_timeout).await.map_err(|error| {
                    ConnectError::ServiceUnavailable {
                        provider: descriptor.id.clone(),
                        endpoint: endpoint.clone(),
                        reason: error.to_string(),
                    }
                })?;

                info!(
                    provider = descriptor.id.as_str(),
                    model = descriptor.model_id.as_str(),
                    "Local model service is reachable"
                );
                Ok(
                    Session::new(&descriptor.id, &descriptor.model_id, Box::new(client))
                        .with_system_prompt(self.system_prompt.clone()),
                )
            }
            ProviderKind::Hosted {
                endpoint,
                api_path,
                temperature,
                api_key_env,
            } => {
                let key = resolve_credential(&descriptor.id, credential, api_key_env.as_deref())
                    .ok_or_else(|| ConnectError::MissingCredential {
                        provider: descriptor.id.clone(),
                    })?;

                let client = OpenAIClient::new(
                    &descriptor.id,
                    endpoint,
                    SecretString::new(key.into()),
                    self.http.clone(),
                )
                .with_api_path(api_path.clone())
                .with_temperature(*temperature);

                info!(
                    provider = descriptor.id.as_str(),
                    model = descriptor.model_id.as_str(),
                    temperature = *temperature,
                    "Hosted session created; credential will be checked on first use"
                );
                Ok(Session::new(
                    &descriptor.id,
                    &descriptor.model_id,
                    Box::new(client),
                ))
            }
        }
    }
}
