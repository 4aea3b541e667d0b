//! Model handler: owns at most one provider session and routes prompts to it.

use super::prompt::build_travel_prompt;
use crate::config::AppConfig;
use crate::domain::TravelContext;
use crate::infrastructure::model::{
    ConnectError, ModelError, ProviderDescriptor, ProviderRegistry, RegistryError, Session,
    SessionFactory,
};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, error, info, warn};

#[derive(Debug, Error)]
pub enum HandlerError {
    #[error("unsupported model type: {provider}")]
    UnknownProvider { provider: String },
    #[error("local provider '{provider}' is not reachable at {endpoint}: {reason}")]
    ServiceUnavailable {
        provider: String,
        endpoint: String,
        reason: String,
    },
    #[error("provider '{provider}' requires an API key")]
    MissingCredential { provider: String },
    #[error("no model initialized; call initialize_model first")]
    NotInitialized,
    #[error("error during chat with '{provider}': {source}")]
    ChatDispatchFailed {
        provider: String,
        #[source]
        source: ModelError,
    },
}

impl HandlerError {
    /// Message suitable for showing to an end user, with guidance.
    pub fn user_message(&self) -> String {
        match self {
            HandlerError::UnknownProvider { provider } => {
                format!("Model provider '{provider}' is not configured.")
            }
            HandlerError::ServiceUnavailable { provider, endpoint, .. } => format!(
                "Provider '{provider}' is not running at {endpoint}. Start it (for Ollama: `ollama serve`) and try again."
            ),
            HandlerError::MissingCredential { provider } => {
                format!("Provider '{provider}' requires an API key. Please supply one.")
            }
            HandlerError::NotInitialized => {
                "No model selected yet. Choose a provider first.".to_string()
            }
            HandlerError::ChatDispatchFailed { source, .. } => source.user_message(),
        }
    }
}

impl From<RegistryError> for HandlerError {
    fn from(error: RegistryError) -> Self {
        match error {
            RegistryError::UnknownProvider { provider } => Self::UnknownProvider { provider },
        }
    }
}

impl From<ConnectError> for HandlerError {
    fn from(error: ConnectError) -> Self {
        match error {
            ConnectError::ServiceUnavailable {
                provider,
                endpoint,
                reason,
            } => Self::ServiceUnavailable {
                provider,
                endpoint,
                reason,
            },
            ConnectError::MissingCredential { provider } => Self::MissingCredential { provider },
        }
    }
}

/// Observable handler state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandlerState {
    Uninitialized,
    Ready { provider: String },
}

struct ActiveSession {
    descriptor: ProviderDescriptor,
    session: Session,
}

/// Stateful facade over the provider registry and the active session.
///
/// A failed `initialize_model` never disturbs the session that was active
/// before the call.
pub struct ModelHandler {
    registry: Arc<ProviderRegistry>,
    factory: SessionFactory,
    active: Option<ActiveSession>,
}

impl ModelHandler {
    pub fn new(registry: Arc<ProviderRegistry>, factory: SessionFactory) -> Self {
        Self {
            registry,
            factory,
            active: None,
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            Arc::new(ProviderRegistry::from_config(config)),
            SessionFactory::new(config.system_prompt.clone()),
        )
    }

    pub fn registry(&self) -> &ProviderRegistry {
        &self.registry
    }

    pub fn state(&self) -> HandlerState {
        match &self.active {
            None => HandlerState::Uninitialized,
            Some(active) => HandlerState::Ready {
                provider: active.descriptor.id.clone(),
            },
        }
    }

    pub fn is_ready(&self) -> bool {
        self.active.is_some()
    }

    /// Open a session with `provider_id`, replacing the active one on success.
    pub async fn initialize_model(
        &mut self,
        provider_id: &str,
        credential: Option<&str>,
    ) -> Result<&Session, HandlerError> {
        let descriptor = self.registry.lookup(provider_id)?.clone();
        info!(
            provider = provider_id,
            family = descriptor.family().as_str(),
            model = descriptor.model_id.as_str(),
            "Initializing model"
        );

        let session = match self.factory.connect(&descriptor, credential).await {
            Ok(session) => session,
            Err(error) => {
                warn!(
                    provider = provider_id,
                    %error,
                    retained = self.active.as_ref().map(|a| a.descriptor.id.as_str()),
                    "Model initialization failed"
                );
                return Err(error.into());
            }
        };

        let previous = self.active.take().map(|old| old.descriptor.id);
        debug!(provider = provider_id, ?previous, "Active session replaced");

        let active = self.active.insert(ActiveSession {
            descriptor,
            session,
        });
        Ok(&active.session)
    }

    /// Send `prompt`, enriched with `context`, to the active session.
    pub async fn chat(
        &self,
        prompt: &str,
        context: Option<&TravelContext>,
    ) -> Result<String, HandlerError> {
        let active = self.active.as_ref().ok_or(HandlerError::NotInitialized)?;
        let effective = build_travel_prompt(prompt, context);
        debug!(
            provider = active.descriptor.id.as_str(),
            augmented = effective.len() != prompt.len(),
            "Built effective prompt"
        );

        active.session.send(&effective).await.map_err(|source| {
            error!(provider = active.descriptor.id.as_str(), error = %source, "Chat dispatch failed");
            HandlerError::ChatDispatchFailed {
                provider: active.descriptor.id.clone(),
                source,
            }
        })
    }

    pub fn current_provider(&self) -> Result<&ProviderDescriptor, HandlerError> {
        self.active
            .as_ref()
            .map(|active| &active.descriptor)
            .ok_or(HandlerError::NotInitialized)
    }

    pub fn session(&self) -> Option<&Session> {
        self.active.as_ref().map(|active| &active.session)
    }
}
