//! Provider registry: the static table of providers a session can bind to.
//!
//! The registry is built once from configuration and never mutated, so it
//! can be shared behind an `Arc` by any number of readers.

use crate::config::{AppConfig, ProviderConfig, ProviderFamily};
use serde::Serialize;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("unknown provider '{provider}'")]
    UnknownProvider { provider: String },
}

/// Family-specific parameters needed to open a session.
#[derive(Debug, Clone, PartialEq)]
pub enum ProviderKind {
    /// Local service, checked with a liveness probe before use.
    Local {
        endpoint: String,
        probe_timeout: Duration,
    },
    /// Credentialed hosted API.
    Hosted {
        endpoint: String,
        api_path: Option<String>,
        temperature: f32,
        api_key_env: Option<String>,
    },
}

impl ProviderKind {
    pub fn family(&self) -> ProviderFamily {
        match self {
            Self::Local { .. } => ProviderFamily::Local,
            Self::Hosted { .. } => ProviderFamily::Hosted,
        }
    }

    pub fn endpoint(&self) -> &str {
        match self {
            Self::Local { endpoint, .. } | Self::Hosted { endpoint, .. } => endpoint,
        }
    }
}

/// Immutable metadata describing one provider.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProviderDescriptor {
    pub id: String,
    pub display_name: String,
    pub model_id: String,
    pub description: String,
    #[serde(skip)]
    pub kind: ProviderKind,
}

impl ProviderDescriptor {
    pub fn family(&self) -> ProviderFamily {
        self.kind.family()
    }

    fn from_config(config: &ProviderConfig, probe_timeout: Duration) -> Self {
        let kind = match config.family {
            ProviderFamily::Local => ProviderKind::Local {
                endpoint: config.endpoint.clone(),
                probe_timeout,
            },
            ProviderFamily::Hosted => ProviderKind::Hosted {
                endpoint: config.endpoint.clone(),
                api_path: config.api_path.clone(),
                temperature: config.temperature,
                api_key_env: config.api_key_env.clone(),
            },
        };

        Self {
            id: config.id.clone(),
            display_name: config.display_name.clone(),
            model_id: config.model.clone(),
            description: config.description.clone(),
            kind,
        }
    }
}

/// Lookup table from provider id to descriptor, in configuration order.
#[derive(Debug, Clone, Default)]
pub struct ProviderRegistry {
    providers: Vec<ProviderDescriptor>,
}

impl ProviderRegistry {
    pub fn new(providers: Vec<ProviderDescriptor>) -> Self {
        Self { providers }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            config
                .providers
                .iter()
                .map(|p| ProviderDescriptor::from_config(p, config.probe_timeout))
                .collect(),
        )
    }

    pub fn lookup(&self, provider_id: &str) -> Result<&ProviderDescriptor, RegistryError> {
        self.providers
            .iter()
            .find(|p| p.id == provider_id)
            .ok_or_else(|| RegistryError::UnknownProvider {
                provider: provider_id.to_string(),
            })
    }

    pub fn contains(&self, provider_id: &str) -> bool {
        self.lookup(provider_id).is_ok()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ProviderDescriptor> {
        self.providers.iter()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.providers.iter().map(|p| p.id.as_str())
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}
