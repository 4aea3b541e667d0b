//! # Provider Configuration
//!
//! Configuration types for the model providers a session can be bound to.
//!
//! ## Provider Types
//!
//! | Type | Family | Credential Required |
//! |------|--------|---------------------|
//! | `ollama`, `local` | local service, checked with a liveness probe | No |
//! | `openai`, `hosted` | OpenAI-compatible hosted API | Yes |

use super::defaults::{
    DEFAULT_OLLAMA_ENDPOINT, DEFAULT_OLLAMA_ID, DEFAULT_OLLAMA_MODEL, DEFAULT_OPENAI_ENDPOINT,
    DEFAULT_OPENAI_ID, DEFAULT_OPENAI_KEY_ENV, DEFAULT_OPENAI_MODEL, DEFAULT_TEMPERATURE,
};
use super::error::ConfigError;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Broad class of backend a provider belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ProviderFamily {
    /// A model service running on the local machine (Ollama).
    Local,
    /// A credentialed hosted API (OpenAI-compatible).
    Hosted,
}

impl ProviderFamily {
    /// Infer the family from a provider `type` string (case-insensitive).
    ///
    /// ```
    /// use travel_buddy_core::config::ProviderFamily;
    ///
    /// assert_eq!(ProviderFamily::from_type("OLLAMA"), Some(ProviderFamily::Local));
    /// assert_eq!(ProviderFamily::from_type("openai"), Some(ProviderFamily::Hosted));
    /// assert_eq!(ProviderFamily::from_type("gemini"), None);
    /// ```
    pub fn from_type(provider_type: &str) -> Option<Self> {
        match provider_type.trim().to_lowercase().as_str() {
            "ollama" | "local" => Some(Self::Local),
            "openai" | "hosted" => Some(Self::Hosted),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Local => "local",
            Self::Hosted => "hosted",
        }
    }
}

/// Configuration for a single model provider.
///
/// # Example
///
/// ```toml
/// [[providers]]
/// id = "openai"
/// type = "openai"
/// display_name = "OpenAI GPT"
/// model = "gpt-3.5-turbo"
/// endpoint = "https://api.openai.com"
/// temperature = 0.7
/// api_key_env = "OPENAI_API_KEY"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProviderConfig {
    /// Unique identifier used to select this provider (e.g. "ollama")
    pub id: String,
    pub family: ProviderFamily,
    pub display_name: String,
    /// Model identifier sent to the provider (e.g. "deepseek-r1")
    pub model: String,
    pub description: String,
    /// Base URL of the provider, `${VAR}` references already expanded
    pub endpoint: String,
    /// Chat path override for hosted providers
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_path: Option<String>,
    pub temperature: f32,
    /// Environment variable consulted when no credential is supplied
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key_env: Option<String>,
}

impl ProviderConfig {
    pub fn is_local(&self) -> bool {
        self.family == ProviderFamily::Local
    }

    pub fn is_hosted(&self) -> bool {
        self.family == ProviderFamily::Hosted
    }

    /// The built-in local provider.
    pub fn default_ollama() -> Self {
        Self {
            id: DEFAULT_OLLAMA_ID.to_string(),
            family: ProviderFamily::Local,
            display_name: "Ollama (DeepSeek R1)".to_string(),
            model: DEFAULT_OLLAMA_MODEL.to_string(),
            description: "Local model served by Ollama; no API key required".to_string(),
            endpoint: DEFAULT_OLLAMA_ENDPOINT.to_string(),
            api_path: None,
            temperature: DEFAULT_TEMPERATURE,
            api_key_env: None,
        }
    }

    /// The built-in hosted provider.
    pub fn default_openai() -> Self {
        Self {
            id: DEFAULT_OPENAI_ID.to_string(),
            family: ProviderFamily::Hosted,
            display_name: "OpenAI GPT".to_string(),
            model: DEFAULT_OPENAI_MODEL.to_string(),
            description: "OpenAI chat completions API; requires an API key".to_string(),
            endpoint: DEFAULT_OPENAI_ENDPOINT.to_string(),
            api_path: None,
            temperature: DEFAULT_TEMPERATURE,
            api_key_env: Some(DEFAULT_OPENAI_KEY_ENV.to_string()),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub(super) struct RawProviderConfig {
    pub(super) id: String,
    #[serde(rename = "type", default)]
    pub(super) provider_type: String,
    #[serde(default)]
    pub(super) display_name: Option<String>,
    #[serde(default)]
    pub(super) model: Option<String>,
    #[serde(default)]
    pub(super) description: Option<String>,
    #[serde(default)]
    pub(super) endpoint: Option<String>,
    #[serde(default)]
    pub(super) api_path: Option<String>,
    #[serde(default)]
    pub(super) temperature: Option<f32>,
    #[serde(default)]
    pub(super) api_key_env: Option<String>,
}

impl TryFrom<RawProviderConfig> for ProviderConfig {
    type Error = ConfigError;

    fn try_from(raw: RawProviderConfig) -> Result<Self, Self::Error> {
        let family =
            ProviderFamily::from_type(&raw.provider_type).ok_or_else(|| {
                ConfigError::UnknownProviderType {
                    provider: raw.id.clone(),
                    kind: raw.provider_type.clone(),
                }
            })?;
        let endpoint = raw.endpoint.ok_or_else(|| ConfigError::MissingEndpoint {
            provider: raw.id.clone(),
        })?;
        let model = raw
            .model
            .filter(|m| !m.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingModel {
                provider: raw.id.clone(),
            })?;
        let temperature = raw.temperature.unwrap_or(DEFAULT_TEMPERATURE);
        if !(0.0..=2.0).contains(&temperature) {
            return Err(ConfigError::InvalidTemperature {
                provider: raw.id,
                value: temperature,
            });
        }

        Ok(Self {
            display_name: raw.display_name.unwrap_or_else(|| raw.id.clone()),
            id: raw.id,
            family,
            model,
            description: raw.description.unwrap_or_default(),
            endpoint: expand(&endpoint),
            api_path: raw.api_path,
            temperature,
            api_key_env: raw.api_key_env.filter(|v| !v.trim().is_empty()),
        })
    }
}

fn expand(value: &str) -> String {
    shellexpand::full(value)
        .map(|cow| cow.into_owned())
        .unwrap_or_else(|_| value.to_string())
}
