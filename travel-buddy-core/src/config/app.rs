use super::defaults::{DEFAULT_PROBE_TIMEOUT_SECS, DEFAULT_SYSTEM_PROMPT};
use super::error::ConfigError;
use super::provider::ProviderConfig;
use super::server::{RestServerConfig, TravelOptions};
use std::path::Path;
use std::time::Duration;

/// Application configuration loaded from travel.toml
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Provider initialized at startup by front ends, if any
    pub default_provider: Option<String>,
    /// System preamble sent with every local-provider request
    pub system_prompt: String,
    /// Upper bound on the local liveness probe
    pub probe_timeout: Duration,
    pub server: RestServerConfig,
    pub travel: TravelOptions,
    pub providers: Vec<ProviderConfig>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            default_provider: None,
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
            probe_timeout: Duration::from_secs(DEFAULT_PROBE_TIMEOUT_SECS),
            server: RestServerConfig::default(),
            travel: TravelOptions::default(),
            providers: vec![
                ProviderConfig::default_ollama(),
                ProviderConfig::default_openai(),
            ],
        }
    }
}

impl AppConfig {
    /// Load configuration from a file path (or default path if None)
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        super::loader::load_config(path)
    }

    pub fn provider(&self, id: &str) -> Option<&ProviderConfig> {
        self.providers.iter().find(|p| p.id == id)
    }
}
