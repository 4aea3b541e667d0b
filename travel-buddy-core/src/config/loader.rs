use super::AppConfig;
use super::defaults::{DEFAULT_PROBE_TIMEOUT_SECS, DEFAULT_SYSTEM_PROMPT};
use super::error::ConfigError;
use super::provider::{ProviderConfig, RawProviderConfig};
use super::server::{RawRestServerConfig, RawTravelOptions, RestServerConfig, TravelOptions};
use crate::constants::{CONFIG_PATH, ENV_PATH};
use dotenvy::from_filename;
use serde::Deserialize;
use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::Path;
use std::sync::Once;
use std::time::Duration;
use tracing::{debug, info};

static ENV_LOADER: Once = Once::new();

/// Raw configuration structure for deserialization from TOML
#[derive(Debug, Deserialize, Default)]
pub(super) struct RawConfig {
    default_provider: Option<String>,
    system_prompt: Option<String>,
    probe_timeout_secs: Option<u64>,
    #[serde(default)]
    server: RawRestServerConfig,
    #[serde(default)]
    travel: RawTravelOptions,
    providers: Option<Vec<RawProviderConfig>>,
}

/// Ensures environment variables are loaded from config/.env, then ./.env
pub fn ensure_env_loaded() {
    ENV_LOADER.call_once(|| {
        let _ = from_filename(ENV_PATH);
        let _ = dotenvy::dotenv();
    });
}

/// Load and validate configuration.
///
/// An explicit `path` must exist. When no path is given the default location
/// is tried and built-in defaults are used if it is absent.
pub fn load_config(path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    ensure_env_loaded();
    match path {
        Some(path) => read_config(path),
        None => match read_config(Path::new(CONFIG_PATH)) {
            Err(ConfigError::NotFound { path }) => {
                info!(path = %path.display(), "No configuration file found, using built-in defaults");
                Ok(AppConfig::default())
            }
            other => other,
        },
    }
}

fn read_config(path: &Path) -> Result<AppConfig, ConfigError> {
    debug!(path = %path.display(), "Reading travel configuration file");

    let content = fs::read_to_string(path).map_err(|source| {
        if source.kind() == io::ErrorKind::NotFound {
            ConfigError::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            ConfigError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;

    let parsed: RawConfig = toml::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    validate_and_build(parsed)
}

fn validate_and_build(parsed: RawConfig) -> Result<AppConfig, ConfigError> {
    let providers = match parsed.providers {
        None => AppConfig::default().providers,
        Some(raw) if raw.is_empty() => return Err(ConfigError::NoProvidersConfigured),
        Some(raw) => {
            let mut seen = HashSet::new();
            let mut providers = Vec::with_capacity(raw.len());
            for raw_provider in raw {
                if !seen.insert(raw_provider.id.clone()) {
                    return Err(ConfigError::DuplicateProvider {
                        provider: raw_provider.id,
                    });
                }
                providers.push(ProviderConfig::try_from(raw_provider)?);
            }
            providers
        }
    };

    if let Some(default_provider) = &parsed.default_provider {
        if !providers.iter().any(|p| &p.id == default_provider) {
            return Err(ConfigError::DefaultProviderNotFound {
                provider: default_provider.clone(),
            });
        }
    }

    Ok(AppConfig {
        default_provider: parsed.default_provider,
        system_prompt: parsed
            .system_prompt
            .unwrap_or_else(|| DEFAULT_SYSTEM_PROMPT.to_string()),
        probe_timeout: Duration::from_secs(
            parsed.probe_timeout_secs.unwrap_or(DEFAULT_PROBE_TIMEOUT_SECS),
        ),
        server: RestServerConfig::try_from(parsed.server)?,
        travel: TravelOptions::from(parsed.travel),
        providers,
    })
}
