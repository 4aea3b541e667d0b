use super::defaults::{
    DEFAULT_BUDGET_OPTIONS, DEFAULT_HOST, DEFAULT_INTERESTS, DEFAULT_MAX_PORT_ATTEMPTS,
    DEFAULT_START_PORT,
};
use super::error::ConfigError;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// REST listener settings.
///
/// The listener binds the first free port in
/// `start_port..start_port + max_port_attempts`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RestServerConfig {
    pub host: String,
    pub start_port: u16,
    pub max_port_attempts: u16,
    /// Allowed CORS origins; empty means any origin
    pub cors_origins: Vec<String>,
}

impl Default for RestServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            start_port: DEFAULT_START_PORT,
            max_port_attempts: DEFAULT_MAX_PORT_ATTEMPTS,
            cors_origins: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(super) struct RawRestServerConfig {
    host: Option<String>,
    start_port: Option<u16>,
    max_port_attempts: Option<u16>,
    #[serde(default)]
    cors_origins: Vec<String>,
}

impl TryFrom<RawRestServerConfig> for RestServerConfig {
    type Error = ConfigError;

    fn try_from(raw: RawRestServerConfig) -> Result<Self, Self::Error> {
        let defaults = Self::default();
        let start = raw.start_port.unwrap_or(defaults.start_port);
        let attempts = raw.max_port_attempts.unwrap_or(defaults.max_port_attempts);
        if attempts == 0 || u32::from(start) + u32::from(attempts) - 1 > u32::from(u16::MAX) {
            return Err(ConfigError::InvalidPortRange { start, attempts });
        }

        Ok(Self {
            host: raw.host.unwrap_or(defaults.host),
            start_port: start,
            max_port_attempts: attempts,
            cors_origins: raw.cors_origins,
        })
    }
}

/// Option lists offered by the UI for travel preferences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TravelOptions {
    pub interests: Vec<String>,
    pub budget_options: Vec<String>,
}

impl Default for TravelOptions {
    fn default() -> Self {
        Self {
            interests: DEFAULT_INTERESTS.iter().map(|s| s.to_string()).collect(),
            budget_options: DEFAULT_BUDGET_OPTIONS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(super) struct RawTravelOptions {
    interests: Option<Vec<String>>,
    budget_options: Option<Vec<String>>,
}

impl From<RawTravelOptions> for TravelOptions {
    fn from(raw: RawTravelOptions) -> Self {
        let defaults = Self::default();
        Self {
            interests: raw.interests.unwrap_or(defaults.interests),
            budget_options: raw.budget_options.unwrap_or(defaults.budget_options),
        }
    }
}
