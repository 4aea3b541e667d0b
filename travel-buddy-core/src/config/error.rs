use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when loading or validating configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("configuration file not found at {path:?}")]
    NotFound { path: PathBuf },

    #[error("failed to read config from {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse config from {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("no providers configured - at least one [[providers]] entry is required")]
    NoProvidersConfigured,

    #[error("provider '{provider}' is declared more than once")]
    DuplicateProvider { provider: String },

    #[error("provider '{provider}' is missing required field 'endpoint'")]
    MissingEndpoint { provider: String },

    #[error("provider '{provider}' is missing required field 'model'")]
    MissingModel { provider: String },

    #[error("provider '{provider}' has unsupported type '{kind}' (expected ollama or openai)")]
    UnknownProviderType { provider: String, kind: String },

    #[error("default provider '{provider}' not found in configured providers")]
    DefaultProviderNotFound { provider: String },

    #[error("provider '{provider}' has temperature {value} outside 0.0..=2.0")]
    InvalidTemperature { provider: String, value: f32 },

    #[error("invalid port range: {attempts} attempts starting at {start}")]
    InvalidPortRange { start: u16, attempts: u16 },
}
