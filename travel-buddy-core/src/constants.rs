//! Application constants
//!
//! Single source of truth for paths and other constants.

/// Default configuration file path
pub const CONFIG_PATH: &str = "config/travel.toml";

/// Default environment file path
pub const ENV_PATH: &str = "config/.env";

/// Liveness probe path served by a local Ollama instance
pub const OLLAMA_VERSION_PATH: &str = "/api/version";

/// Chat path served by a local Ollama instance
pub const OLLAMA_CHAT_PATH: &str = "/api/chat";

/// Default chat completions path for OpenAI-compatible providers
pub const OPENAI_CHAT_PATH: &str = "/v1/chat/completions";
