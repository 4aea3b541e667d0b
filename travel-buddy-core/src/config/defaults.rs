pub const DEFAULT_OLLAMA_ID: &str = "ollama";
pub const DEFAULT_OLLAMA_MODEL: &str = "deepseek-r1";
pub const DEFAULT_OLLAMA_ENDPOINT: &str = "http://localhost:11434";

pub const DEFAULT_OPENAI_ID: &str = "openai";
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-3.5-turbo";
pub const DEFAULT_OPENAI_ENDPOINT: &str = "https://api.openai.com";
pub const DEFAULT_OPENAI_KEY_ENV: &str = "OPENAI_API_KEY";

pub const DEFAULT_TEMPERATURE: f32 = 0.7;
pub const DEFAULT_PROBE_TIMEOUT_SECS: u64 = 5;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_START_PORT: u16 = 8000;
pub const DEFAULT_MAX_PORT_ATTEMPTS: u16 = 100;

pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a helpful travel assistant. Help users plan their trips, suggest destinations, activities, and provide travel tips.";

pub const DEFAULT_INTERESTS: &[&str] = &[
    "Culture",
    "Food",
    "Adventure",
    "Nature",
    "Shopping",
    "Relaxation",
];

pub const DEFAULT_BUDGET_OPTIONS: &[&str] = &["Not specified", "Budget", "Mid-range", "Luxury"];
