//! Application configuration types for Followup.
//!
//! `AppConfig` represents the `config.toml` in the data directory. Every
//! field has a default, so an empty or missing file yields a working
//! configuration pointed at the Hugging Face inference router.

use serde::{Deserialize, Serialize};

/// System prompt placed at the head of every transcript unless overridden.
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a helpful assistant";

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub database: DatabaseConfig,

    #[serde(default)]
    pub model: ModelConfig,
}

/// HTTP listener settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Database settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// sqlx connection URL. When absent, `sessions.db` in the data directory is used.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// Model endpoint settings (any OpenAI-compatible chat completions API).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Name reported in logs.
    #[serde(default = "default_provider_name")]
    pub provider_name: String,

    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,

    /// Environment variable holding the API key.
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,

    #[serde(default = "default_system_prompt")]
    pub system_prompt: String,

    /// Upper bound on a single model call.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_provider_name() -> String {
    "huggingface".to_string()
}

fn default_base_url() -> String {
    "https://router.huggingface.co/v1".to_string()
}

fn default_model() -> String {
    "mistralai/Mistral-7B-Instruct-v0.3".to_string()
}

fn default_max_tokens() -> u32 {
    2000
}

fn default_api_key_env() -> String {
    "HUGGINGFACEHUB_API_TOKEN".to_string()
}

fn default_system_prompt() -> String {
    DEFAULT_SYSTEM_PROMPT.to_string()
}

fn default_request_timeout_secs() -> u64 {
    120
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            provider_name: default_provider_name(),
            base_url: default_base_url(),
            model: default_model(),
            max_tokens: default_max_tokens(),
            temperature: None,
            api_key_env: default_api_key_env(),
            system_prompt: default_system_prompt(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}
