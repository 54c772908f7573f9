//! Connection settings for OpenAI-compatible chat completion endpoints.

use secrecy::SecretString;

use followup_types::config::ModelConfig;

/// Configuration for an OpenAI-compatible LLM provider.
///
/// Used to construct an [`super::OpenAiCompatibleProvider`].
pub struct OpenAiCompatConfig {
    /// Human-readable provider name (e.g., "huggingface", "openai").
    pub provider_name: String,
    /// Base URL for the API (e.g., "https://router.huggingface.co/v1").
    pub base_url: String,
    /// API key; `None` for endpoints that need no authentication.
    pub api_key: Option<SecretString>,
    /// Default model identifier.
    pub model: String,
}

impl OpenAiCompatConfig {
    /// Build from the `[model]` section of the app config.
    pub fn from_model_config(config: &ModelConfig, api_key: Option<SecretString>) -> Self {
        Self {
            provider_name: config.provider_name.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key,
            model: config.model.clone(),
        }
    }
}
