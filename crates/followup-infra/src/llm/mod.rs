//! LLM provider implementations.
//!
//! Contains the OpenAI-compatible implementation of the [`LlmProvider`]
//! trait defined in `followup-core`, plus the factory that builds it from
//! the `[model]` configuration section.
//!
//! [`LlmProvider`]: followup_core::llm::provider::LlmProvider

pub mod openai_compat;

use secrecy::SecretString;

use followup_core::llm::box_provider::BoxLlmProvider;
use followup_types::config::ModelConfig;
use followup_types::llm::LlmError;

use self::openai_compat::OpenAiCompatibleProvider;
use self::openai_compat::config::OpenAiCompatConfig;

/// Read the API key named by `config.api_key_env` from the environment.
///
/// An empty `api_key_env` means the endpoint needs no key. A named but unset
/// (or blank) variable is an authentication failure.
pub fn resolve_api_key(config: &ModelConfig) -> Result<Option<SecretString>, LlmError> {
    if config.api_key_env.is_empty() {
        return Ok(None);
    }

    match std::env::var(&config.api_key_env) {
        Ok(key) if !key.trim().is_empty() => Ok(Some(SecretString::from(key))),
        _ => {
            tracing::error!(var = %config.api_key_env, "API key environment variable is not set");
            Err(LlmError::AuthenticationFailed)
        }
    }
}

/// Create a [`BoxLlmProvider`] for the configured endpoint.
pub fn create_provider(config: &ModelConfig, api_key: Option<SecretString>) -> BoxLlmProvider {
    let provider =
        OpenAiCompatibleProvider::new(OpenAiCompatConfig::from_model_config(config, api_key));
    tracing::info!(
        provider = %config.provider_name,
        model = %provider.model(),
        base_url = %config.base_url,
        "Model endpoint configured"
    );
    BoxLlmProvider::new(provider)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_api_key_disabled() {
        let config = ModelConfig {
            api_key_env: String::new(),
            ..ModelConfig::default()
        };
        assert!(resolve_api_key(&config).unwrap().is_none());
    }

    #[test]
    fn test_resolve_api_key_missing_variable() {
        let config = ModelConfig {
            api_key_env: "FOLLOWUP_TEST_KEY_THAT_IS_NEVER_SET".to_string(),
            ..ModelConfig::default()
        };
        let result = resolve_api_key(&config);
        assert!(matches!(result, Err(LlmError::AuthenticationFailed)));
    }

    #[test]
    fn test_create_provider_uses_configured_name() {
        let config = ModelConfig {
            provider_name: "local".to_string(),
            base_url: "http://localhost:8080/v1".to_string(),
            ..ModelConfig::default()
        };
        let provider = create_provider(&config, None);
        assert_eq!(provider.name(), "local");
    }
}
