//! LlmProvider trait definition.
//!
//! This is the abstraction the model endpoint implements. The proxy makes
//! exactly one non-streaming call per chat turn, so the trait carries a
//! single `complete` operation.

use followup_types::llm::{CompletionRequest, CompletionResponse, LlmError};

/// Trait for LLM provider backends (Hugging Face router, OpenAI, etc.).
///
/// Uses native async fn in traits (RPITIT, Rust 2024 edition).
/// Implementations live in followup-infra (e.g., `OpenAiCompatibleProvider`).
pub trait LlmProvider: Send + Sync {
    /// Human-readable provider name (e.g., "huggingface", "openai").
    fn name(&self) -> &str;

    /// Send a completion request and receive the full response.
    fn complete(
        &self,
        request: &CompletionRequest,
    ) -> impl std::future::Future<Output = Result<CompletionResponse, LlmError>> + Send;
}
