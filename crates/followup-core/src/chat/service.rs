//! Chat service orchestrating a single chat turn.
//!
//! ChatService coordinates the SessionRepository and the LLM provider:
//! ensure the session, load its history, ask the model, and persist the new
//! exchange. It keeps no conversation state of its own; continuity is
//! re-derived from storage on every call.

use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;
use tokio::sync::{Mutex, MutexGuard};
use tracing::{debug, info, warn};

use followup_types::chat::{ChatOutcome, Exchange, ExchangeId};
use followup_types::config::{DEFAULT_SYSTEM_PROMPT, ModelConfig};
use followup_types::error::{ChatError, RepositoryError};
use followup_types::llm::{CompletionRequest, LlmError, Message};

use crate::chat::repository::SessionRepository;
use crate::chat::transcript::build_transcript;
use crate::llm::box_provider::BoxLlmProvider;

/// Per-turn model settings.
#[derive(Debug, Clone)]
pub struct ChatSettings {
    pub system_prompt: String,
    /// Model override; empty uses the provider's default.
    pub model: String,
    pub max_tokens: u32,
    pub temperature: Option<f64>,
    pub request_timeout: Duration,
}

impl Default for ChatSettings {
    fn default() -> Self {
        Self {
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
            model: String::new(),
            max_tokens: 2000,
            temperature: None,
            request_timeout: Duration::from_secs(120),
        }
    }
}

impl From<&ModelConfig> for ChatSettings {
    fn from(config: &ModelConfig) -> Self {
        Self {
            system_prompt: config.system_prompt.clone(),
            model: String::new(),
            max_tokens: config.max_tokens,
            temperature: config.temperature,
            request_timeout: Duration::from_secs(config.request_timeout_secs),
        }
    }
}

/// Orchestrates chat turns and followup management.
///
/// Generic over `SessionRepository` to maintain clean architecture
/// (followup-core never depends on followup-infra).
pub struct ChatService<R: SessionRepository> {
    repo: R,
    provider: BoxLlmProvider,
    settings: ChatSettings,
    session_locks: DashMap<String, Arc<Mutex<()>>>,
}

impl<R: SessionRepository> ChatService<R> {
    /// Create a new chat service with the given repository and provider.
    pub fn new(repo: R, provider: BoxLlmProvider, settings: ChatSettings) -> Self {
        Self {
            repo,
            provider,
            settings,
            session_locks: DashMap::new(),
        }
    }

    /// Access the session repository.
    pub fn repo(&self) -> &R {
        &self.repo
    }

    /// Run one chat turn for `session_id`.
    ///
    /// Turns for the same session run one at a time so each sees the
    /// exchanges of the previous one. Nothing is persisted unless the model
    /// call succeeds.
    pub async fn handle_chat(
        &self,
        session_id: &str,
        user_message: &str,
    ) -> Result<ChatOutcome, ChatError> {
        let entry = self.session_lock(session_id);
        let _turn = entry.lock().await;
        self.run_turn(session_id, user_message).await
    }

    async fn run_turn(&self, session_id: &str, user_message: &str) -> Result<ChatOutcome, ChatError> {
        self.repo.ensure_session(session_id).await?;

        let history = self.repo.list_exchanges(session_id).await?;
        let mut messages = build_transcript(&self.settings.system_prompt, &history, user_message);

        debug!(
            session_id,
            history_len = history.len(),
            provider = self.provider.name(),
            "Invoking model"
        );

        let response = self.invoke_model(&messages).await.inspect_err(|e| {
            warn!(session_id, error = %e, "Model invocation failed; exchange not stored");
        })?;

        let exchange_id = self
            .repo
            .append_exchange(session_id, user_message, &response)
            .await?;

        info!(session_id, exchange_id = %exchange_id, "Exchange stored");

        messages.push(Message::assistant(response.as_str()));

        Ok(ChatOutcome {
            response,
            messages,
            exchange_id: Some(exchange_id),
        })
    }

    async fn invoke_model(&self, messages: &[Message]) -> Result<String, LlmError> {
        let request = CompletionRequest {
            model: self.settings.model.clone(),
            messages: messages.to_vec(),
            max_tokens: self.settings.max_tokens,
            temperature: self.settings.temperature,
        };

        let timeout = self.settings.request_timeout;
        let response = tokio::time::timeout(timeout, self.provider.complete(&request))
            .await
            .map_err(|_| LlmError::Timeout(timeout.as_secs()))??;

        if response.content.trim().is_empty() {
            return Err(LlmError::EmptyResponse);
        }

        debug!(
            model = %response.model,
            input_tokens = response.usage.input_tokens,
            output_tokens = response.usage.output_tokens,
            "Model responded"
        );

        Ok(response.content)
    }

    // --- Followup management ---

    /// All stored exchanges of a session, oldest first.
    pub async fn list_exchanges(&self, session_id: &str) -> Result<Vec<Exchange>, RepositoryError> {
        self.repo.list_exchanges(session_id).await
    }

    /// Delete every exchange of a session.
    pub async fn delete_all_exchanges(&self, session_id: &str) -> Result<(), RepositoryError> {
        self.repo.delete_all_exchanges(session_id).await?;
        info!(session_id, "Followups cleared");
        Ok(())
    }

    /// Delete one exchange of a session. Missing exchanges are ignored.
    pub async fn delete_exchange(
        &self,
        session_id: &str,
        exchange_id: ExchangeId,
    ) -> Result<(), RepositoryError> {
        self.repo.delete_exchange(session_id, exchange_id).await?;
        info!(session_id, exchange_id = %exchange_id, "Followup deleted");
        Ok(())
    }

    // --- Per-session serialization ---

    fn session_lock(&self, session_id: &str) -> SessionLockEntry<'_> {
        let lock = self
            .session_locks
            .entry(session_id.to_string())
            .or_default()
            .value()
            .clone();
        SessionLockEntry {
            locks: &self.session_locks,
            session_id: session_id.to_string(),
            lock: Some(lock),
        }
    }
}

/// Handle on one session's turn lock.
///
/// Dropping it (including when the turn future is cancelled) removes the map
/// entry once no other turn holds a handle.
struct SessionLockEntry<'a> {
    locks: &'a DashMap<String, Arc<Mutex<()>>>,
    session_id: String,
    lock: Option<Arc<Mutex<()>>>,
}

impl SessionLockEntry<'_> {
    async fn lock(&self) -> Option<MutexGuard<'_, ()>> {
        match &self.lock {
            Some(lock) => Some(lock.lock().await),
            None => None,
        }
    }
}

impl Drop for SessionLockEntry<'_> {
    fn drop(&mut self) {
        drop(self.lock.take());
        self.locks
            .remove_if(&self.session_id, |_, lock| Arc::strong_count(lock) == 1);
    }
}
