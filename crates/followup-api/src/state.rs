//! Application state wiring the chat service together.
//!
//! `ChatService` is generic over its repository; AppState pins it to the
//! SQLite implementation.

use std::path::Path;
use std::sync::Arc;

use followup_core::chat::service::{ChatService, ChatSettings};
use followup_core::llm::box_provider::BoxLlmProvider;
use followup_infra::config::database_url;
use followup_infra::llm::{create_provider, resolve_api_key};
use followup_infra::sqlite::pool::DatabasePool;
use followup_infra::sqlite::session::SqliteSessionRepository;
use followup_types::config::AppConfig;

/// Concrete type alias for the service generic pinned to the infra implementation.
pub type ConcreteChatService = ChatService<SqliteSessionRepository>;

/// Shared application state handed to every request handler.
#[derive(Clone)]
pub struct AppState {
    pub chat_service: Arc<ConcreteChatService>,
    pub db_pool: DatabasePool,
}

impl AppState {
    /// Initialize the application state: connect to DB, build the provider, wire the service.
    pub async fn init(data_dir: &Path, config: &AppConfig) -> anyhow::Result<Self> {
        tokio::fs::create_dir_all(data_dir).await?;

        let db_url = database_url(config, data_dir);
        let db_pool = DatabasePool::new(&db_url).await?;

        let api_key = resolve_api_key(&config.model).map_err(|e| {
            anyhow::anyhow!(
                "{e}: set the {} environment variable (or `api_key_env = \"\"` for keyless endpoints)",
                config.model.api_key_env
            )
        })?;
        let provider = create_provider(&config.model, api_key);

        Ok(Self::from_parts(
            db_pool,
            provider,
            ChatSettings::from(&config.model),
        ))
    }

    /// Assemble state from already-built parts.
    pub fn from_parts(db_pool: DatabasePool, provider: BoxLlmProvider, settings: ChatSettings) -> Self {
        let repo = SqliteSessionRepository::new(db_pool.clone());
        let chat_service = ChatService::new(repo, provider, settings);

        Self {
            chat_service: Arc::new(chat_service),
            db_pool,
        }
    }
}
