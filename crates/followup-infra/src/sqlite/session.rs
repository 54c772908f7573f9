//! SQLite session repository implementation.
//!
//! Implements `SessionRepository` from `followup-core` using sqlx with split
//! read/write pools: raw queries, a private Row struct, writes on the writer
//! pool and reads on the reader pool.

use followup_core::chat::repository::SessionRepository;
use followup_types::chat::{Exchange, ExchangeId};
use followup_types::error::RepositoryError;
use sqlx::Row;

use super::pool::DatabasePool;

/// SQLite-backed implementation of `SessionRepository`.
pub struct SqliteSessionRepository {
    pool: DatabasePool,
}

impl SqliteSessionRepository {
    /// Create a new repository backed by the given database pool.
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

/// Internal row type for mapping SQLite rows to domain Exchange.
struct FollowupRow {
    id: i64,
    session_id: String,
    user_message: Option<String>,
    ai_response: Option<String>,
}

impl FollowupRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            session_id: row.try_get("session_id")?,
            user_message: row.try_get("user_message")?,
            ai_response: row.try_get("ai_response")?,
        })
    }

    fn into_exchange(self) -> Exchange {
        Exchange {
            id: ExchangeId(self.id),
            session_id: self.session_id,
            user_message: self.user_message.unwrap_or_default(),
            ai_response: self.ai_response.unwrap_or_default(),
        }
    }
}

fn map_sqlx_error(err: sqlx::Error) -> RepositoryError {
    match err {
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
            RepositoryError::Connection
        }
        other => RepositoryError::Query(other.to_string()),
    }
}

const INSERT_SESSION: &str = "INSERT OR IGNORE INTO sessions (session_id) VALUES (?)";

impl SessionRepository for SqliteSessionRepository {
    async fn ensure_session(&self, session_id: &str) -> Result<(), RepositoryError> {
        sqlx::query(INSERT_SESSION)
            .bind(session_id)
            .execute(&self.pool.writer)
            .await
            .map_err(map_sqlx_error)?;

        Ok(())
    }

    async fn append_exchange(
        &self,
        session_id: &str,
        user_message: &str,
        ai_response: &str,
    ) -> Result<ExchangeId, RepositoryError> {
        let mut tx = self.pool.writer.begin().await.map_err(map_sqlx_error)?;

        // Parent row first so the foreign key holds even for direct callers.
        sqlx::query(INSERT_SESSION)
            .bind(session_id)
            .execute(&mut *tx)
            .await
            .map_err(map_sqlx_error)?;

        let result = sqlx::query(
            "INSERT INTO followups (session_id, user_message, ai_response) VALUES (?, ?, ?)",
        )
        .bind(session_id)
        .bind(user_message)
        .bind(ai_response)
        .execute(&mut *tx)
        .await
        .map_err(map_sqlx_error)?;

        tx.commit().await.map_err(map_sqlx_error)?;

        Ok(ExchangeId(result.last_insert_rowid()))
    }

    async fn list_exchanges(&self, session_id: &str) -> Result<Vec<Exchange>, RepositoryError> {
        let rows = sqlx::query(
            "SELECT id, session_id, user_message, ai_response FROM followups WHERE session_id = ? ORDER BY id ASC",
        )
        .bind(session_id)
        .fetch_all(&self.pool.reader)
        .await
        .map_err(map_sqlx_error)?;

        let mut exchanges = Vec::with_capacity(rows.len());
        for row in &rows {
            let followup = FollowupRow::from_row(row).map_err(map_sqlx_error)?;
            exchanges.push(followup.into_exchange());
        }

        Ok(exchanges)
    }

    async fn delete_all_exchanges(&self, session_id: &str) -> Result<(), RepositoryError> {
        sqlx::query("DELETE FROM followups WHERE session_id = ?")
            .bind(session_id)
            .execute(&self.pool.writer)
            .await
            .map_err(map_sqlx_error)?;

        Ok(())
    }

    async fn delete_exchange(
        &self,
        session_id: &str,
        exchange_id: ExchangeId,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM followups WHERE session_id = ? AND id = ?")
            .bind(session_id)
            .bind(exchange_id.0)
            .execute(&self.pool.writer)
            .await
            .map_err(map_sqlx_error)?;

        if result.rows_affected() == 0 {
            tracing::debug!(session_id, exchange_id = %exchange_id, "No followup matched delete");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn test_pool() -> DatabasePool {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("test.db");
        let url = format!("sqlite://{}?mode=rwc", db_path.display());
        // Leak tempdir so it lives for the test
        std::mem::forget(dir);
        DatabasePool::new(&url).await.unwrap()
    }

    async fn session_rows(pool: &DatabasePool, session_id: &str) -> i64 {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM sessions WHERE session_id = ?")
            .bind(session_id)
            .fetch_one(&pool.reader)
            .await
            .unwrap();
        row.0
    }

    #[tokio::test]
    async fn test_ensure_session_is_idempotent() {
        let pool = test_pool().await;
        let repo = SqliteSessionRepository::new(pool.clone());

        repo.ensure_session("s1").await.unwrap();
        repo.ensure_session("s1").await.unwrap();

        assert_eq!(session_rows(&pool, "s1").await, 1);
    }

    #[tokio::test]
    async fn test_list_unknown_session_is_empty() {
        let pool = test_pool().await;
        let repo = SqliteSessionRepository::new(pool);

        let exchanges = repo.list_exchanges("never-seen").await.unwrap();
        assert!(exchanges.is_empty());
    }

    #[tokio::test]
    async fn test_append_and_list_in_order() {
        let pool = test_pool().await;
        let repo = SqliteSessionRepository::new(pool);
        repo.ensure_session("s1").await.unwrap();

        let first = repo.append_exchange("s1", "one", "uno").await.unwrap();
        let second = repo.append_exchange("s1", "two", "dos").await.unwrap();
        let third = repo.append_exchange("s1", "three", "tres").await.unwrap();
        assert!(first < second && second < third);

        let exchanges = repo.list_exchanges("s1").await.unwrap();
        let pairs: Vec<(&str, &str)> = exchanges
            .iter()
            .map(|e| (e.user_message.as_str(), e.ai_response.as_str()))
            .collect();
        assert_eq!(pairs, vec![("one", "uno"), ("two", "dos"), ("three", "tres")]);
        assert_eq!(exchanges[0].id, first);
        assert_eq!(exchanges[2].session_id, "s1");
    }

    #[tokio::test]
    async fn test_append_creates_missing_session() {
        let pool = test_pool().await;
        let repo = SqliteSessionRepository::new(pool.clone());

        repo.append_exchange("fresh", "q", "a").await.unwrap();

        assert_eq!(session_rows(&pool, "fresh").await, 1);
        assert_eq!(repo.list_exchanges("fresh").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_list_is_scoped_to_session() {
        let pool = test_pool().await;
        let repo = SqliteSessionRepository::new(pool);

        repo.append_exchange("s1", "a", "1").await.unwrap();
        repo.append_exchange("s2", "b", "2").await.unwrap();

        let s1 = repo.list_exchanges("s1").await.unwrap();
        assert_eq!(s1.len(), 1);
        assert_eq!(s1[0].user_message, "a");
    }

    #[tokio::test]
    async fn test_delete_all_keeps_session_row() {
        let pool = test_pool().await;
        let repo = SqliteSessionRepository::new(pool.clone());

        repo.append_exchange("s1", "a", "1").await.unwrap();
        repo.append_exchange("s1", "b", "2").await.unwrap();
        repo.delete_all_exchanges("s1").await.unwrap();

        assert!(repo.list_exchanges("s1").await.unwrap().is_empty());
        assert_eq!(session_rows(&pool, "s1").await, 1);

        // Deleting again is a no-op.
        repo.delete_all_exchanges("s1").await.unwrap();
    }

    #[tokio::test]
    async fn test_delete_exchange() {
        let pool = test_pool().await;
        let repo = SqliteSessionRepository::new(pool);

        let keep = repo.append_exchange("s1", "a", "1").await.unwrap();
        let drop_id = repo.append_exchange("s1", "b", "2").await.unwrap();

        repo.delete_exchange("s1", drop_id).await.unwrap();

        let remaining = repo.list_exchanges("s1").await.unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].id, keep);
    }

    #[tokio::test]
    async fn test_delete_missing_exchange_is_noop() {
        let pool = test_pool().await;
        let repo = SqliteSessionRepository::new(pool);

        repo.append_exchange("s1", "a", "1").await.unwrap();
        repo.delete_exchange("s1", ExchangeId(9_999)).await.unwrap();

        assert_eq!(repo.list_exchanges("s1").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_delete_exchange_requires_matching_session() {
        let pool = test_pool().await;
        let repo = SqliteSessionRepository::new(pool);

        let id = repo.append_exchange("s1", "a", "1").await.unwrap();
        repo.delete_exchange("other", id).await.unwrap();

        assert_eq!(repo.list_exchanges("s1").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_closed_pool_maps_to_connection_error() {
        let pool = test_pool().await;
        let repo = SqliteSessionRepository::new(pool.clone());
        pool.close().await;

        let err = repo.ensure_session("s1").await.unwrap_err();
        assert!(matches!(err, RepositoryError::Connection));
    }
}
