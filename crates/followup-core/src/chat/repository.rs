//! SessionRepository trait definition.
//!
//! Sessions are keyed by a client-supplied string and own an ordered list of
//! immutable exchanges. Deletes are idempotent: removing something that is
//! not there is not an error.

use followup_types::chat::{Exchange, ExchangeId};
use followup_types::error::RepositoryError;

/// Repository trait for session and exchange persistence.
///
/// Implementations live in followup-infra (e.g., `SqliteSessionRepository`).
/// Uses native async fn in traits (RPITIT, Rust 2024 edition).
pub trait SessionRepository: Send + Sync {
    /// Insert the session if it does not exist yet. Idempotent.
    fn ensure_session(
        &self,
        session_id: &str,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// Append a completed exchange and return its identifier.
    fn append_exchange(
        &self,
        session_id: &str,
        user_message: &str,
        ai_response: &str,
    ) -> impl std::future::Future<Output = Result<ExchangeId, RepositoryError>> + Send;

    /// All exchanges of a session in creation order. Empty for unknown sessions.
    fn list_exchanges(
        &self,
        session_id: &str,
    ) -> impl std::future::Future<Output = Result<Vec<Exchange>, RepositoryError>> + Send;

    /// Remove every exchange of a session, keeping the session itself.
    fn delete_all_exchanges(
        &self,
        session_id: &str,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// Remove one exchange of a session if it exists.
    fn delete_exchange(
        &self,
        session_id: &str,
        exchange_id: ExchangeId,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;
}
