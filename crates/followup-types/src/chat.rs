//! Chat domain types: persisted exchanges and the result of a chat turn.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::llm::Message;

/// Store-assigned identifier of an exchange.
///
/// Monotonically increasing within the store; doubles as the ordering key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExchangeId(pub i64);

impl fmt::Display for ExchangeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One persisted (user message, model response) pair of a session.
///
/// Written once after a successful model call and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exchange {
    pub id: ExchangeId,
    pub session_id: String,
    pub user_message: String,
    pub ai_response: String,
}

/// Result of a successful chat turn.
#[derive(Debug, Clone)]
pub struct ChatOutcome {
    /// The model's reply to the new message.
    pub response: String,
    /// Full transcript: system entry, prior pairs, the new user entry and the reply.
    pub messages: Vec<Message>,
    /// Identifier the new exchange was stored under.
    pub exchange_id: Option<ExchangeId>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exchange_id_is_transparent() {
        let json = serde_json::to_string(&ExchangeId(42)).unwrap();
        assert_eq!(json, "42");
        assert_eq!(ExchangeId(42).to_string(), "42");
    }

    #[test]
    fn test_exchange_ids_order_by_value() {
        let mut ids = vec![ExchangeId(3), ExchangeId(1), ExchangeId(2)];
        ids.sort();
        assert_eq!(ids, vec![ExchangeId(1), ExchangeId(2), ExchangeId(3)]);
    }
}
