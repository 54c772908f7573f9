//! Transcript assembly for a chat turn.
//!
//! The model sees a system entry, then every stored exchange as a
//! user/assistant pair in creation order, then the new user message.

use followup_types::chat::Exchange;
use followup_types::llm::Message;

/// Build the transcript sent to the model for `user_message`.
pub fn build_transcript(system_prompt: &str, history: &[Exchange], user_message: &str) -> Vec<Message> {
    let mut messages = Vec::with_capacity(history.len() * 2 + 2);
    messages.push(Message::system(system_prompt));

    for exchange in history {
        messages.push(Message::user(exchange.user_message.as_str()));
        messages.push(Message::assistant(exchange.ai_response.as_str()));
    }

    messages.push(Message::user(user_message));
    messages
}

#[cfg(test)]
mod tests {
    use super::*;
    use followup_types::chat::ExchangeId;
    use followup_types::llm::MessageRole;

    fn exchange(id: i64, user: &str, ai: &str) -> Exchange {
        Exchange {
            id: ExchangeId(id),
            session_id: "s1".to_string(),
            user_message: user.to_string(),
            ai_response: ai.to_string(),
        }
    }

    #[test]
    fn test_empty_history() {
        let messages = build_transcript("Be brief", &[], "hi");
        assert_eq!(messages, vec![Message::system("Be brief"), Message::user("hi")]);
    }

    #[test]
    fn test_history_alternates_roles_in_order() {
        let history = vec![exchange(1, "one", "uno"), exchange(2, "two", "dos")];
        let messages = build_transcript("sys", &history, "three");

        let roles: Vec<MessageRole> = messages.iter().map(|m| m.role).collect();
        assert_eq!(
            roles,
            vec![
                MessageRole::System,
                MessageRole::User,
                MessageRole::Assistant,
                MessageRole::User,
                MessageRole::Assistant,
                MessageRole::User,
            ]
        );
        assert_eq!(messages[1].content, "one");
        assert_eq!(messages[2].content, "uno");
        assert_eq!(messages[4].content, "dos");
        assert_eq!(messages[5].content, "three");
    }
}
