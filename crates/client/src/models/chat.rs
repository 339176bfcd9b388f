//! Assistant chat models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use discover_zimbabwe_core::{ConversationId, MessageId, MessageRole, UserId};

use crate::table::Record;

/// Title given to conversations created without one.
pub const DEFAULT_CONVERSATION_TITLE: &str = "New Conversation";

/// A chat conversation with the travel assistant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatConversation {
    /// Unique conversation ID.
    pub id: ConversationId,
    /// User who owns this conversation.
    pub user_id: UserId,
    pub title: Option<String>,
    /// When the conversation was created.
    pub created_at: Option<DateTime<Utc>>,
    /// When the conversation was last updated.
    pub updated_at: Option<DateTime<Utc>>,
}

impl Record for ChatConversation {
    const TABLE: &'static str = "chat_conversations";
}

/// A message in a conversation. Messages are append-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Unique message ID.
    pub id: MessageId,
    /// Conversation this message belongs to.
    pub conversation_id: ConversationId,
    /// Free-form sender tag.
    pub role: MessageRole,
    #[serde(default)]
    pub content: String,
    /// When the message was created.
    pub created_at: Option<DateTime<Utc>>,
}

impl Record for ChatMessage {
    const TABLE: &'static str = "chat_messages";
}

#[derive(Debug, Serialize)]
pub(crate) struct NewConversation<'a> {
    pub user_id: UserId,
    pub title: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct NewChatMessage<'a> {
    pub conversation_id: ConversationId,
    pub role: &'a MessageRole,
    pub content: &'a str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_message_serialization() {
        let message = ChatMessage {
            id: MessageId::generate(),
            conversation_id: ConversationId::generate(),
            role: MessageRole::user(),
            content: "Best time to visit Mana Pools?".to_string(),
            created_at: Some(Utc::now()),
        };

        let json = serde_json::to_string(&message).expect("serialize");
        assert!(json.contains("\"role\":\"user\""));
        assert!(json.contains("Mana Pools"));
    }

    #[test]
    fn test_new_conversation_payload() {
        let user_id = UserId::generate();
        let payload = NewConversation {
            user_id,
            title: DEFAULT_CONVERSATION_TITLE,
        };
        let json = serde_json::to_value(&payload).expect("serialize");
        assert_eq!(json["title"], "New Conversation");
        assert_eq!(json["user_id"], user_id.to_string());
    }
}
