//! Assistant chat operations.

use tracing::instrument;

use discover_zimbabwe_core::{ConversationId, MessageRole, UserId};

use crate::error::Result;
use crate::models::chat::{NewChatMessage, NewConversation};
use crate::models::{ChatConversation, ChatMessage, DEFAULT_CONVERSATION_TITLE};
use crate::store::{Direction, Filter, RemoteStore};
use crate::table::Table;

/// Repository for chat conversations and messages.
pub struct ChatRepository<'a, S> {
    store: &'a S,
}

impl<'a, S: RemoteStore> ChatRepository<'a, S> {
    /// Create a new chat repository.
    #[must_use]
    pub const fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// List a user's conversations, most recently updated first.
    ///
    /// # Errors
    ///
    /// Returns `DataError` if the call fails.
    #[instrument(skip(self))]
    pub async fn conversations(&self, user_id: UserId) -> Result<Vec<ChatConversation>> {
        Table::of::<ChatConversation>(self.store)
            .list(
                Some(Filter::eq("user_id", user_id)),
                Some(("updated_at", Direction::Descending)),
            )
            .await
    }

    /// The user's most recent conversation, created with the default title
    /// if they have none.
    ///
    /// # Errors
    ///
    /// Returns `DataError` if either call fails.
    #[instrument(skip(self))]
    pub async fn get_or_create_conversation(&self, user_id: UserId) -> Result<ChatConversation> {
        if let Some(existing) = self.conversations(user_id).await?.into_iter().next() {
            return Ok(existing);
        }
        self.create_conversation(user_id, DEFAULT_CONVERSATION_TITLE)
            .await
    }

    /// Create a conversation. An empty title falls back to the default.
    ///
    /// # Errors
    ///
    /// Returns `DataError` if the call fails.
    #[instrument(skip(self))]
    pub async fn create_conversation(
        &self,
        user_id: UserId,
        title: &str,
    ) -> Result<ChatConversation> {
        let title = match title.trim() {
            "" => DEFAULT_CONVERSATION_TITLE,
            trimmed => trimmed,
        };
        Table::of::<ChatConversation>(self.store)
            .insert(&NewConversation { user_id, title })
            .await
    }

    /// Messages of a conversation, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `DataError` if the call fails.
    #[instrument(skip(self))]
    pub async fn messages(&self, conversation_id: ConversationId) -> Result<Vec<ChatMessage>> {
        Table::of::<ChatMessage>(self.store)
            .list(
                Some(Filter::eq("conversation_id", conversation_id)),
                Some(("created_at", Direction::Ascending)),
            )
            .await
    }

    /// Append a message.
    ///
    /// # Errors
    ///
    /// Returns `DataError` if the call fails.
    #[instrument(skip(self, content))]
    pub async fn add_message(
        &self,
        conversation_id: ConversationId,
        role: &MessageRole,
        content: &str,
    ) -> Result<ChatMessage> {
        Table::of::<ChatMessage>(self.store)
            .insert(&NewChatMessage {
                conversation_id,
                role,
                content,
            })
            .await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[tokio::test]
    async fn test_get_or_create_is_lazy() {
        let store = MemoryStore::new();
        let repo = ChatRepository::new(&store);
        let user = UserId::generate();

        let first = repo.get_or_create_conversation(user).await.unwrap();
        assert_eq!(first.title.as_deref(), Some(DEFAULT_CONVERSATION_TITLE));

        let again = repo.get_or_create_conversation(user).await.unwrap();
        assert_eq!(again.id, first.id);
        assert_eq!(store.rows("chat_conversations").await.len(), 1);
    }

    #[tokio::test]
    async fn test_blank_title_uses_default() {
        let store = MemoryStore::new();
        let repo = ChatRepository::new(&store);

        let conversation = repo
            .create_conversation(UserId::generate(), "   ")
            .await
            .unwrap();
        assert_eq!(conversation.title.as_deref(), Some("New Conversation"));
    }

    #[tokio::test]
    async fn test_messages_keep_insertion_order() {
        let store = MemoryStore::new();
        let repo = ChatRepository::new(&store);
        let conversation = repo
            .create_conversation(UserId::generate(), "Hwange trip")
            .await
            .unwrap();

        repo.add_message(conversation.id, &MessageRole::user(), "When do the elephants gather?")
            .await
            .unwrap();
        repo.add_message(conversation.id, &MessageRole::assistant(), "Late in the dry season.")
            .await
            .unwrap();

        let messages = repo.messages(conversation.id).await.unwrap();
        let roles: Vec<_> = messages.iter().map(|m| m.role.as_str()).collect();
        assert_eq!(roles, ["user", "assistant"]);
    }
}
