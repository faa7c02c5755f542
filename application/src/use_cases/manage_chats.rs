//! Manage Chats use case.
//!
//! Listing, creating, renaming and deleting chats, and reading a chat's
//! messages. Every chat-scoped operation checks existence and ownership.

use crate::ports::chat_repository::ChatRepository;
use crate::ports::conversation_logger::{
    ConversationEvent, ConversationLogger, NoConversationLogger,
};
use crate::use_cases::shared::{ChatError, load_owned_chat};
use duochat_domain::{Chat, ChatId, StoredMessage, UserId, normalize_title};
use serde_json::json;
use std::sync::Arc;
use tracing::info;

/// Chat lifecycle operations.
///
/// Creations, renames and deletions are recorded as `chat_created`,
/// `chat_renamed` and `chat_deleted` conversation events.
pub struct ManageChatsUseCase {
    repository: Arc<dyn ChatRepository>,
    conversation_logger: Arc<dyn ConversationLogger>,
}

impl ManageChatsUseCase {
    pub fn new(repository: Arc<dyn ChatRepository>) -> Self {
        Self {
            repository,
            conversation_logger: Arc::new(NoConversationLogger),
        }
    }

    pub fn with_conversation_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.conversation_logger = logger;
        self
    }

    /// Chats owned by `owner`, most recently updated first.
    pub async fn list(&self, owner: UserId) -> Result<Vec<Chat>, ChatError> {
        Ok(self.repository.list_chats(owner).await?)
    }

    pub async fn get(&self, owner: UserId, id: ChatId) -> Result<Chat, ChatError> {
        load_owned_chat(self.repository.as_ref(), owner, id).await
    }

    /// Create a chat. A missing or blank title becomes "New Chat".
    pub async fn create(&self, owner: UserId, title: Option<&str>) -> Result<Chat, ChatError> {
        let title = normalize_title(title);
        let chat = self.repository.create_chat(owner, &title).await?;
        info!("Created chat {} '{}'", chat.id, chat.title);
        self.conversation_logger.log(ConversationEvent::new(
            "chat_created",
            json!({ "chat_id": chat.id.0, "owner": owner.0, "title": &chat.title }),
        ));
        Ok(chat)
    }

    pub async fn rename(
        &self,
        owner: UserId,
        id: ChatId,
        title: &str,
    ) -> Result<Chat, ChatError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(ChatError::InvalidInput("title is required".to_string()));
        }
        load_owned_chat(self.repository.as_ref(), owner, id).await?;
        let chat = self.repository.update_chat_title(id, title).await?;
        info!("Renamed chat {} to '{}'", id, chat.title);
        self.conversation_logger.log(ConversationEvent::new(
            "chat_renamed",
            json!({ "chat_id": id.0, "title": &chat.title }),
        ));
        Ok(chat)
    }

    /// Delete a chat together with its messages.
    pub async fn delete(&self, owner: UserId, id: ChatId) -> Result<(), ChatError> {
        load_owned_chat(self.repository.as_ref(), owner, id).await?;
        if !self.repository.delete_chat(id).await? {
            return Err(ChatError::NotFound(id));
        }
        info!("Deleted chat {}", id);
        self.conversation_logger.log(ConversationEvent::new(
            "chat_deleted",
            json!({ "chat_id": id.0 }),
        ));
        Ok(())
    }

    /// Messages in a chat, oldest first.
    pub async fn messages(
        &self,
        owner: UserId,
        id: ChatId,
    ) -> Result<Vec<StoredMessage>, ChatError> {
        load_owned_chat(self.repository.as_ref(), owner, id).await?;
        Ok(self.repository.list_messages(id).await?)
    }
}
