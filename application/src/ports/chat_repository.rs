//! Chat repository port
//!
//! Persistence for chats and their messages. The core never interprets stored
//! text; replies are saved verbatim and formatted only when displayed.

use async_trait::async_trait;
use duochat_domain::{Chat, ChatId, NewMessage, StoredMessage, UserId};
use thiserror::Error;

/// Errors from a chat repository backend
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RepositoryError {
    #[error("Storage error: {0}")]
    Backend(String),

    #[error("Not found: {0}")]
    NotFound(String),
}

/// Storage for chats and messages
#[async_trait]
pub trait ChatRepository: Send + Sync {
    /// Chats owned by `owner`, most recently updated first.
    async fn list_chats(&self, owner: UserId) -> Result<Vec<Chat>, RepositoryError>;

    async fn get_chat(&self, id: ChatId) -> Result<Option<Chat>, RepositoryError>;

    async fn create_chat(&self, owner: UserId, title: &str) -> Result<Chat, RepositoryError>;

    /// Rename a chat and bump its `updated_at`.
    async fn update_chat_title(&self, id: ChatId, title: &str) -> Result<Chat, RepositoryError>;

    /// Delete a chat and all of its messages. Returns `false` if it did not exist.
    async fn delete_chat(&self, id: ChatId) -> Result<bool, RepositoryError>;

    /// Messages in a chat, oldest first.
    async fn list_messages(&self, chat_id: ChatId) -> Result<Vec<StoredMessage>, RepositoryError>;

    /// Store a message and bump the owning chat's `updated_at`.
    async fn append_message(&self, message: NewMessage) -> Result<StoredMessage, RepositoryError>;
}
