//! Shared utilities for use cases.
//!
//! Contains the chat error type and the ownership check every chat-scoped
//! use case runs first.

use crate::ports::chat_repository::{ChatRepository, RepositoryError};
use crate::ports::provider_transport::ProviderError;
use crate::use_cases::generate_reply::GenerateReplyError;
use duochat_domain::{Chat, ChatId, DomainError, UserId};
use thiserror::Error;

/// Errors surfaced by the chat use cases.
#[derive(Error, Debug)]
pub enum ChatError {
    #[error("Chat {0} not found")]
    NotFound(ChatId),

    #[error("Chat {0} belongs to another user")]
    Forbidden(ChatId),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl From<DomainError> for ChatError {
    fn from(err: DomainError) -> Self {
        ChatError::InvalidInput(err.to_string())
    }
}

impl From<GenerateReplyError> for ChatError {
    fn from(err: GenerateReplyError) -> Self {
        match err {
            GenerateReplyError::Domain(e) => e.into(),
            GenerateReplyError::Provider(e) => ChatError::Provider(e),
        }
    }
}

/// Load a chat and verify that `owner` may access it.
pub(crate) async fn load_owned_chat(
    repository: &dyn ChatRepository,
    owner: UserId,
    id: ChatId,
) -> Result<Chat, ChatError> {
    let chat = repository
        .get_chat(id)
        .await?
        .ok_or(ChatError::NotFound(id))?;
    if !chat.is_owned_by(owner) {
        return Err(ChatError::Forbidden(id));
    }
    Ok(chat)
}
