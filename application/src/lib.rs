//! Application layer for duochat
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::ChatBehavior;
pub use ports::{
    chat_repository::{ChatRepository, RepositoryError},
    conversation_logger::{ConversationEvent, ConversationLogger, NoConversationLogger},
    progress::{NoProgress, ReplyProgress},
    provider_transport::{GatewayError, ProviderError, ProviderTransport},
};
pub use use_cases::ChatError;
pub use use_cases::generate_reply::{GenerateReplyError, GenerateReplyUseCase};
pub use use_cases::manage_chats::ManageChatsUseCase;
pub use use_cases::send_message::{SendMessageUseCase, SentExchange};
