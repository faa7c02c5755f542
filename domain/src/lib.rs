//! Domain layer for duochat
//!
//! This crate contains the core business logic, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Outbound
//!
//! A uniform conversation is reshaped for one of two providers:
//!
//! - **DeepSeek**: fresh reasoning instruction prepended, roles passed through
//! - **Gemini**: system turns dropped, `assistant` → `model`, human-first ordering enforced
//!
//! ## Inbound
//!
//! Raw provider text is segmented into typed blocks (paragraphs, code, lists,
//! thought/answer pairs) by the pure [`format`] function.

pub mod config;
pub mod conversation;
pub mod core;
pub mod formatting;
pub mod outbound;
pub mod prompt;

// Re-export commonly used types
pub use config::{ConfigIssue, ConfigIssueCode, OutputFormat, Severity};
pub use conversation::{
    entities::{
        Chat, ChatId, ConversationTurn, MessageId, NewMessage, Role, StoredMessage, UserId,
    },
    title::{
        DEFAULT_CHAT_TITLE, TITLE_MAX_CHARS, normalize_title, should_retitle, title_from_message,
    },
};
pub use core::{error::DomainError, provider::Provider};
pub use formatting::{ContentSegment, format};
pub use outbound::{
    InstructedRequest, InstructedRole, InstructedTurn, ProviderRequest, ReasoningMessage,
    ReasoningRequest, build_request,
};
