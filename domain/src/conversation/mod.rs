//! Conversation domain.
//!
//! - [`entities::ConversationTurn`]: a single turn attributed to a role
//! - [`entities::Chat`] / [`entities::StoredMessage`]: persisted conversation data
//! - [`title`]: chat naming rules

pub mod entities;
pub mod title;
