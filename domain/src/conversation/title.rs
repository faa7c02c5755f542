//! Chat title rules

use crate::core::string::truncate_chars;

/// Title given to chats created without one
pub const DEFAULT_CHAT_TITLE: &str = "New Chat";

/// Number of characters kept when deriving a title from a message
pub const TITLE_MAX_CHARS: usize = 30;

/// Derive a chat title from the opening user message.
pub fn title_from_message(content: &str, max_chars: usize) -> String {
    truncate_chars(content.trim(), max_chars)
}

/// Whether a chat should be retitled after storing a user message.
///
/// `turn_count` is the length of the history including that message. Only
/// the opening exchange of a conversation names the chat.
pub fn should_retitle(turn_count: usize) -> bool {
    turn_count <= 2
}

/// Normalize a user-supplied title, falling back to [`DEFAULT_CHAT_TITLE`].
pub fn normalize_title(title: Option<&str>) -> String {
    match title.map(str::trim) {
        Some(t) if !t.is_empty() => t.to_string(),
        _ => DEFAULT_CHAT_TITLE.to_string(),
    }
}
