//! Chat configuration from TOML (`[chat]` section)

use duochat_domain::{TITLE_MAX_CHARS, UserId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileChatConfig {
    /// Owner of the chats created from this terminal
    pub user_id: i64,
    /// Characters kept when a chat is titled from its first message
    pub title_max_chars: usize,
}

impl Default for FileChatConfig {
    fn default() -> Self {
        Self {
            user_id: 1,
            title_max_chars: TITLE_MAX_CHARS,
        }
    }
}

impl FileChatConfig {
    pub fn owner(&self) -> UserId {
        UserId(self.user_id)
    }
}
