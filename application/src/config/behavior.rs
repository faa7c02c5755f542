//! Chat behavior configuration.

use duochat_domain::{Provider, TITLE_MAX_CHARS};

/// Controls defaults the chat use cases apply when the caller leaves them open.
#[derive(Debug, Clone)]
pub struct ChatBehavior {
    /// Provider used when a message does not name one.
    pub default_provider: Provider,
    /// Characters kept when a chat is titled from its first message.
    pub title_max_chars: usize,
}

impl Default for ChatBehavior {
    fn default() -> Self {
        Self {
            default_provider: Provider::default(),
            title_max_chars: TITLE_MAX_CHARS,
        }
    }
}

impl ChatBehavior {
    pub fn with_default_provider(mut self, provider: Provider) -> Self {
        self.default_provider = provider;
        self
    }

    /// Zero is treated as "use the default length".
    pub fn with_title_max_chars(mut self, max_chars: usize) -> Self {
        self.title_max_chars = if max_chars == 0 {
            TITLE_MAX_CHARS
        } else {
            max_chars
        };
        self
    }
}
