//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Unknown provider: {0}")]
    InvalidProvider(String),

    #[error("Conversation has no turns")]
    EmptyConversation,

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl DomainError {
    /// Check if this error was caused by caller-supplied input
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            DomainError::InvalidInput(_) | DomainError::InvalidProvider(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_conversation_display() {
        let error = DomainError::EmptyConversation;
        assert_eq!(error.to_string(), "Conversation has no turns");
    }

    #[test]
    fn test_input_error_check() {
        assert!(DomainError::InvalidInput("blank".to_string()).is_input_error());
        assert!(DomainError::InvalidProvider("claude".to_string()).is_input_error());
        assert!(!DomainError::EmptyConversation.is_input_error());
    }
}
