//! Provider-shaped request payloads.
//!
//! These are the message shapes each provider accepts, before any
//! transport-level encoding (JSON field names, sampling parameters,
//! credentials) is applied by the infrastructure layer.

use crate::conversation::entities::Role;
use crate::core::provider::Provider;
use serde::{Deserialize, Serialize};

/// A single message in a DeepSeek chat-completions request.
///
/// Roles map directly onto the uniform conversation roles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReasoningMessage {
    pub role: Role,
    pub content: String,
}

/// Request for the reasoning-style provider: a flat message list that always
/// starts with the system instruction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReasoningRequest {
    pub messages: Vec<ReasoningMessage>,
}

/// Speaker labels understood by the instruction-constrained provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InstructedRole {
    User,
    Model,
}

impl InstructedRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            InstructedRole::User => "user",
            InstructedRole::Model => "model",
        }
    }
}

/// A single history entry for the instruction-constrained provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstructedTurn {
    pub role: InstructedRole,
    pub text: String,
}

impl InstructedTurn {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: InstructedRole::User,
            text: text.into(),
        }
    }

    pub fn model(text: impl Into<String>) -> Self {
        Self {
            role: InstructedRole::Model,
            text: text.into(),
        }
    }
}

/// Request for the instruction-constrained provider: prior turns as history,
/// plus the live message sent on top of it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstructedRequest {
    pub history: Vec<InstructedTurn>,
    pub message: String,
}

impl InstructedRequest {
    /// Role of the first turn the provider will see.
    ///
    /// The live message is always sent as a user turn, so an empty history
    /// opens with the user.
    pub fn opening_role(&self) -> InstructedRole {
        self.history
            .first()
            .map(|t| t.role)
            .unwrap_or(InstructedRole::User)
    }
}

/// A request addressed to exactly one provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "provider", rename_all = "lowercase")]
pub enum ProviderRequest {
    DeepSeek(ReasoningRequest),
    Gemini(InstructedRequest),
}

impl ProviderRequest {
    pub fn provider(&self) -> Provider {
        match self {
            ProviderRequest::DeepSeek(_) => Provider::DeepSeek,
            ProviderRequest::Gemini(_) => Provider::Gemini,
        }
    }

    /// Number of turns the provider receives, counting the live message.
    pub fn turn_count(&self) -> usize {
        match self {
            ProviderRequest::DeepSeek(r) => r.messages.len(),
            ProviderRequest::Gemini(r) => r.history.len() + 1,
        }
    }
}
