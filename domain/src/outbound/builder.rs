//! Conversation → provider request adaptation.

use super::request::{
    InstructedRequest, InstructedRole, InstructedTurn, ProviderRequest, ReasoningMessage,
    ReasoningRequest,
};
use crate::conversation::entities::{ConversationTurn, Role};
use crate::core::error::DomainError;
use crate::core::provider::Provider;
use crate::prompt::style::{
    GEMINI_GREETING, GEMINI_STYLE_ACKNOWLEDGEMENT, REASONING_SYSTEM_INSTRUCTION,
};

/// Build the request `provider` expects from a uniform conversation.
///
/// The conversation must contain at least one turn.
pub fn build_request(
    provider: Provider,
    turns: &[ConversationTurn],
) -> Result<ProviderRequest, DomainError> {
    if turns.is_empty() {
        return Err(DomainError::EmptyConversation);
    }

    Ok(match provider {
        Provider::DeepSeek => ProviderRequest::DeepSeek(build_reasoning_request(turns)),
        Provider::Gemini => ProviderRequest::Gemini(build_instructed_request(turns)),
    })
}

/// DeepSeek: a fresh system instruction replaces any stored system turns.
fn build_reasoning_request(turns: &[ConversationTurn]) -> ReasoningRequest {
    let mut messages = Vec::with_capacity(turns.len() + 1);
    messages.push(ReasoningMessage {
        role: Role::System,
        content: REASONING_SYSTEM_INSTRUCTION.to_string(),
    });
    messages.extend(
        turns
            .iter()
            .filter(|t| t.role != Role::System)
            .map(|t| ReasoningMessage {
                role: t.role,
                content: t.content.clone(),
            }),
    );
    ReasoningRequest { messages }
}

/// Gemini: no system role, `assistant` becomes `model`, and the exchange
/// must open with a user turn.
fn build_instructed_request(turns: &[ConversationTurn]) -> InstructedRequest {
    let mut remapped: Vec<InstructedTurn> = turns
        .iter()
        .filter_map(|t| match t.role {
            Role::System => None,
            Role::User => Some(InstructedTurn::user(t.content.clone())),
            Role::Assistant => Some(InstructedTurn::model(t.content.clone())),
        })
        .collect();

    if remapped
        .first()
        .is_some_and(|t| t.role != InstructedRole::User)
    {
        remapped.splice(
            0..0,
            [
                InstructedTurn::user(GEMINI_GREETING),
                InstructedTurn::model(GEMINI_STYLE_ACKNOWLEDGEMENT),
            ],
        );
    }

    // A conversation made only of system turns still sends something live.
    let message = remapped.pop().map(|t| t.text).unwrap_or_default();

    InstructedRequest {
        history: remapped,
        message,
    }
}
