//! Generate Reply use case.
//!
//! The outbound adapter: shapes a conversation for the selected provider,
//! performs exactly one transport call and returns the raw reply text.
//! Failures are not retried; they propagate as [`ProviderError`].

use crate::ports::conversation_logger::{
    ConversationEvent, ConversationLogger, NoConversationLogger,
};
use crate::ports::provider_transport::{GatewayError, ProviderError, ProviderTransport};
use duochat_domain::{ConversationTurn, DomainError, Provider, build_request};
use serde_json::json;
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that can occur while generating a reply.
#[derive(Error, Debug)]
pub enum GenerateReplyError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Provider(#[from] ProviderError),
}

/// Use case for obtaining one reply from one provider.
///
/// Transports are injected once by the composition root, one per provider;
/// registering a second transport for the same provider replaces the first.
#[derive(Clone)]
pub struct GenerateReplyUseCase {
    transports: HashMap<Provider, Arc<dyn ProviderTransport>>,
    conversation_logger: Arc<dyn ConversationLogger>,
}

impl Default for GenerateReplyUseCase {
    fn default() -> Self {
        Self::new()
    }
}

impl GenerateReplyUseCase {
    pub fn new() -> Self {
        Self {
            transports: HashMap::new(),
            conversation_logger: Arc::new(NoConversationLogger),
        }
    }

    /// Register the transport for the provider it reports.
    pub fn with_transport(mut self, transport: Arc<dyn ProviderTransport>) -> Self {
        self.transports.insert(transport.provider(), transport);
        self
    }

    /// Create with a conversation logger.
    pub fn with_conversation_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.conversation_logger = logger;
        self
    }

    /// Shape `turns` for `provider` and return the reply text.
    pub async fn execute(
        &self,
        provider: Provider,
        turns: &[ConversationTurn],
    ) -> Result<String, GenerateReplyError> {
        let request = build_request(provider, turns)?;

        let transport = self.transports.get(&provider).ok_or_else(|| {
            ProviderError::new(provider, GatewayError::UnsupportedRequest(provider))
        })?;

        info!(
            "Requesting reply from {} ({} turns)",
            provider.display_name(),
            request.turn_count()
        );
        debug!("Shaped request: {:?}", request);
        self.conversation_logger.log(ConversationEvent::new(
            "provider_request",
            json!({
                "provider": provider.as_str(),
                "request": &request,
            }),
        ));

        let result = match transport.complete(&request).await {
            Ok(text) if text.trim().is_empty() => Err(GatewayError::EmptyResponse),
            other => other,
        };

        match result {
            Ok(text) => {
                debug!("{} replied with {} bytes", provider, text.len());
                self.conversation_logger.log(ConversationEvent::new(
                    "provider_response",
                    json!({
                        "provider": provider.as_str(),
                        "text": &text,
                    }),
                ));
                Ok(text)
            }
            Err(source) => {
                warn!("{} request failed: {}", provider.display_name(), source);
                self.conversation_logger.log(ConversationEvent::new(
                    "provider_error",
                    json!({
                        "provider": provider.as_str(),
                        "error": source.to_string(),
                        "status": source.status(),
                    }),
                ));
                Err(ProviderError::new(provider, source).into())
            }
        }
    }
}
