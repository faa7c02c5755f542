//! Send Message use case.
//!
//! One chat exchange: persist the user's turn, ask the provider, persist the
//! reply verbatim. The reply is never formatted here; formatting is a
//! render-time concern.

use crate::config::ChatBehavior;
use crate::ports::chat_repository::ChatRepository;
use crate::ports::progress::{NoProgress, ReplyProgress};
use crate::use_cases::generate_reply::GenerateReplyUseCase;
use crate::use_cases::shared::{ChatError, load_owned_chat};
use duochat_domain::{
    ChatId, ConversationTurn, NewMessage, Provider, StoredMessage, UserId, should_retitle,
    title_from_message,
};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Result of a successful exchange.
#[derive(Debug, Clone)]
pub struct SentExchange {
    pub user_message: StoredMessage,
    pub reply: StoredMessage,
    /// New chat title, when this exchange named the chat.
    pub retitled: Option<String>,
}

impl SentExchange {
    pub fn reply_text(&self) -> &str {
        &self.reply.turn.content
    }
}

/// Use case for sending a user message and storing the provider's reply.
///
/// Flow:
/// 1. Reject blank content
/// 2. Check the chat exists and belongs to the caller
/// 3. Store the user turn (tagged with the provider)
/// 4. Load the full history and generate a reply
/// 5. Store the reply and name the chat on its opening exchange
///
/// If step 4 fails the user turn stays stored with no matching reply.
pub struct SendMessageUseCase {
    repository: Arc<dyn ChatRepository>,
    generator: Arc<GenerateReplyUseCase>,
    behavior: ChatBehavior,
}

impl SendMessageUseCase {
    pub fn new(repository: Arc<dyn ChatRepository>, generator: Arc<GenerateReplyUseCase>) -> Self {
        Self {
            repository,
            generator,
            behavior: ChatBehavior::default(),
        }
    }

    pub fn with_behavior(mut self, behavior: ChatBehavior) -> Self {
        self.behavior = behavior;
        self
    }

    pub fn default_provider(&self) -> Provider {
        self.behavior.default_provider
    }

    pub async fn execute(
        &self,
        owner: UserId,
        chat_id: ChatId,
        content: &str,
        provider: Option<Provider>,
    ) -> Result<SentExchange, ChatError> {
        self.execute_with_progress(owner, chat_id, content, provider, &NoProgress)
            .await
    }

    /// Execute with a progress callback around the provider call.
    pub async fn execute_with_progress(
        &self,
        owner: UserId,
        chat_id: ChatId,
        content: &str,
        provider: Option<Provider>,
        progress: &dyn ReplyProgress,
    ) -> Result<SentExchange, ChatError> {
        if content.trim().is_empty() {
            return Err(ChatError::InvalidInput(
                "message content is required".to_string(),
            ));
        }
        load_owned_chat(self.repository.as_ref(), owner, chat_id).await?;

        let provider = provider.unwrap_or(self.behavior.default_provider);
        info!("Sending message to chat {} via {}", chat_id, provider);

        let user_message = self
            .repository
            .append_message(NewMessage::new(
                chat_id,
                ConversationTurn::user(content).with_provider(provider),
            ))
            .await?;

        let history: Vec<ConversationTurn> = self
            .repository
            .list_messages(chat_id)
            .await?
            .into_iter()
            .map(|m| m.turn)
            .collect();
        debug!("Chat {} history: {} turns", chat_id, history.len());

        progress.on_request_start(provider);
        let result = self.generator.execute(provider, &history).await;
        progress.on_request_complete(provider, result.is_ok());
        let text = result?;

        let reply = self
            .repository
            .append_message(NewMessage::new(
                chat_id,
                ConversationTurn::assistant(text).with_provider(provider),
            ))
            .await?;

        let retitled = if should_retitle(history.len()) {
            let title = title_from_message(content, self.behavior.title_max_chars);
            match self.repository.update_chat_title(chat_id, &title).await {
                Ok(chat) => Some(chat.title),
                Err(e) => {
                    warn!("Failed to title chat {}: {}", chat_id, e);
                    None
                }
            }
        } else {
            None
        };

        Ok(SentExchange {
            user_message,
            reply,
            retitled,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::provider_transport::GatewayError;
    use crate::use_cases::test_support::{FakeRepository, FakeTransport, RecordingProgress};
    use duochat_domain::{ProviderRequest, Role};

    async fn setup(
        transport: FakeTransport,
    ) -> (Arc<FakeRepository>, Arc<FakeTransport>, SendMessageUseCase, ChatId) {
        let repository = Arc::new(FakeRepository::default());
        let transport = Arc::new(transport);
        let generator = Arc::new(GenerateReplyUseCase::new().with_transport(transport.clone()));
        let chat = repository.create_chat(UserId(1), "New Chat").await.unwrap();
        let use_case = SendMessageUseCase::new(repository.clone(), generator);
        (repository, transport, use_case, chat.id)
    }

    #[tokio::test]
    async fn test_exchange_stores_both_turns() {
        let (repository, _, use_case, chat_id) =
            setup(FakeTransport::replying(Provider::DeepSeek, "<think>a</think>b")).await;

        let exchange = use_case
            .execute(UserId(1), chat_id, "Hello there", None)
            .await
            .unwrap();

        assert_eq!(exchange.reply_text(), "<think>a</think>b");
        assert_eq!(exchange.reply.turn.role, Role::Assistant);
        assert_eq!(exchange.reply.turn.provider, Some(Provider::DeepSeek));
        assert_eq!(exchange.user_message.turn.provider, Some(Provider::DeepSeek));

        let stored = repository.list_messages(chat_id).await.unwrap();
        assert_eq!(stored.len(), 2);
        assert_eq!(stored[1].turn.content, "<think>a</think>b");
    }

    #[tokio::test]
    async fn test_first_exchange_titles_chat() {
        let (repository, _, use_case, chat_id) =
            setup(FakeTransport::replying(Provider::DeepSeek, "ok")).await;

        let exchange = use_case
            .execute(
                UserId(1),
                chat_id,
                "How do I write a binary search tree in Rust?",
                None,
            )
            .await
            .unwrap();

        let expected = "How do I write a binary search...";
        assert_eq!(exchange.retitled.as_deref(), Some(expected));
        let chat = repository.get_chat(chat_id).await.unwrap().unwrap();
        assert_eq!(chat.title, expected);

        let second = use_case
            .execute(UserId(1), chat_id, "Something else", None)
            .await
            .unwrap();
        assert!(second.retitled.is_none());
    }

    #[tokio::test]
    async fn test_full_history_is_sent() {
        let (_, transport, use_case, chat_id) =
            setup(FakeTransport::replying(Provider::Gemini, "ok")).await;

        use_case
            .execute(UserId(1), chat_id, "one", Some(Provider::Gemini))
            .await
            .unwrap();
        use_case
            .execute(UserId(1), chat_id, "two", Some(Provider::Gemini))
            .await
            .unwrap();

        match &transport.requests()[1] {
            ProviderRequest::Gemini(req) => {
                assert_eq!(req.history.len(), 2);
                assert_eq!(req.message, "two");
            }
            other => panic!("unexpected request: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_provider_failure_keeps_user_message() {
        let (repository, _, use_case, chat_id) = setup(FakeTransport::failing(
            Provider::DeepSeek,
            GatewayError::Connection("refused".to_string()),
        ))
        .await;

        let err = use_case
            .execute(UserId(1), chat_id, "are you there?", None)
            .await
            .unwrap_err();

        assert!(matches!(err, ChatError::Provider(_)));
        assert_eq!(repository.message_count(), 1);
        let chat = repository.get_chat(chat_id).await.unwrap().unwrap();
        assert_eq!(chat.title, "New Chat");
    }

    #[tokio::test]
    async fn test_blank_content_rejected() {
        let (repository, transport, use_case, chat_id) =
            setup(FakeTransport::replying(Provider::DeepSeek, "ok")).await;

        let err = use_case
            .execute(UserId(1), chat_id, "   ", None)
            .await
            .unwrap_err();
        assert!(matches!(err, ChatError::InvalidInput(_)));
        assert_eq!(repository.message_count(), 0);
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn test_other_users_chat_is_forbidden() {
        let (repository, _, use_case, chat_id) =
            setup(FakeTransport::replying(Provider::DeepSeek, "ok")).await;

        let err = use_case
            .execute(UserId(2), chat_id, "hi", None)
            .await
            .unwrap_err();
        assert!(matches!(err, ChatError::Forbidden(id) if id == chat_id));
        assert_eq!(repository.message_count(), 0);

        let err = use_case
            .execute(UserId(1), ChatId(999), "hi", None)
            .await
            .unwrap_err();
        assert!(matches!(err, ChatError::NotFound(ChatId(999))));
    }

    #[tokio::test]
    async fn test_progress_brackets_provider_call() {
        let (_, _, use_case, chat_id) = setup(FakeTransport::failing(
            Provider::Gemini,
            GatewayError::EmptyResponse,
        ))
        .await;
        let progress = RecordingProgress::default();

        let _ = use_case
            .execute_with_progress(UserId(1), chat_id, "hi", Some(Provider::Gemini), &progress)
            .await;

        assert_eq!(
            progress.calls(),
            vec!["start:gemini".to_string(), "complete:gemini:false".to_string()]
        );
    }
}
