//! Hand-written fakes for use case tests.

use crate::ports::chat_repository::{ChatRepository, RepositoryError};
use crate::ports::conversation_logger::{ConversationEvent, ConversationLogger};
use crate::ports::progress::ReplyProgress;
use crate::ports::provider_transport::{GatewayError, ProviderTransport};
use async_trait::async_trait;
use chrono::{Duration, TimeZone, Utc};
use duochat_domain::{
    Chat, ChatId, MessageId, NewMessage, Provider, ProviderRequest, StoredMessage, UserId,
};
use std::sync::Mutex;

pub(crate) struct FakeTransport {
    provider: Provider,
    result: Result<String, GatewayError>,
    requests: Mutex<Vec<ProviderRequest>>,
}

impl FakeTransport {
    pub(crate) fn replying(provider: Provider, text: &str) -> Self {
        Self {
            provider,
            result: Ok(text.to_string()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn failing(provider: Provider, error: GatewayError) -> Self {
        Self {
            provider,
            result: Err(error),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn requests(&self) -> Vec<ProviderRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl ProviderTransport for FakeTransport {
    fn provider(&self) -> Provider {
        self.provider
    }

    async fn complete(&self, request: &ProviderRequest) -> Result<String, GatewayError> {
        self.requests.lock().unwrap().push(request.clone());
        self.result.clone()
    }
}

#[derive(Default)]
struct FakeState {
    chats: Vec<Chat>,
    messages: Vec<StoredMessage>,
    next_id: i64,
    clock: i64,
}

impl FakeState {
    fn tick(&mut self) -> chrono::DateTime<Utc> {
        self.clock += 1;
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap() + Duration::seconds(self.clock)
    }

    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

/// Vec-backed repository with a deterministic clock.
#[derive(Default)]
pub(crate) struct FakeRepository {
    state: Mutex<FakeState>,
}

impl FakeRepository {
    pub(crate) fn message_count(&self) -> usize {
        self.state.lock().unwrap().messages.len()
    }
}

#[async_trait]
impl ChatRepository for FakeRepository {
    async fn list_chats(&self, owner: UserId) -> Result<Vec<Chat>, RepositoryError> {
        let state = self.state.lock().unwrap();
        let mut chats: Vec<Chat> = state
            .chats
            .iter()
            .filter(|c| c.owner == owner)
            .cloned()
            .collect();
        chats.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(chats)
    }

    async fn get_chat(&self, id: ChatId) -> Result<Option<Chat>, RepositoryError> {
        let state = self.state.lock().unwrap();
        Ok(state.chats.iter().find(|c| c.id == id).cloned())
    }

    async fn create_chat(&self, owner: UserId, title: &str) -> Result<Chat, RepositoryError> {
        let mut state = self.state.lock().unwrap();
        let now = state.tick();
        let chat = Chat {
            id: ChatId(state.next_id()),
            owner,
            title: title.to_string(),
            created_at: now,
            updated_at: now,
        };
        state.chats.push(chat.clone());
        Ok(chat)
    }

    async fn update_chat_title(&self, id: ChatId, title: &str) -> Result<Chat, RepositoryError> {
        let mut state = self.state.lock().unwrap();
        let now = state.tick();
        let chat = state
            .chats
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| RepositoryError::NotFound(format!("chat {}", id)))?;
        chat.title = title.to_string();
        chat.updated_at = now;
        Ok(chat.clone())
    }

    async fn delete_chat(&self, id: ChatId) -> Result<bool, RepositoryError> {
        let mut state = self.state.lock().unwrap();
        let before = state.chats.len();
        state.chats.retain(|c| c.id != id);
        state.messages.retain(|m| m.chat_id != id);
        Ok(state.chats.len() != before)
    }

    async fn list_messages(&self, chat_id: ChatId) -> Result<Vec<StoredMessage>, RepositoryError> {
        let state = self.state.lock().unwrap();
        Ok(state
            .messages
            .iter()
            .filter(|m| m.chat_id == chat_id)
            .cloned()
            .collect())
    }

    async fn append_message(&self, message: NewMessage) -> Result<StoredMessage, RepositoryError> {
        let mut state = self.state.lock().unwrap();
        let now = state.tick();
        let stored = StoredMessage {
            id: MessageId(state.next_id()),
            chat_id: message.chat_id,
            turn: message.turn,
            created_at: now,
        };
        let chat = state
            .chats
            .iter_mut()
            .find(|c| c.id == message.chat_id)
            .ok_or_else(|| RepositoryError::NotFound(format!("chat {}", message.chat_id)))?;
        chat.updated_at = now;
        state.messages.push(stored.clone());
        Ok(stored)
    }
}

#[derive(Default)]
pub(crate) struct RecordingLogger {
    events: Mutex<Vec<&'static str>>,
}

impl RecordingLogger {
    pub(crate) fn event_types(&self) -> Vec<&'static str> {
        self.events.lock().unwrap().clone()
    }
}

impl ConversationLogger for RecordingLogger {
    fn log(&self, event: ConversationEvent) {
        self.events.lock().unwrap().push(event.event_type);
    }
}

#[derive(Default)]
pub(crate) struct RecordingProgress {
    calls: Mutex<Vec<String>>,
}

impl RecordingProgress {
    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl ReplyProgress for RecordingProgress {
    fn on_request_start(&self, provider: Provider) {
        self.calls.lock().unwrap().push(format!("start:{}", provider));
    }

    fn on_request_complete(&self, provider: Provider, success: bool) {
        self.calls
            .lock()
            .unwrap()
            .push(format!("complete:{}:{}", provider, success));
    }
}
