//! Process-local chat repository.

use async_trait::async_trait;
use chrono::Utc;
use duochat_application::{ChatRepository, RepositoryError};
use duochat_domain::{Chat, ChatId, MessageId, NewMessage, StoredMessage, UserId};
use tokio::sync::Mutex;

#[derive(Default)]
struct State {
    chats: Vec<Chat>,
    messages: Vec<StoredMessage>,
    last_id: i64,
}

impl State {
    fn next_id(&mut self) -> i64 {
        self.last_id += 1;
        self.last_id
    }

    fn chat_mut(&mut self, id: ChatId) -> Result<&mut Chat, RepositoryError> {
        self.chats
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| RepositoryError::NotFound(format!("chat {}", id)))
    }
}

/// Chat repository holding everything in memory.
///
/// Used with `storage.backend = "memory"`; nothing survives the process.
#[derive(Default)]
pub struct InMemoryChatRepository {
    state: Mutex<State>,
}

impl InMemoryChatRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ChatRepository for InMemoryChatRepository {
    async fn list_chats(&self, owner: UserId) -> Result<Vec<Chat>, RepositoryError> {
        let state = self.state.lock().await;
        let mut chats: Vec<Chat> = state
            .chats
            .iter()
            .filter(|c| c.is_owned_by(owner))
            .cloned()
            .collect();
        chats.sort_by(|a, b| b.updated_at.cmp(&a.updated_at).then(b.id.cmp(&a.id)));
        Ok(chats)
    }

    async fn get_chat(&self, id: ChatId) -> Result<Option<Chat>, RepositoryError> {
        let state = self.state.lock().await;
        Ok(state.chats.iter().find(|c| c.id == id).cloned())
    }

    async fn create_chat(&self, owner: UserId, title: &str) -> Result<Chat, RepositoryError> {
        let mut state = self.state.lock().await;
        let now = Utc::now();
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
        let mut state = self.state.lock().await;
        let chat = state.chat_mut(id)?;
        chat.title = title.to_string();
        chat.updated_at = Utc::now();
        Ok(chat.clone())
    }

    async fn delete_chat(&self, id: ChatId) -> Result<bool, RepositoryError> {
        let mut state = self.state.lock().await;
        let before = state.chats.len();
        state.chats.retain(|c| c.id != id);
        if state.chats.len() == before {
            return Ok(false);
        }
        state.messages.retain(|m| m.chat_id != id);
        Ok(true)
    }

    async fn list_messages(&self, chat_id: ChatId) -> Result<Vec<StoredMessage>, RepositoryError> {
        let state = self.state.lock().await;
        Ok(state
            .messages
            .iter()
            .filter(|m| m.chat_id == chat_id)
            .cloned()
            .collect())
    }

    async fn append_message(&self, message: NewMessage) -> Result<StoredMessage, RepositoryError> {
        let mut state = self.state.lock().await;
        let now = Utc::now();
        state.chat_mut(message.chat_id)?.updated_at = now;

        let stored = StoredMessage {
            id: MessageId(state.next_id()),
            chat_id: message.chat_id,
            turn: message.turn,
            created_at: now,
        };
        state.messages.push(stored.clone());
        Ok(stored)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use duochat_domain::{ConversationTurn, Provider};

    #[tokio::test]
    async fn test_messages_are_kept_in_order() {
        let repo = InMemoryChatRepository::new();
        let chat = repo.create_chat(UserId(1), "New Chat").await.unwrap();

        repo.append_message(NewMessage::new(chat.id, ConversationTurn::user("q")))
            .await
            .unwrap();
        repo.append_message(NewMessage::new(
            chat.id,
            ConversationTurn::assistant("a").with_provider(Provider::Gemini),
        ))
        .await
        .unwrap();

        let messages = repo.list_messages(chat.id).await.unwrap();
        let contents: Vec<_> = messages.iter().map(|m| m.turn.content.as_str()).collect();
        assert_eq!(contents, vec!["q", "a"]);
        assert_eq!(messages[1].turn.provider, Some(Provider::Gemini));
    }

    #[tokio::test]
    async fn test_append_bumps_chat_to_front() {
        let repo = InMemoryChatRepository::new();
        let older = repo.create_chat(UserId(1), "older").await.unwrap();
        let newer = repo.create_chat(UserId(1), "newer").await.unwrap();

        repo.append_message(NewMessage::new(older.id, ConversationTurn::user("hi")))
            .await
            .unwrap();

        let chats = repo.list_chats(UserId(1)).await.unwrap();
        assert_eq!(chats[0].id, older.id);
        assert_eq!(chats[1].id, newer.id);
        assert!(repo.list_chats(UserId(2)).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_append_to_missing_chat() {
        let repo = InMemoryChatRepository::new();
        let err = repo
            .append_message(NewMessage::new(ChatId(7), ConversationTurn::user("hi")))
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_delete_cascades() {
        let repo = InMemoryChatRepository::new();
        let chat = repo.create_chat(UserId(1), "x").await.unwrap();
        repo.append_message(NewMessage::new(chat.id, ConversationTurn::user("hi")))
            .await
            .unwrap();

        assert!(repo.delete_chat(chat.id).await.unwrap());
        assert!(repo.list_messages(chat.id).await.unwrap().is_empty());
        assert!(!repo.delete_chat(chat.id).await.unwrap());
    }
}
