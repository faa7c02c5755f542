//! SQLite chat repository (sqlx).

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use duochat_application::{ChatRepository, RepositoryError};
use duochat_domain::{
    Chat, ChatId, ConversationTurn, MessageId, NewMessage, Provider, Role, StoredMessage, UserId,
};
use sqlx::prelude::FromRow;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};
use std::path::Path;
use std::str::FromStr;
use tracing::{debug, info};

const SCHEMA: [&str; 3] = [
    r#"CREATE TABLE IF NOT EXISTS chats (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        user_id INTEGER NOT NULL,
        title TEXT NOT NULL,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL
    )"#,
    r#"CREATE TABLE IF NOT EXISTS messages (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        chat_id INTEGER NOT NULL REFERENCES chats(id) ON DELETE CASCADE,
        role TEXT NOT NULL,
        content TEXT NOT NULL,
        provider TEXT,
        created_at TEXT NOT NULL
    )"#,
    r#"CREATE INDEX IF NOT EXISTS messages_chat_id ON messages (chat_id, id)"#,
];

fn backend(e: sqlx::Error) -> RepositoryError {
    RepositoryError::Backend(e.to_string())
}

/// Chat repository backed by a SQLite database file.
#[derive(Debug, Clone)]
pub struct SqliteChatRepository {
    pool: SqlitePool,
}

impl SqliteChatRepository {
    /// Open (creating if needed) the database at `path` and ensure the schema.
    pub async fn open(path: &Path) -> Result<Self, RepositoryError> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|e| {
                RepositoryError::Backend(format!(
                    "could not create {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .foreign_keys(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(4)
            .connect_with(options)
            .await
            .map_err(backend)?;

        info!("Opened chat database at {}", path.display());
        Self::with_pool(pool).await
    }

    /// A private in-memory database. A single pooled connection keeps it alive.
    pub async fn in_memory() -> Result<Self, RepositoryError> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")
            .map_err(backend)?
            .foreign_keys(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await
            .map_err(backend)?;
        Self::with_pool(pool).await
    }

    async fn with_pool(pool: SqlitePool) -> Result<Self, RepositoryError> {
        for statement in SCHEMA {
            sqlx::query(statement)
                .execute(&pool)
                .await
                .map_err(backend)?;
        }
        debug!("Chat schema ready");
        Ok(Self { pool })
    }
}

#[async_trait]
impl ChatRepository for SqliteChatRepository {
    async fn list_chats(&self, owner: UserId) -> Result<Vec<Chat>, RepositoryError> {
        let rows: Vec<SqliteRowChat> = sqlx::query_as(
            r#"SELECT id, user_id, title, created_at, updated_at FROM chats
               WHERE user_id = ? ORDER BY updated_at DESC, id DESC"#,
        )
        .bind(owner.0)
        .fetch_all(&self.pool)
        .await
        .map_err(backend)?;

        Ok(rows.into_iter().map(Chat::from).collect())
    }

    async fn get_chat(&self, id: ChatId) -> Result<Option<Chat>, RepositoryError> {
        let row: Option<SqliteRowChat> = sqlx::query_as(
            r#"SELECT id, user_id, title, created_at, updated_at FROM chats WHERE id = ?"#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(backend)?;

        Ok(row.map(Chat::from))
    }

    async fn create_chat(&self, owner: UserId, title: &str) -> Result<Chat, RepositoryError> {
        let now = Utc::now();
        let row: SqliteRowChat = sqlx::query_as(
            r#"INSERT INTO chats (user_id, title, created_at, updated_at) VALUES (?, ?, ?, ?)
               RETURNING id, user_id, title, created_at, updated_at"#,
        )
        .bind(owner.0)
        .bind(title)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(backend)?;

        Ok(row.into())
    }

    async fn update_chat_title(&self, id: ChatId, title: &str) -> Result<Chat, RepositoryError> {
        let row: Option<SqliteRowChat> = sqlx::query_as(
            r#"UPDATE chats SET title = ?, updated_at = ? WHERE id = ?
               RETURNING id, user_id, title, created_at, updated_at"#,
        )
        .bind(title)
        .bind(Utc::now())
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(backend)?;

        row.map(Chat::from)
            .ok_or_else(|| RepositoryError::NotFound(format!("chat {}", id)))
    }

    async fn delete_chat(&self, id: ChatId) -> Result<bool, RepositoryError> {
        let mut tx = self.pool.begin().await.map_err(backend)?;
        sqlx::query(r#"DELETE FROM messages WHERE chat_id = ?"#)
            .bind(id.0)
            .execute(&mut *tx)
            .await
            .map_err(backend)?;
        let deleted = sqlx::query(r#"DELETE FROM chats WHERE id = ?"#)
            .bind(id.0)
            .execute(&mut *tx)
            .await
            .map_err(backend)?
            .rows_affected();
        tx.commit().await.map_err(backend)?;

        Ok(deleted > 0)
    }

    async fn list_messages(&self, chat_id: ChatId) -> Result<Vec<StoredMessage>, RepositoryError> {
        let rows: Vec<SqliteRowMessage> = sqlx::query_as(
            r#"SELECT id, chat_id, role, content, provider, created_at FROM messages
               WHERE chat_id = ? ORDER BY id ASC"#,
        )
        .bind(chat_id.0)
        .fetch_all(&self.pool)
        .await
        .map_err(backend)?;

        rows.into_iter().map(StoredMessage::try_from).collect()
    }

    async fn append_message(&self, message: NewMessage) -> Result<StoredMessage, RepositoryError> {
        let now = Utc::now();
        let mut tx = self.pool.begin().await.map_err(backend)?;

        let touched = sqlx::query(r#"UPDATE chats SET updated_at = ? WHERE id = ?"#)
            .bind(now)
            .bind(message.chat_id.0)
            .execute(&mut *tx)
            .await
            .map_err(backend)?
            .rows_affected();
        if touched == 0 {
            return Err(RepositoryError::NotFound(format!(
                "chat {}",
                message.chat_id
            )));
        }

        let row: SqliteRowMessage = sqlx::query_as(
            r#"INSERT INTO messages (chat_id, role, content, provider, created_at)
               VALUES (?, ?, ?, ?, ?)
               RETURNING id, chat_id, role, content, provider, created_at"#,
        )
        .bind(message.chat_id.0)
        .bind(message.turn.role.as_str())
        .bind(&message.turn.content)
        .bind(message.turn.provider.map(|p| p.as_str()))
        .bind(now)
        .fetch_one(&mut *tx)
        .await
        .map_err(backend)?;
        tx.commit().await.map_err(backend)?;

        row.try_into()
    }
}

#[derive(Debug, Clone, FromRow)]
struct SqliteRowChat {
    id: i64,
    user_id: i64,
    title: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<SqliteRowChat> for Chat {
    fn from(row: SqliteRowChat) -> Self {
        Chat {
            id: ChatId(row.id),
            owner: UserId(row.user_id),
            title: row.title,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, Clone, FromRow)]
struct SqliteRowMessage {
    id: i64,
    chat_id: i64,
    role: String,
    content: String,
    provider: Option<String>,
    created_at: DateTime<Utc>,
}

impl TryFrom<SqliteRowMessage> for StoredMessage {
    type Error = RepositoryError;

    fn try_from(row: SqliteRowMessage) -> Result<Self, Self::Error> {
        let role = Role::from_str(&row.role).map_err(|e| RepositoryError::Backend(e.to_string()))?;
        let provider = row
            .provider
            .as_deref()
            .map(Provider::from_str)
            .transpose()
            .map_err(|e| RepositoryError::Backend(e.to_string()))?;

        Ok(StoredMessage {
            id: MessageId(row.id),
            chat_id: ChatId(row.chat_id),
            turn: ConversationTurn {
                role,
                content: row.content,
                provider,
            },
            created_at: row.created_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_chat_lifecycle() {
        let repo = SqliteChatRepository::in_memory().await.unwrap();

        let chat = repo.create_chat(UserId(1), "New Chat").await.unwrap();
        assert_eq!(chat.title, "New Chat");
        assert_eq!(repo.get_chat(chat.id).await.unwrap(), Some(chat.clone()));

        let renamed = repo.update_chat_title(chat.id, "Ownership").await.unwrap();
        assert_eq!(renamed.title, "Ownership");
        assert!(renamed.updated_at >= chat.updated_at);

        assert!(repo.delete_chat(chat.id).await.unwrap());
        assert_eq!(repo.get_chat(chat.id).await.unwrap(), None);
        assert!(!repo.delete_chat(chat.id).await.unwrap());
    }

    #[tokio::test]
    async fn test_messages_round_trip_verbatim() {
        let repo = SqliteChatRepository::in_memory().await.unwrap();
        let chat = repo.create_chat(UserId(1), "t").await.unwrap();
        let raw = "<think>\nstep one\n</think>\n\n```rust\nfn main() {}\n```";

        repo.append_message(NewMessage::new(
            chat.id,
            ConversationTurn::user("q").with_provider(Provider::DeepSeek),
        ))
        .await
        .unwrap();
        let stored = repo
            .append_message(NewMessage::new(
                chat.id,
                ConversationTurn::assistant(raw).with_provider(Provider::DeepSeek),
            ))
            .await
            .unwrap();

        let messages = repo.list_messages(chat.id).await.unwrap();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].turn.role, Role::User);
        assert_eq!(messages[1], stored);
        assert_eq!(messages[1].turn.content, raw);
    }

    #[tokio::test]
    async fn test_list_orders_by_recent_activity() {
        let repo = SqliteChatRepository::in_memory().await.unwrap();
        let first = repo.create_chat(UserId(1), "first").await.unwrap();
        let second = repo.create_chat(UserId(1), "second").await.unwrap();
        repo.create_chat(UserId(2), "someone else").await.unwrap();

        repo.append_message(NewMessage::new(first.id, ConversationTurn::user("bump")))
            .await
            .unwrap();

        let ids: Vec<_> = repo
            .list_chats(UserId(1))
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.id)
            .collect();
        assert_eq!(ids, vec![first.id, second.id]);
    }

    #[tokio::test]
    async fn test_append_to_missing_chat_fails() {
        let repo = SqliteChatRepository::in_memory().await.unwrap();
        let err = repo
            .append_message(NewMessage::new(ChatId(42), ConversationTurn::user("hi")))
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_file_database_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("chats.db");

        let chat_id = {
            let repo = SqliteChatRepository::open(&path).await.unwrap();
            let chat = repo.create_chat(UserId(1), "kept").await.unwrap();
            repo.append_message(NewMessage::new(chat.id, ConversationTurn::user("hello")))
                .await
                .unwrap();
            repo.pool.close().await;
            chat.id
        };

        let repo = SqliteChatRepository::open(&path).await.unwrap();
        let chat = repo.get_chat(chat_id).await.unwrap().unwrap();
        assert_eq!(chat.title, "kept");
        assert_eq!(repo.list_messages(chat_id).await.unwrap().len(), 1);
    }
}
