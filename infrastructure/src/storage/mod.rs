//! Chat storage adapters
//!
//! Implementations of the [`ChatRepository`](duochat_application::ChatRepository)
//! port:
//!
//! | Backend | Type | Lifetime |
//! |---------|------|----------|
//! | `sqlite` | [`SqliteChatRepository`] | persistent file (WAL journal) |
//! | `memory` | [`InMemoryChatRepository`] | process only |

mod memory;
mod sqlite;

pub use memory::InMemoryChatRepository;
pub use sqlite::SqliteChatRepository;

use duochat_domain::DomainError;
use std::str::FromStr;

/// Which repository the binary should assemble.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StorageBackend {
    #[default]
    Sqlite,
    Memory,
}

impl StorageBackend {
    pub fn as_str(&self) -> &'static str {
        match self {
            StorageBackend::Sqlite => "sqlite",
            StorageBackend::Memory => "memory",
        }
    }
}

impl FromStr for StorageBackend {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sqlite" => Ok(StorageBackend::Sqlite),
            "memory" => Ok(StorageBackend::Memory),
            other => Err(DomainError::InvalidInput(format!(
                "unknown storage backend '{}'",
                other
            ))),
        }
    }
}
