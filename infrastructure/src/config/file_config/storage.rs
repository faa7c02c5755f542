//! Storage configuration from TOML (`[storage]` section)

use super::{data_dir, expand_home};
use crate::storage::StorageBackend;
use duochat_domain::{ConfigIssue, ConfigIssueCode};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

const DATABASE_FILE: &str = "chats.db";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileStorageConfig {
    /// "sqlite" (default) or "memory"
    pub backend: String,
    /// SQLite database file
    pub path: Option<String>,
}

impl Default for FileStorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default().as_str().to_string(),
            path: None,
        }
    }
}

impl FileStorageConfig {
    /// Parse the backend name, returning any issues.
    pub fn parse_backend(&self) -> (StorageBackend, Vec<ConfigIssue>) {
        match self.backend.parse::<StorageBackend>() {
            Ok(backend) => (backend, Vec::new()),
            Err(e) => (
                StorageBackend::default(),
                vec![ConfigIssue::error(
                    ConfigIssueCode::UnknownStorageBackend,
                    format!("storage.backend: {}", e),
                )],
            ),
        }
    }

    /// Database location: the configured path, the data directory, or the
    /// working directory as a last resort.
    pub fn database_path(&self) -> PathBuf {
        match &self.path {
            Some(path) => expand_home(path),
            None => data_dir()
                .map(|d| d.join(DATABASE_FILE))
                .unwrap_or_else(|| PathBuf::from(DATABASE_FILE)),
        }
    }
}
