//! Infrastructure layer for duochat
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod logging;
pub mod providers;
pub mod storage;

// Re-export commonly used types
pub use config::{
    ConfigLoader, ConfigValidationError, FileChatConfig, FileConfig, FileLoggingConfig,
    FileOutputConfig, FileProviderConfig, FileProvidersConfig, FileReplConfig, FileStorageConfig,
};
pub use logging::JsonlConversationLogger;
pub use providers::{Credential, DeepSeekTransport, GeminiTransport, ProviderSettings};
pub use storage::{InMemoryChatRepository, SqliteChatRepository, StorageBackend};
