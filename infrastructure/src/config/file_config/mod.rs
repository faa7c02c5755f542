//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

mod chat;
mod logging;
mod output;
mod providers;
mod repl;
mod storage;

pub use chat::FileChatConfig;
pub use logging::FileLoggingConfig;
pub use output::FileOutputConfig;
pub use providers::{FileProviderConfig, FileProvidersConfig};
pub use repl::FileReplConfig;
pub use storage::FileStorageConfig;

use duochat_domain::{ConfigIssue, ConfigIssueCode};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

/// Configuration rejected because of error-severity issues
#[derive(Debug, Error)]
#[error("invalid configuration: {}", summarize(.issues))]
pub struct ConfigValidationError {
    pub issues: Vec<ConfigIssue>,
}

fn summarize(issues: &[ConfigIssue]) -> String {
    issues
        .iter()
        .map(|i| i.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Provider endpoints, models and credentials
    pub providers: FileProvidersConfig,
    /// Chat persistence
    pub storage: FileStorageConfig,
    /// Chat ownership and naming
    pub chat: FileChatConfig,
    /// Conversation transcript
    pub logging: FileLoggingConfig,
    /// Output settings
    pub output: FileOutputConfig,
    /// REPL settings
    pub repl: FileReplConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    ///
    /// Checks provider and backend names, sampling ranges, inline API keys
    /// and the title length.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = self.providers.validate();
        issues.extend(self.storage.parse_backend().1);

        if self.chat.title_max_chars == 0 {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::ZeroTitleLength,
                "chat.title_max_chars is 0, using the default length",
            ));
        }

        issues
    }

    /// Fail on error-severity issues; warnings are returned for reporting.
    pub fn check(&self) -> Result<Vec<ConfigIssue>, ConfigValidationError> {
        let (errors, warnings): (Vec<_>, Vec<_>) =
            self.validate().into_iter().partition(ConfigIssue::is_error);
        if errors.is_empty() {
            Ok(warnings)
        } else {
            Err(ConfigValidationError { issues: errors })
        }
    }
}

/// Application data directory (`$XDG_DATA_HOME/duochat`).
pub(crate) fn data_dir() -> Option<PathBuf> {
    dirs::data_dir().map(|d| d.join("duochat"))
}

/// Expand a leading `~/` to the home directory.
pub(crate) fn expand_home(path: &str) -> PathBuf {
    match path.strip_prefix("~/") {
        Some(rest) => dirs::home_dir()
            .map(|home| home.join(rest))
            .unwrap_or_else(|| PathBuf::from(path)),
        None => PathBuf::from(path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::StorageBackend;
    use duochat_domain::{OutputFormat, Provider};

    #[test]
    fn test_deserialize_full_config() {
        let toml_str = r#"
[providers]
default = "gemini"

[providers.deepseek]
api_key_env = "MY_NVIDIA_KEY"
max_tokens = 2048

[providers.gemini]
model = "gemini-1.5-flash"

[storage]
backend = "memory"

[chat]
user_id = 7
title_max_chars = 40

[logging]
conversation_log = "/tmp/duochat.jsonl"

[output]
format = "json"
color = false

[repl]
show_progress = false
history_file = "/tmp/duochat-history.txt"
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.providers.parse_default().0, Provider::Gemini);
        assert_eq!(
            config.providers.deepseek.api_key_env(Provider::DeepSeek),
            "MY_NVIDIA_KEY"
        );
        assert_eq!(
            config.providers.deepseek.settings(Provider::DeepSeek).max_tokens,
            2048
        );
        assert_eq!(config.storage.parse_backend().0, StorageBackend::Memory);
        assert_eq!(config.chat.owner().0, 7);
        assert_eq!(config.chat.title_max_chars, 40);
        assert_eq!(
            config.logging.conversation_log_path(),
            Some(PathBuf::from("/tmp/duochat.jsonl"))
        );
        assert_eq!(config.output.format, Some(OutputFormat::Json));
        assert!(!config.repl.show_progress);
        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_deserialize_partial_config() {
        let config: FileConfig = toml::from_str("[chat]\nuser_id = 3\n").unwrap();
        assert_eq!(config.chat.user_id, 3);
        assert_eq!(config.chat.title_max_chars, 30);
        assert!(config.output.color);
        assert!(config.repl.show_progress);
        assert_eq!(config.storage.backend, "sqlite");
    }

    #[test]
    fn test_validate_valid_config() {
        let config = FileConfig::default();
        assert!(config.validate().is_empty());
        assert!(config.check().unwrap().is_empty());
    }

    #[test]
    fn test_check_separates_errors_from_warnings() {
        let mut config = FileConfig::default();
        config.chat.title_max_chars = 0;
        let warnings = config.check().unwrap();
        assert_eq!(warnings.len(), 1);

        config.storage.backend = "mongo".to_string();
        let err = config.check().unwrap_err();
        assert_eq!(err.issues.len(), 1);
        assert!(err.to_string().contains("storage.backend"));
    }

    #[test]
    fn test_expand_home() {
        assert_eq!(expand_home("/abs/path"), PathBuf::from("/abs/path"));
        assert_eq!(expand_home("relative"), PathBuf::from("relative"));
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_home("~/x.db"), home.join("x.db"));
        }
    }
}
