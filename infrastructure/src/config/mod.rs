//! Configuration file loading for duochat
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `DUOCHAT_*` environment variables (`__` separates nesting)
//! 2. `--config <path>` specified file
//! 3. Project root: `./duochat.toml` or `./.duochat.toml`
//! 4. Global: `$XDG_CONFIG_HOME/duochat/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, FileChatConfig, FileConfig, FileLoggingConfig, FileOutputConfig,
    FileProviderConfig, FileProvidersConfig, FileReplConfig, FileStorageConfig,
};
pub use loader::ConfigLoader;
