//! Presentation layer for duochat
//!
//! This crate contains CLI definitions, the reply renderer,
//! progress indicators, and the interactive chat interface.

pub mod chat;
pub mod cli;
pub mod config;
pub mod output;
pub mod progress;

// Re-export commonly used types
pub use chat::{ChatRepl, ReplCommand};
pub use cli::commands::{Cli, ProviderChoice};
pub use config::{OutputConfig, ReplConfig};
pub use output::console::ConsoleRenderer;
pub use progress::ThinkingSpinner;
