//! CLI command definitions

use clap::{Parser, ValueEnum};
use duochat_domain::{ChatId, OutputFormat, Provider};
use std::path::PathBuf;

/// Provider selectable on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ProviderChoice {
    /// DeepSeek R1 (reasoning, shows its thinking)
    Deepseek,
    /// Google Gemini
    Gemini,
}

impl From<ProviderChoice> for Provider {
    fn from(choice: ProviderChoice) -> Self {
        match choice {
            ProviderChoice::Deepseek => Provider::DeepSeek,
            ProviderChoice::Gemini => Provider::Gemini,
        }
    }
}

/// CLI arguments for duochat
#[derive(Parser, Debug)]
#[command(name = "duochat")]
#[command(author, version, about = "Chat with DeepSeek or Gemini from the terminal")]
#[command(long_about = r#"
duochat keeps named conversations with one of two LLM providers and renders
their replies (thinking sections, code blocks, lists) in the terminal.

Without a MESSAGE an interactive session starts.

Configuration files are loaded from (in priority order):
1. DUOCHAT_* environment variables
2. --config <path>                     Explicit config file
3. ./duochat.toml                      Project-level config
4. ~/.config/duochat/config.toml       Global config

API keys are read from NVIDIA_API_KEY (DeepSeek) and GOOGLE_API_KEY (Gemini).

Example:
  duochat "Explain the borrow checker in two sentences"
  duochat --provider gemini --chat 3 "And lifetimes?"
  duochat --list
"#)]
pub struct Cli {
    /// Message to send (starts interactive mode when omitted)
    pub message: Option<String>,

    /// Provider to send to (defaults to the configured provider)
    #[arg(short, long, value_enum)]
    pub provider: Option<ProviderChoice>,

    /// Continue an existing chat instead of starting a new one
    #[arg(long, value_name = "ID")]
    pub chat: Option<i64>,

    /// Print the reply exactly as received
    #[arg(long, conflicts_with = "json")]
    pub raw: bool,

    /// Print the formatted reply as JSON segments
    #[arg(long)]
    pub json: bool,

    /// List chats and exit
    #[arg(long)]
    pub list: bool,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}

impl Cli {
    pub fn provider(&self) -> Option<Provider> {
        self.provider.map(Provider::from)
    }

    pub fn chat_id(&self) -> Option<ChatId> {
        self.chat.map(ChatId)
    }

    /// Output format from flags, falling back to the configured one.
    pub fn output_format(&self, configured: Option<OutputFormat>) -> OutputFormat {
        if self.raw {
            OutputFormat::Raw
        } else if self.json {
            OutputFormat::Json
        } else {
            configured.unwrap_or_default()
        }
    }
}
