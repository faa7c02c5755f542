//! Slash commands understood by the chat REPL

use duochat_domain::{ChatId, Provider};

/// A parsed `/command` line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    Help,
    /// Start a new chat, optionally titled
    New(Option<String>),
    List,
    Open(ChatId),
    Rename(String),
    /// Delete the given chat, or the open one
    Delete(Option<ChatId>),
    /// Switch provider, or show the current one
    Provider(Option<Provider>),
    History,
    Quit,
    Unknown(String),
    /// Known command with bad arguments
    Invalid(String),
}

impl ReplCommand {
    /// Parse a line starting with `/`. Returns `None` for ordinary messages.
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim();
        let rest = line.strip_prefix('/')?;
        let (name, arg) = match rest.split_once(char::is_whitespace) {
            Some((name, arg)) => (name, arg.trim()),
            None => (rest, ""),
        };
        let arg = (!arg.is_empty()).then_some(arg);

        let command = match name {
            "help" | "h" | "?" => ReplCommand::Help,
            "quit" | "exit" | "q" => ReplCommand::Quit,
            "new" => ReplCommand::New(arg.map(str::to_string)),
            "list" | "ls" => ReplCommand::List,
            "history" => ReplCommand::History,
            "open" => match arg.map(parse_chat_id) {
                Some(Some(id)) => ReplCommand::Open(id),
                _ => ReplCommand::Invalid("usage: /open <chat id>".to_string()),
            },
            "rename" => match arg {
                Some(title) => ReplCommand::Rename(title.to_string()),
                None => ReplCommand::Invalid("usage: /rename <title>".to_string()),
            },
            "delete" | "rm" => match arg.map(parse_chat_id) {
                None => ReplCommand::Delete(None),
                Some(Some(id)) => ReplCommand::Delete(Some(id)),
                Some(None) => ReplCommand::Invalid("usage: /delete [chat id]".to_string()),
            },
            "provider" | "p" => match arg.map(str::parse::<Provider>) {
                None => ReplCommand::Provider(None),
                Some(Ok(provider)) => ReplCommand::Provider(Some(provider)),
                Some(Err(e)) => ReplCommand::Invalid(e.to_string()),
            },
            other => ReplCommand::Unknown(format!("/{}", other)),
        };
        Some(command)
    }

    pub fn help_text() -> &'static str {
        "Commands:
  /new [title]          - Start a new chat
  /list, /ls            - List your chats
  /open <id>            - Switch to a chat
  /rename <title>       - Rename the open chat
  /delete [id]          - Delete a chat (default: the open one)
  /provider [name]      - Show or switch provider (deepseek, gemini)
  /history              - Show messages in the open chat
  /help, /h, /?         - Show this help
  /quit, /exit, /q      - Exit chat"
    }
}

fn parse_chat_id(arg: &str) -> Option<ChatId> {
    arg.trim_start_matches('#').parse::<i64>().ok().map(ChatId)
}
