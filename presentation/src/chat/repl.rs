//! REPL (Read-Eval-Print Loop) for interactive chat

use crate::chat::command::ReplCommand;
use crate::config::{OutputConfig, ReplConfig};
use crate::output::console::ConsoleRenderer;
use crate::progress::ThinkingSpinner;
use colored::Colorize;
use duochat_application::{
    ChatError, ManageChatsUseCase, NoProgress, ReplyProgress, SendMessageUseCase,
};
use duochat_domain::{Chat, ChatId, Provider, UserId};
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use std::sync::Arc;
use tracing::{debug, warn};

/// Interactive chat REPL
///
/// Messages go to the open chat; one is created on the first message when
/// none is open.
pub struct ChatRepl {
    chats: Arc<ManageChatsUseCase>,
    sender: Arc<SendMessageUseCase>,
    owner: UserId,
    renderer: ConsoleRenderer,
    output: OutputConfig,
    config: ReplConfig,
    provider: Provider,
    current: Option<Chat>,
}

impl ChatRepl {
    pub fn new(
        chats: Arc<ManageChatsUseCase>,
        sender: Arc<SendMessageUseCase>,
        owner: UserId,
    ) -> Self {
        let provider = sender.default_provider();
        Self {
            chats,
            sender,
            owner,
            renderer: ConsoleRenderer::default(),
            output: OutputConfig::default(),
            config: ReplConfig::default(),
            provider,
            current: None,
        }
    }

    pub fn with_output(mut self, output: OutputConfig) -> Self {
        self.renderer = ConsoleRenderer::new(output.color);
        self.output = output;
        self
    }

    pub fn with_config(mut self, config: ReplConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_provider(mut self, provider: Provider) -> Self {
        self.provider = provider;
        self
    }

    /// Resume an existing chat instead of starting fresh.
    pub async fn open(mut self, id: ChatId) -> Result<Self, ChatError> {
        self.current = Some(self.chats.get(self.owner, id).await?);
        Ok(self)
    }

    fn prompt(&self) -> String {
        match &self.current {
            Some(chat) => format!("{} #{}> ", self.provider.as_str(), chat.id),
            None => format!("{}> ", self.provider.as_str()),
        }
    }

    /// Run the interactive REPL
    pub async fn run(&mut self) -> rustyline::Result<()> {
        let mut rl = DefaultEditor::new()?;

        if let Some(ref path) = self.config.history_file {
            if let Some(parent) = path.parent()
                && let Err(e) = std::fs::create_dir_all(parent)
            {
                warn!("Cannot create history directory {}: {}", parent.display(), e);
            }
            if rl.load_history(path).is_err() {
                debug!("No history at {}", path.display());
            }
        }

        self.print_welcome();

        loop {
            match rl.readline(&self.prompt()) {
                Ok(line) => {
                    let line = line.trim();
                    if line.is_empty() {
                        continue;
                    }
                    let _ = rl.add_history_entry(line);

                    if let Some(command) = ReplCommand::parse(line) {
                        if self.handle_command(command).await {
                            break;
                        }
                        continue;
                    }

                    self.send(line).await;
                }
                Err(ReadlineError::Interrupted) => {
                    println!("^C");
                    continue;
                }
                Err(ReadlineError::Eof) => {
                    println!("Bye!");
                    break;
                }
                Err(err) => {
                    eprintln!("{}", self.renderer.render_error(&format!("{:?}", err)));
                    break;
                }
            }
        }

        if let Some(ref path) = self.config.history_file
            && let Err(e) = rl.save_history(path)
        {
            warn!("Failed to save history to {}: {}", path.display(), e);
        }

        Ok(())
    }

    fn print_welcome(&self) {
        println!();
        println!("╭─────────────────────────────────────────────╮");
        println!("│                duochat - chat               │");
        println!("╰─────────────────────────────────────────────╯");
        println!();
        println!("Provider: {}", self.provider.display_name());
        if let Some(chat) = &self.current {
            println!("Chat: #{} {}", chat.id, chat.title);
        }
        println!("Type /help for commands.");
        println!();
    }

    fn print_error(&self, error: &ChatError) {
        eprintln!("{}", self.renderer.render_error(&error.to_string()));
    }

    /// Handle a slash command. Returns true if the REPL should exit.
    async fn handle_command(&mut self, command: ReplCommand) -> bool {
        match command {
            ReplCommand::Quit => {
                println!("Bye!");
                return true;
            }
            ReplCommand::Help => {
                println!();
                println!("{}", ReplCommand::help_text());
                println!();
            }
            ReplCommand::Provider(None) => {
                println!("Current provider: {}", self.provider.display_name());
            }
            ReplCommand::Provider(Some(provider)) => {
                self.provider = provider;
                println!("Switched to {}", provider.display_name());
            }
            ReplCommand::New(title) => match self.chats.create(self.owner, title.as_deref()).await {
                Ok(chat) => {
                    println!("Started chat #{} {}", chat.id, chat.title);
                    self.current = Some(chat);
                }
                Err(e) => self.print_error(&e),
            },
            ReplCommand::List => match self.chats.list(self.owner).await {
                Ok(chats) => {
                    let current = self.current.as_ref().map(|c| c.id);
                    println!("{}", self.renderer.render_chat_list(&chats, current));
                }
                Err(e) => self.print_error(&e),
            },
            ReplCommand::Open(id) => match self.chats.get(self.owner, id).await {
                Ok(chat) => {
                    println!("Opened chat #{} {}", chat.id, chat.title);
                    self.current = Some(chat);
                }
                Err(e) => self.print_error(&e),
            },
            ReplCommand::Rename(title) => {
                let Some(id) = self.current.as_ref().map(|c| c.id) else {
                    println!("No chat is open.");
                    return false;
                };
                match self.chats.rename(self.owner, id, &title).await {
                    Ok(chat) => {
                        println!("Renamed to {}", chat.title);
                        self.current = Some(chat);
                    }
                    Err(e) => self.print_error(&e),
                }
            }
            ReplCommand::Delete(target) => {
                let Some(id) = target.or(self.current.as_ref().map(|c| c.id)) else {
                    println!("No chat is open.");
                    return false;
                };
                match self.chats.delete(self.owner, id).await {
                    Ok(()) => {
                        println!("Deleted chat #{}", id);
                        if self.current.as_ref().is_some_and(|c| c.id == id) {
                            self.current = None;
                        }
                    }
                    Err(e) => self.print_error(&e),
                }
            }
            ReplCommand::History => {
                let Some(id) = self.current.as_ref().map(|c| c.id) else {
                    println!("No chat is open.");
                    return false;
                };
                match self.chats.messages(self.owner, id).await {
                    Ok(messages) if messages.is_empty() => println!("No messages yet."),
                    Ok(messages) => {
                        for message in &messages {
                            println!(
                                "{}\n",
                                self.renderer.render_message(message, self.output.format)
                            );
                        }
                    }
                    Err(e) => self.print_error(&e),
                }
            }
            ReplCommand::Unknown(name) => {
                println!("Unknown command: {}", name);
                println!("Type /help for available commands");
            }
            ReplCommand::Invalid(message) => println!("{}", message),
        }
        false
    }

    async fn ensure_chat(&mut self) -> Result<ChatId, ChatError> {
        if let Some(chat) = &self.current {
            return Ok(chat.id);
        }
        let chat = self.chats.create(self.owner, None).await?;
        debug!("Created chat {} for REPL session", chat.id);
        let id = chat.id;
        self.current = Some(chat);
        Ok(id)
    }

    async fn send(&mut self, content: &str) {
        let chat_id = match self.ensure_chat().await {
            Ok(id) => id,
            Err(e) => return self.print_error(&e),
        };

        println!();
        let spinner = ThinkingSpinner::new();
        let progress: &dyn ReplyProgress = if self.config.show_progress {
            &spinner
        } else {
            &NoProgress
        };
        let result = self
            .sender
            .execute_with_progress(self.owner, chat_id, content, Some(self.provider), progress)
            .await;

        match result {
            Ok(exchange) => {
                println!(
                    "{}",
                    self.renderer.render_message(&exchange.reply, self.output.format)
                );
                if let Some(title) = exchange.retitled
                    && let Some(chat) = self.current.as_mut()
                {
                    println!("{}", format!("(chat named \"{}\")", title).dimmed());
                    chat.title = title;
                }
            }
            Err(e) => self.print_error(&e),
        }
        println!();
    }
}
