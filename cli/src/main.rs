//! CLI entrypoint for duochat
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result};
use clap::Parser;
use duochat_application::{
    ChatBehavior, ChatRepository, ConversationLogger, GenerateReplyUseCase, ManageChatsUseCase,
    NoConversationLogger, NoProgress, SendMessageUseCase,
};
use duochat_domain::{OutputFormat, Provider};
use duochat_infrastructure::{
    ConfigLoader, DeepSeekTransport, FileConfig, GeminiTransport, InMemoryChatRepository,
    JsonlConversationLogger, SqliteChatRepository, StorageBackend,
};
use duochat_presentation::{
    ChatRepl, Cli, ConsoleRenderer, OutputConfig, ReplConfig, ThinkingSpinner,
};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    info!("Starting duochat");

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_deref());
        return Ok(());
    }

    // === Configuration ===
    let config: FileConfig = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_deref()).context("failed to load configuration")?
    };
    for warning in config.check()? {
        warn!("{}", warning);
    }

    // === Dependency Injection ===
    // Credentials are read from the environment exactly once, here.
    let client = reqwest::Client::new();
    let deepseek = config.providers.for_provider(Provider::DeepSeek);
    let gemini = config.providers.for_provider(Provider::Gemini);
    let deepseek_key = deepseek.credential(Provider::DeepSeek);
    let gemini_key = gemini.credential(Provider::Gemini);

    for (provider, credential, section) in [
        (Provider::DeepSeek, &deepseek_key, deepseek),
        (Provider::Gemini, &gemini_key, gemini),
    ] {
        if !credential.is_present() {
            warn!(
                "No API key for {}: set {}",
                provider.display_name(),
                section.api_key_env(provider)
            );
        }
    }

    let conversation_logger: Arc<dyn ConversationLogger> =
        match config.logging.conversation_log_path() {
            Some(path) => match JsonlConversationLogger::open(&path) {
                Some(logger) => Arc::new(logger),
                None => {
                    warn!("Conversation log disabled: cannot open {}", path.display());
                    Arc::new(NoConversationLogger)
                }
            },
            None => Arc::new(NoConversationLogger),
        };

    let generator = GenerateReplyUseCase::new()
        .with_transport(Arc::new(DeepSeekTransport::new(
            client.clone(),
            deepseek.settings(Provider::DeepSeek),
            deepseek_key,
        )))
        .with_transport(Arc::new(GeminiTransport::new(
            client,
            gemini.settings(Provider::Gemini),
            gemini_key,
        )))
        .with_conversation_logger(conversation_logger.clone());

    let repository: Arc<dyn ChatRepository> = match config.storage.parse_backend().0 {
        StorageBackend::Sqlite => {
            let path = config.storage.database_path();
            info!("Using chat database at {}", path.display());
            Arc::new(
                SqliteChatRepository::open(&path)
                    .await
                    .with_context(|| format!("failed to open {}", path.display()))?,
            )
        }
        StorageBackend::Memory => Arc::new(InMemoryChatRepository::new()),
    };

    let (default_provider, _) = config.providers.parse_default();
    let behavior = ChatBehavior::default()
        .with_default_provider(default_provider)
        .with_title_max_chars(config.chat.title_max_chars);

    let chats = Arc::new(
        ManageChatsUseCase::new(repository.clone())
            .with_conversation_logger(conversation_logger),
    );
    let sender = Arc::new(
        SendMessageUseCase::new(repository, Arc::new(generator)).with_behavior(behavior),
    );
    let owner = config.chat.owner();

    let output = OutputConfig {
        format: cli.output_format(config.output.format),
        color: config.output.color_enabled(),
    };
    let renderer = ConsoleRenderer::new(output.color);

    // List mode
    if cli.list {
        let chats = chats.list(owner).await?;
        println!("{}", renderer.render_chat_list(&chats, None));
        return Ok(());
    }

    // Interactive mode
    let Some(message) = cli.message.as_deref() else {
        let repl_config = ReplConfig {
            show_progress: config.repl.show_progress,
            history_file: config.repl.history_path(),
        };
        let mut repl = ChatRepl::new(chats, sender, owner)
            .with_output(output)
            .with_config(repl_config)
            .with_provider(cli.provider().unwrap_or(default_provider));
        if let Some(id) = cli.chat_id() {
            repl = repl.open(id).await?;
        }
        repl.run().await?;
        return Ok(());
    };

    // Single message mode
    let chat_id = match cli.chat_id() {
        Some(id) => chats.get(owner, id).await?.id,
        None => chats.create(owner, None).await?.id,
    };

    let exchange = if output.format == OutputFormat::Rendered && config.repl.show_progress {
        let spinner = ThinkingSpinner::new();
        sender
            .execute_with_progress(owner, chat_id, message, cli.provider(), &spinner)
            .await?
    } else {
        sender
            .execute_with_progress(owner, chat_id, message, cli.provider(), &NoProgress)
            .await?
    };

    println!("{}", renderer.render_text(exchange.reply_text(), output.format));
    info!("Reply stored in chat {}", chat_id);

    Ok(())
}
