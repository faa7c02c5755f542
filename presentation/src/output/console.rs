//! Console renderer for formatted replies
//!
//! Turns [`ContentSegment`]s into terminal text. Stored replies are raw
//! provider text; they are segmented here, at display time.

use colored::{ColoredString, Colorize};
use duochat_domain::{Chat, ChatId, ContentSegment, OutputFormat, Role, StoredMessage, format};

const THOUGHT_HEADER: &str = "Thought process";

/// Renders chats, messages and reply segments for the console
#[derive(Debug, Clone)]
pub struct ConsoleRenderer {
    color: bool,
}

impl Default for ConsoleRenderer {
    fn default() -> Self {
        Self::new(true)
    }
}

impl ConsoleRenderer {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    fn paint(&self, text: &str, style: impl FnOnce(&str) -> ColoredString) -> String {
        if self.color {
            style(text).to_string()
        } else {
            text.to_string()
        }
    }

    /// Render reply text in the requested output format.
    pub fn render_text(&self, text: &str, output: OutputFormat) -> String {
        match output {
            OutputFormat::Raw => text.to_string(),
            OutputFormat::Json => Self::render_json(&format(text)),
            OutputFormat::Rendered => self.render_segments(&format(text)),
        }
    }

    /// Segments as pretty-printed JSON
    pub fn render_json(segments: &[ContentSegment]) -> String {
        serde_json::to_string_pretty(segments).unwrap_or_else(|_| "[]".to_string())
    }

    pub fn render_segments(&self, segments: &[ContentSegment]) -> String {
        segments
            .iter()
            .map(|segment| self.render_segment(segment))
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    fn render_segment(&self, segment: &ContentSegment) -> String {
        match segment {
            ContentSegment::Paragraph { text } => text.trim_end().to_string(),
            ContentSegment::CodeBlock { language, code } => {
                let mut out = self.paint(&format!("┌─ {}", language), |s| s.cyan());
                for line in code.strip_suffix('\n').unwrap_or(code).lines() {
                    out.push('\n');
                    out.push_str(&self.paint("│ ", |s| s.cyan()));
                    out.push_str(line);
                }
                out.push('\n');
                out.push_str(&self.paint("└─", |s| s.cyan()));
                out
            }
            ContentSegment::BulletList { heading, items } => {
                let lines = items.iter().map(|item| format!("  • {}", item));
                self.list(heading.as_deref(), lines)
            }
            ContentSegment::NumberedList { heading, items } => {
                let lines = items
                    .iter()
                    .enumerate()
                    .map(|(i, item)| format!("  {}. {}", i + 1, item));
                self.list(heading.as_deref(), lines)
            }
            ContentSegment::ThoughtAnswer {
                thought,
                label,
                answer,
            } => {
                let mut out = String::new();
                if !thought.is_empty() {
                    out.push_str(&self.paint(&format!("▸ {}", THOUGHT_HEADER), |s| {
                        s.dimmed().italic()
                    }));
                    for line in thought.lines() {
                        out.push('\n');
                        out.push_str(&self.paint(&format!("  {}", line), |s| s.dimmed()));
                    }
                    out.push_str("\n\n");
                }
                if let Some(label) = label {
                    out.push_str(&self.paint(label, |s| s.green().bold()));
                    out.push(' ');
                }
                out.push_str(answer);
                out
            }
        }
    }

    fn list(&self, heading: Option<&str>, lines: impl Iterator<Item = String>) -> String {
        let mut out: Vec<String> = Vec::new();
        if let Some(heading) = heading {
            out.push(self.paint(heading, |s| s.bold()));
        }
        out.extend(lines);
        out.join("\n")
    }

    /// A stored message with its speaker header.
    pub fn render_message(&self, message: &StoredMessage, output: OutputFormat) -> String {
        let turn = &message.turn;
        match turn.role {
            Role::User => format!(
                "{}\n{}",
                self.paint("You", |s| s.cyan().bold()),
                turn.content
            ),
            Role::Assistant => {
                let speaker = turn
                    .provider
                    .map(|p| p.display_name())
                    .unwrap_or("Assistant");
                format!(
                    "{}\n{}",
                    self.paint(&format!("── {} ──", speaker), |s| s.yellow().bold()),
                    self.render_text(&turn.content, output)
                )
            }
            Role::System => self.paint(&turn.content, |s| s.dimmed()),
        }
    }

    pub fn render_chat_list(&self, chats: &[Chat], current: Option<ChatId>) -> String {
        if chats.is_empty() {
            return "No chats yet.".to_string();
        }
        chats
            .iter()
            .map(|chat| {
                let marker = if Some(chat.id) == current { "*" } else { " " };
                format!(
                    "{} {:>4}  {}  {}",
                    marker,
                    self.paint(&format!("#{}", chat.id), |s| s.cyan()),
                    chat.title,
                    self.paint(
                        &chat.updated_at.format("%Y-%m-%d %H:%M").to_string(),
                        |s| s.dimmed()
                    )
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn render_error(&self, message: &str) -> String {
        format!("{} {}", self.paint("Error:", |s| s.red().bold()), message)
    }
}
