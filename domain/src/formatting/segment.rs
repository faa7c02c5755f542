//! Renderable content segments.

use serde::{Deserialize, Serialize};

/// Language label used for fenced code without a tag.
pub const DEFAULT_CODE_LANGUAGE: &str = "code";

/// A typed, renderable unit of formatted text.
///
/// Produced fresh on every [`format`](super::parser::format) call; carries no
/// identity beyond its position in the returned sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentSegment {
    Paragraph {
        text: String,
    },
    CodeBlock {
        /// Fence tag, or [`DEFAULT_CODE_LANGUAGE`] when the fence had none.
        language: String,
        /// Fenced content, verbatim.
        code: String,
    },
    BulletList {
        heading: Option<String>,
        items: Vec<String>,
    },
    NumberedList {
        heading: Option<String>,
        items: Vec<String>,
    },
    ThoughtAnswer {
        thought: String,
        /// `Answer:` / `Solution:` marker for the fallback split; `None` when
        /// the thinking delimiter was used.
        label: Option<String>,
        answer: String,
    },
}

impl ContentSegment {
    pub fn paragraph(text: impl Into<String>) -> Self {
        ContentSegment::Paragraph { text: text.into() }
    }

    /// Short name of the variant, for logs and debugging output.
    pub fn kind(&self) -> &'static str {
        match self {
            ContentSegment::Paragraph { .. } => "paragraph",
            ContentSegment::CodeBlock { .. } => "code_block",
            ContentSegment::BulletList { .. } => "bullet_list",
            ContentSegment::NumberedList { .. } => "numbered_list",
            ContentSegment::ThoughtAnswer { .. } => "thought_answer",
        }
    }
}
