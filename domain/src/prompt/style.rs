//! Style contract sent to the providers.
//!
//! The rendering layer treats `*` specially and splits answers on the
//! thinking delimiters, so both providers are told to avoid emphasis markup
//! and to fence code with a language tag.

/// Opening delimiter of a reasoning span
pub const THINK_OPEN: &str = "<think>";

/// Closing delimiter of a reasoning span
pub const THINK_CLOSE: &str = "</think>";

/// System turn prepended to every DeepSeek request.
pub const REASONING_SYSTEM_INSTRUCTION: &str = "You are an AI assistant that provides detailed, \
accurate, and helpful answers. When analyzing a problem, first write your detailed thought \
process between <think> and </think> tags, then give your clear, direct answer immediately \
after the closing tag. Never use asterisks (*) for emphasis or formatting; use section \
headings and plain text instead. For code examples, always use fenced markdown code blocks \
that name the language, for example ```rust.";

/// Synthetic user turn opening a Gemini exchange that would otherwise start
/// with the model.
pub const GEMINI_GREETING: &str = "Hello, assist me with my questions.";

/// Synthetic model turn that follows [`GEMINI_GREETING`] and accepts the
/// style contract.
pub const GEMINI_STYLE_ACKNOWLEDGEMENT: &str = "I will provide detailed and well-formatted \
responses with proper headings and fenced code blocks, without using any asterisks (*) for \
emphasis or formatting.";
