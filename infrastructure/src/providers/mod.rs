//! Provider transports
//!
//! One [`ProviderTransport`](duochat_application::ProviderTransport)
//! implementation per provider, sharing a single `reqwest::Client`:
//!
//! | Provider | Transport | Wire format |
//! |----------|-----------|-------------|
//! | DeepSeek | [`DeepSeekTransport`] | OpenAI-compatible chat completions |
//! | Gemini | [`GeminiTransport`] | Generative Language `generateContent` |

pub mod credential;
pub mod deepseek;
pub mod gemini;
mod http;
pub mod settings;

#[cfg(test)]
pub(crate) mod test_server;

pub use credential::Credential;
pub use deepseek::DeepSeekTransport;
pub use gemini::GeminiTransport;
pub use settings::ProviderSettings;
