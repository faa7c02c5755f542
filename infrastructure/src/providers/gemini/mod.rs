//! Gemini provider (Generative Language `generateContent`)

mod transport;
mod types;

pub use transport::GeminiTransport;
