//! DeepSeek provider (OpenAI-compatible chat completions)

mod transport;
mod types;

pub use transport::DeepSeekTransport;
