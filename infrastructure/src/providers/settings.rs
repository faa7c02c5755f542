//! Per-provider request settings.

use duochat_domain::Provider;

/// Endpoint, model and sampling parameters for one provider.
///
/// Sampling values are fixed per provider; nothing here is derived from the
/// conversation being sent.
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderSettings {
    pub base_url: String,
    pub model: String,
    pub temperature: f32,
    pub top_p: f32,
    pub max_tokens: u32,
}

impl ProviderSettings {
    pub fn deepseek() -> Self {
        Self {
            base_url: "https://integrate.api.nvidia.com/v1".to_string(),
            model: "deepseek-ai/deepseek-r1-distill-qwen-32b".to_string(),
            temperature: 0.6,
            top_p: 0.7,
            max_tokens: 4096,
        }
    }

    pub fn gemini() -> Self {
        Self {
            base_url: "https://generativelanguage.googleapis.com".to_string(),
            model: "gemini-1.5-pro".to_string(),
            temperature: 0.7,
            top_p: 0.95,
            max_tokens: 8192,
        }
    }

    pub fn default_for(provider: Provider) -> Self {
        match provider {
            Provider::DeepSeek => Self::deepseek(),
            Provider::Gemini => Self::gemini(),
        }
    }

    /// Environment variable the provider's API key is read from by default.
    pub fn default_api_key_env(provider: Provider) -> &'static str {
        match provider {
            Provider::DeepSeek => "NVIDIA_API_KEY",
            Provider::Gemini => "GOOGLE_API_KEY",
        }
    }

    /// Base URL without a trailing slash, ready for path joining.
    pub(crate) fn base(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }
}
