//! Provider configuration from TOML (`[providers]` section)

use crate::providers::{Credential, ProviderSettings};
use duochat_domain::{ConfigIssue, ConfigIssueCode, Provider};
use serde::{Deserialize, Serialize};

/// Settings for one provider. Unset fields fall back to the provider's
/// built-in defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileProviderConfig {
    /// Environment variable holding the API key.
    pub api_key_env: Option<String>,
    /// Direct API key (not recommended, use the env var instead).
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub model: Option<String>,
    pub temperature: Option<f32>,
    pub top_p: Option<f32>,
    pub max_tokens: Option<u32>,
}

impl FileProviderConfig {
    /// Effective request settings for `provider`.
    pub fn settings(&self, provider: Provider) -> ProviderSettings {
        let defaults = ProviderSettings::default_for(provider);
        ProviderSettings {
            base_url: self.base_url.clone().unwrap_or(defaults.base_url),
            model: self.model.clone().unwrap_or(defaults.model),
            temperature: self.temperature.unwrap_or(defaults.temperature),
            top_p: self.top_p.unwrap_or(defaults.top_p),
            max_tokens: self.max_tokens.unwrap_or(defaults.max_tokens),
        }
    }

    pub fn api_key_env(&self, provider: Provider) -> String {
        self.api_key_env
            .clone()
            .unwrap_or_else(|| ProviderSettings::default_api_key_env(provider).to_string())
    }

    /// Resolve the credential. Reads the environment; call once at startup.
    pub fn credential(&self, provider: Provider) -> Credential {
        Credential::resolve(self.api_key.as_deref(), &self.api_key_env(provider))
    }

    fn validate(&self, provider: Provider) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();
        let section = format!("providers.{}", provider.as_str());

        if let Some(t) = self.temperature
            && !(0.0..=2.0).contains(&t)
        {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::SamplingOutOfRange,
                format!("{}.temperature = {} is outside 0.0..=2.0", section, t),
            ));
        }
        if let Some(p) = self.top_p
            && !(p > 0.0 && p <= 1.0)
        {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::SamplingOutOfRange,
                format!("{}.top_p = {} is outside (0.0, 1.0]", section, p),
            ));
        }
        if self.max_tokens == Some(0) {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::ZeroMaxTokens,
                format!("{}.max_tokens cannot be 0", section),
            ));
        }
        if self.api_key.is_some() {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::InlineApiKey,
                format!(
                    "{}.api_key is set in a config file; prefer the {} environment variable",
                    section,
                    self.api_key_env(provider)
                ),
            ));
        }
        issues
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileProvidersConfig {
    /// Default provider: "deepseek" or "gemini".
    pub default: Option<String>,
    pub deepseek: FileProviderConfig,
    pub gemini: FileProviderConfig,
}

impl FileProvidersConfig {
    pub fn for_provider(&self, provider: Provider) -> &FileProviderConfig {
        match provider {
            Provider::DeepSeek => &self.deepseek,
            Provider::Gemini => &self.gemini,
        }
    }

    /// Parse the default provider, returning any issues.
    pub fn parse_default(&self) -> (Provider, Vec<ConfigIssue>) {
        match self.default.as_deref().map(str::parse::<Provider>) {
            None => (Provider::default(), Vec::new()),
            Some(Ok(provider)) => (provider, Vec::new()),
            Some(Err(e)) => (
                Provider::default(),
                vec![ConfigIssue::error(
                    ConfigIssueCode::UnknownProvider,
                    format!("providers.default: {}", e),
                )],
            ),
        }
    }

    pub(super) fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = self.parse_default().1;
        for provider in Provider::all() {
            issues.extend(self.for_provider(provider).validate(provider));
        }
        issues
    }
}
