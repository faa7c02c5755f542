//! Provider value object representing one of the two chat backends

use super::error::DomainError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Available LLM providers (Value Object)
///
/// `DeepSeek` is the reasoning-style provider: it accepts a `system` turn and
/// wraps its internal reasoning in `<think>` delimiters. `Gemini` is the
/// instruction-constrained provider: no `system` role, the assistant role is
/// called `model`, and an exchange must open with a user turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Provider {
    #[default]
    DeepSeek,
    Gemini,
}

impl Provider {
    /// Get the string identifier for this provider
    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::DeepSeek => "deepseek",
            Provider::Gemini => "gemini",
        }
    }

    /// Human readable name used by rendering surfaces
    pub fn display_name(&self) -> &'static str {
        match self {
            Provider::DeepSeek => "DeepSeek AI",
            Provider::Gemini => "Gemini AI",
        }
    }

    pub fn all() -> [Provider; 2] {
        [Provider::DeepSeek, Provider::Gemini]
    }
}

impl std::fmt::Display for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Provider {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "deepseek" => Ok(Provider::DeepSeek),
            "gemini" => Ok(Provider::Gemini),
            other => Err(DomainError::InvalidProvider(other.to_string())),
        }
    }
}

impl Serialize for Provider {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Provider {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_roundtrip() {
        for provider in Provider::all() {
            let s = provider.to_string();
            let parsed: Provider = s.parse().unwrap();
            assert_eq!(provider, parsed);
        }
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("Gemini".parse::<Provider>().unwrap(), Provider::Gemini);
        assert_eq!(" DEEPSEEK ".parse::<Provider>().unwrap(), Provider::DeepSeek);
    }

    #[test]
    fn test_unknown_provider_is_rejected() {
        let err = "claude".parse::<Provider>().unwrap_err();
        assert_eq!(err, DomainError::InvalidProvider("claude".to_string()));
    }

    #[test]
    fn test_provider_default() {
        assert_eq!(Provider::default(), Provider::DeepSeek);
    }

    #[test]
    fn test_serde_uses_identifier() {
        let json = serde_json::to_string(&Provider::Gemini).unwrap();
        assert_eq!(json, "\"gemini\"");
        let parsed: Provider = serde_json::from_str("\"deepseek\"").unwrap();
        assert_eq!(parsed, Provider::DeepSeek);
        assert!(serde_json::from_str::<Provider>("\"mistral\"").is_err());
    }
}
