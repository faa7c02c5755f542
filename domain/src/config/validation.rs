//! Structured configuration issues.
//!
//! Produced by the file configuration validator and reported by the binary
//! before anything talks to a provider.

use std::fmt;

/// Severity level of a configuration issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Fatal: the configuration cannot work at all.
    Error,
    /// Non-fatal: the configuration works but may not behave as expected.
    Warning,
}

/// Identifies a specific configuration issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigIssueCode {
    /// `providers.default` names no known provider.
    UnknownProvider,
    /// `storage.backend` is neither `sqlite` nor `memory`.
    UnknownStorageBackend,
    /// A sampling parameter lies outside the range the provider accepts.
    SamplingOutOfRange,
    /// `max_tokens` is zero.
    ZeroMaxTokens,
    /// An API key is written inline in a config file.
    InlineApiKey,
    /// `chat.title_max_chars` is zero.
    ZeroTitleLength,
}

/// A detected issue in the loaded configuration.
#[derive(Debug, Clone)]
pub struct ConfigIssue {
    pub severity: Severity,
    pub code: ConfigIssueCode,
    pub message: String,
}

impl ConfigIssue {
    pub fn error(code: ConfigIssueCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            code,
            message: message.into(),
        }
    }

    pub fn warning(code: ConfigIssueCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            code,
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for ConfigIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let level = match self.severity {
            Severity::Error => "error",
            Severity::Warning => "warning",
        };
        write!(f, "{}: {}", level, self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_set_severity() {
        let issue = ConfigIssue::error(ConfigIssueCode::UnknownProvider, "bad");
        assert!(issue.is_error());
        let issue = ConfigIssue::warning(ConfigIssueCode::InlineApiKey, "careful");
        assert!(!issue.is_error());
        assert_eq!(issue.code, ConfigIssueCode::InlineApiKey);
    }

    #[test]
    fn display_prefixes_level() {
        let issue = ConfigIssue::warning(ConfigIssueCode::ZeroTitleLength, "titles are empty");
        assert_eq!(issue.to_string(), "warning: titles are empty");
    }
}
