//! API credentials, resolved once at startup.

use duochat_application::GatewayError;
use std::fmt;

/// An API key, or a record of where it should have come from.
///
/// The key itself never appears in `Debug` output.
#[derive(Clone, PartialEq, Eq)]
pub enum Credential {
    Key(String),
    Missing { env_var: String },
}

impl Credential {
    /// Resolve from an explicit key, falling back to the process environment.
    pub fn resolve(explicit: Option<&str>, env_var: &str) -> Self {
        Self::resolve_with(explicit, env_var, |name| std::env::var(name).ok())
    }

    /// Resolve using `lookup` in place of the process environment.
    pub fn resolve_with(
        explicit: Option<&str>,
        env_var: &str,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Self {
        let key = explicit
            .map(str::to_string)
            .or_else(|| lookup(env_var))
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty());

        match key {
            Some(key) => Credential::Key(key),
            None => Credential::Missing {
                env_var: env_var.to_string(),
            },
        }
    }

    pub fn is_present(&self) -> bool {
        matches!(self, Credential::Key(_))
    }

    pub(crate) fn key(&self) -> Result<&str, GatewayError> {
        match self {
            Credential::Key(key) => Ok(key),
            Credential::Missing { env_var } => {
                Err(GatewayError::MissingCredential(env_var.clone()))
            }
        }
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Credential::Key(_) => write!(f, "Credential(<redacted>)"),
            Credential::Missing { env_var } => write!(f, "Credential(missing: {})", env_var),
        }
    }
}
