//! Provider transport port
//!
//! Defines the interface for sending a shaped request to one LLM provider.

use async_trait::async_trait;
use duochat_domain::{Provider, ProviderRequest};
use thiserror::Error;

/// Errors raised by a provider transport
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GatewayError {
    #[error("Missing credential: set {0}")]
    MissingCredential(String),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("HTTP {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Provider returned no content")]
    EmptyResponse,

    #[error("No transport configured for {0}")]
    UnsupportedRequest(Provider),
}

impl GatewayError {
    /// Upstream HTTP status, when the failure came with one.
    pub fn status(&self) -> Option<u16> {
        match self {
            GatewayError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// A failed provider call, tagged with the provider that failed.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{provider} request failed: {source}")]
pub struct ProviderError {
    pub provider: Provider,
    #[source]
    pub source: GatewayError,
}

impl ProviderError {
    pub fn new(provider: Provider, source: GatewayError) -> Self {
        Self { provider, source }
    }
}

/// Transport for one provider
///
/// Each implementation speaks a single provider's wire format and performs
/// exactly one HTTP exchange per [`complete`](Self::complete) call.
/// Implementations (adapters) live in the infrastructure layer.
#[async_trait]
pub trait ProviderTransport: Send + Sync {
    /// The provider this transport talks to
    fn provider(&self) -> Provider;

    /// Send the request and return the raw reply text
    async fn complete(&self, request: &ProviderRequest) -> Result<String, GatewayError>;
}
