//! Gemini transport

use super::types::{GenerateContentRequest, GenerateContentResponse};
use crate::providers::credential::Credential;
use crate::providers::http;
use crate::providers::settings::ProviderSettings;
use async_trait::async_trait;
use duochat_application::{GatewayError, ProviderTransport};
use duochat_domain::{Provider, ProviderRequest};
use tracing::debug;

const API_KEY_HEADER: &str = "x-goog-api-key";

pub struct GeminiTransport {
    client: reqwest::Client,
    settings: ProviderSettings,
    credential: Credential,
}

impl GeminiTransport {
    pub fn new(
        client: reqwest::Client,
        settings: ProviderSettings,
        credential: Credential,
    ) -> Self {
        Self {
            client,
            settings,
            credential,
        }
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.settings.base(),
            self.settings.model
        )
    }
}

#[async_trait]
impl ProviderTransport for GeminiTransport {
    fn provider(&self) -> Provider {
        Provider::Gemini
    }

    async fn complete(&self, request: &ProviderRequest) -> Result<String, GatewayError> {
        let ProviderRequest::Gemini(request) = request else {
            return Err(GatewayError::UnsupportedRequest(request.provider()));
        };
        let key = self.credential.key()?;

        debug!(
            model = %self.settings.model,
            history = request.history.len(),
            "Calling generateContent"
        );

        let body = GenerateContentRequest::new(&self.settings, request);
        let response: GenerateContentResponse = http::send_json(
            self.client
                .post(self.endpoint())
                .header(API_KEY_HEADER, key)
                .json(&body),
        )
        .await?;

        response.into_text()
    }
}
