//! DeepSeek transport

use super::types::{ChatCompletionRequest, ChatCompletionResponse};
use crate::providers::credential::Credential;
use crate::providers::http;
use crate::providers::settings::ProviderSettings;
use async_trait::async_trait;
use duochat_application::{GatewayError, ProviderTransport};
use duochat_domain::{Provider, ProviderRequest};
use tracing::debug;

pub struct DeepSeekTransport {
    client: reqwest::Client,
    settings: ProviderSettings,
    credential: Credential,
}

impl DeepSeekTransport {
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
        format!("{}/chat/completions", self.settings.base())
    }
}

#[async_trait]
impl ProviderTransport for DeepSeekTransport {
    fn provider(&self) -> Provider {
        Provider::DeepSeek
    }

    async fn complete(&self, request: &ProviderRequest) -> Result<String, GatewayError> {
        let ProviderRequest::DeepSeek(request) = request else {
            return Err(GatewayError::UnsupportedRequest(request.provider()));
        };
        let key = self.credential.key()?;

        debug!(
            model = %self.settings.model,
            messages = request.messages.len(),
            "Calling chat completions"
        );

        let body = ChatCompletionRequest::new(&self.settings, request);
        let response: ChatCompletionResponse = http::send_json(
            self.client
                .post(self.endpoint())
                .bearer_auth(key)
                .json(&body),
        )
        .await?;

        response.into_text()
    }
}
