//! Shared HTTP plumbing for the provider transports.

use duochat_application::GatewayError;
use serde::de::DeserializeOwned;
use serde_json::Value;

const MAX_ERROR_CHARS: usize = 500;

/// Send a prepared request and decode a JSON success body.
///
/// Non-success statuses become [`GatewayError::Status`] carrying the upstream
/// error message.
pub(crate) async fn send_json<T: DeserializeOwned>(
    request: reqwest::RequestBuilder,
) -> Result<T, GatewayError> {
    let response = request
        .send()
        .await
        .map_err(|e| GatewayError::Connection(e.to_string()))?;

    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| GatewayError::Connection(e.to_string()))?;

    if !status.is_success() {
        return Err(GatewayError::Status {
            status: status.as_u16(),
            message: error_message(&body),
        });
    }

    serde_json::from_str(&body).map_err(|e| GatewayError::InvalidResponse(e.to_string()))
}

/// Pull a readable message out of an error body.
///
/// Both providers wrap errors as `{"error": {"message": ...}}`; anything else
/// is returned as (truncated) raw text.
pub(crate) fn error_message(body: &str) -> String {
    let parsed = serde_json::from_str::<Value>(body).ok();
    let message = parsed.as_ref().and_then(|v| {
        let error = v.get("error")?;
        error
            .get("message")
            .and_then(Value::as_str)
            .or_else(|| error.as_str())
    });

    match message {
        Some(m) => m.to_string(),
        None => {
            let trimmed = body.trim();
            if trimmed.is_empty() {
                "empty error body".to_string()
            } else {
                trimmed.chars().take(MAX_ERROR_CHARS).collect()
            }
        }
    }
}
