//! GenerativeModel implementation for GeminiModel.

use async_trait::async_trait;
use tracing::debug;

use crate::{AiError, AiResponse, GenerativeModel, Turn};

use super::client::GeminiModel;

#[async_trait]
impl GenerativeModel for GeminiModel {
    fn name(&self) -> &str {
        &self.name
    }

    async fn generate(&self, contents: &[Turn]) -> Result<AiResponse, AiError> {
        let body = self.build_request_body(contents);
        let url = self.api_url();

        debug!(model = %self.name, turns = contents.len(), "Gemini API request");

        let response = self
            .http
            .post(&url)
            .header("content-type", "application/json")
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(AiError::RateLimited);
        }
        if status == reqwest::StatusCode::NOT_FOUND {
            let text = response.text().await.unwrap_or_default();
            return Err(AiError::ModelUnavailable(format!("{}: {text}", self.name)));
        }
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(AiError::ApiError(format!("HTTP {status}: {text}")));
        }

        let json: serde_json::Value = response
            .json()
            .await
            .map_err(|e| AiError::ParseError(e.to_string()))?;

        self.parse_response(json)
    }
}

fn map_transport_error(e: reqwest::Error) -> AiError {
    if e.is_timeout() {
        AiError::Timeout
    } else {
        AiError::NetworkError(e.to_string())
    }
}
