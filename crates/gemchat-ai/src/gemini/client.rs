//! Gemini client and model handles: request building and response parsing.

use gemchat_common::ConfigError;
use gemchat_config::{HarmBlockThreshold, HarmCategory, SafetyPolicy};
use tracing::debug;

use crate::{AiError, AiResponse, GenerativeModel, ModelProvider, Part, TokenUsage, Turn};

use super::config::GeminiConfig;

/// Gemini API client. Cheap to share: model handles clone the inner
/// HTTP client.
pub struct GeminiClient {
    pub(crate) config: GeminiConfig,
    pub(crate) http: reqwest::Client,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> Result<Self, AiError> {
        if config.api_key.trim().is_empty() {
            return Err(ConfigError::ValidationError("Gemini API key must not be empty".into()).into());
        }

        let http = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| AiError::NetworkError(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { config, http })
    }
}

impl ModelProvider for GeminiClient {
    fn resolve_model(
        &self,
        name: &str,
        safety: &SafetyPolicy,
    ) -> Result<Box<dyn GenerativeModel>, AiError> {
        let name = validate_model_name(name)?;
        let safety = safety
            .resolve()
            .map_err(|e| AiError::ModelUnavailable(format!("{name}: {e}")))?;

        debug!(model = %name, safety_settings = safety.len(), "built Gemini model handle");

        Ok(Box::new(GeminiModel {
            name: name.to_string(),
            api_key: self.config.api_key.clone(),
            base_url: self.config.base_url.clone(),
            safety,
            http: self.http.clone(),
        }))
    }
}

/// Strip an optional `models/` prefix and reject names the API cannot route.
fn validate_model_name(name: &str) -> Result<&str, AiError> {
    let name = name.trim();
    let name = name.strip_prefix("models/").unwrap_or(name);

    let valid = !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '.' | '_'));
    if valid {
        Ok(name)
    } else {
        Err(AiError::ModelUnavailable(format!(
            "invalid model name '{name}'"
        )))
    }
}

/// A handle on one Gemini model with a fixed safety policy.
pub struct GeminiModel {
    pub(crate) name: String,
    pub(crate) api_key: String,
    pub(crate) base_url: String,
    pub(crate) safety: Vec<(HarmCategory, HarmBlockThreshold)>,
    pub(crate) http: reqwest::Client,
}

impl GeminiModel {
    pub(crate) fn api_url(&self) -> String {
        format!("{}/{}:generateContent", self.base_url, self.name)
    }

    /// Build the JSON request body for `generateContent`.
    pub(crate) fn build_request_body(&self, contents: &[Turn]) -> serde_json::Value {
        let contents: Vec<_> = contents
            .iter()
            .map(|turn| {
                let parts: Vec<_> = turn
                    .parts
                    .iter()
                    .map(|part| match part {
                        Part::Text(text) => serde_json::json!({ "text": text }),
                        Part::Image(image) => serde_json::json!({
                            "inlineData": {
                                "mimeType": image.mime_type,
                                "data": image.to_base64(),
                            }
                        }),
                    })
                    .collect();
                serde_json::json!({ "role": turn.role.as_str(), "parts": parts })
            })
            .collect();

        let mut body = serde_json::json!({ "contents": contents });

        if !self.safety.is_empty() {
            let settings: Vec<_> = self
                .safety
                .iter()
                .map(|(category, threshold)| {
                    serde_json::json!({
                        "category": category.as_api_str(),
                        "threshold": threshold.as_api_str(),
                    })
                })
                .collect();
            body["safetySettings"] = serde_json::json!(settings);
        }

        body
    }

    /// Parse a `generateContent` response.
    pub(crate) fn parse_response(&self, json: serde_json::Value) -> Result<AiResponse, AiError> {
        if let Some(reason) = json["promptFeedback"]["blockReason"].as_str() {
            return Err(AiError::Blocked(format!("prompt blocked: {reason}")));
        }

        let candidates = json["candidates"]
            .as_array()
            .ok_or_else(|| AiError::ParseError("no candidates in response".to_string()))?;

        let first = candidates
            .first()
            .ok_or_else(|| AiError::ParseError("empty candidates".to_string()))?;

        let mut content = String::new();
        if let Some(parts) = first["content"]["parts"].as_array() {
            for part in parts {
                if let Some(text) = part["text"].as_str() {
                    content.push_str(text);
                }
            }
        }

        if content.is_empty() {
            return match first["finishReason"].as_str() {
                Some(reason @ ("SAFETY" | "RECITATION" | "BLOCKLIST" | "PROHIBITED_CONTENT")) => {
                    Err(AiError::Blocked(format!("response finished with {reason}")))
                }
                _ => Err(AiError::ParseError("candidate has no text".to_string())),
            };
        }

        let usage = TokenUsage {
            input_tokens: json["usageMetadata"]["promptTokenCount"]
                .as_u64()
                .unwrap_or(0),
            output_tokens: json["usageMetadata"]["candidatesTokenCount"]
                .as_u64()
                .unwrap_or(0),
        };

        Ok(AiResponse { content, usage })
    }
}
