//! Chat engine for gemchat.
//!
//! Wraps the Gemini generative-language API behind a small session type:
//! - `ModelProvider` / `GenerativeModel` traits so the remote service can be
//!   swapped for a fake in tests
//! - A Gemini HTTP client implementing them
//! - `Conversation`, the live multi-turn chat object
//! - `ChatSession`, which owns history, image and safety policy and turns
//!   provider failures into a fixed fallback reply
//! - Token usage tracking

pub mod conversation;
pub mod gemini;
pub mod image;
pub mod session;
pub mod token_tracker;

use async_trait::async_trait;
use gemchat_common::ConfigError;
use gemchat_config::SafetyPolicy;
use serde::{Deserialize, Serialize};

pub use conversation::Conversation;
pub use gemini::{GeminiClient, GeminiConfig};
pub use image::ImageBlob;
pub use session::{ChatSession, DEFAULT_IMAGE_PROMPT, FALLBACK_REPLY, TITLE_PROMPT};
pub use token_tracker::TokenTracker;

/// Builds model handles. Implemented by the Gemini client and by test fakes.
pub trait ModelProvider: Send + Sync {
    /// Construct a handle for `name` with `safety` applied to every request.
    fn resolve_model(
        &self,
        name: &str,
        safety: &SafetyPolicy,
    ) -> Result<Box<dyn GenerativeModel>, AiError>;
}

/// A resolved model that turns a list of turns into generated text.
#[async_trait]
pub trait GenerativeModel: Send + Sync {
    fn name(&self) -> &str;

    async fn generate(&self, contents: &[Turn]) -> Result<AiResponse, AiError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Model,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Model => "model",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Part {
    Text(String),
    Image(ImageBlob),
}

/// One entry of a conversation history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub role: Role,
    pub parts: Vec<Part>,
}

impl Turn {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            parts: vec![Part::Text(text.into())],
        }
    }

    pub fn model(text: impl Into<String>) -> Self {
        Self {
            role: Role::Model,
            parts: vec![Part::Text(text.into())],
        }
    }

    /// A user turn carrying a prompt followed by an image.
    pub fn user_with_image(text: impl Into<String>, image: ImageBlob) -> Self {
        Self {
            role: Role::User,
            parts: vec![Part::Text(text.into()), Part::Image(image)],
        }
    }

    /// Concatenated text of all text parts.
    pub fn text(&self) -> String {
        self.parts
            .iter()
            .filter_map(|part| match part {
                Part::Text(text) => Some(text.as_str()),
                Part::Image(_) => None,
            })
            .collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AiResponse {
    pub content: String,
    pub usage: TokenUsage,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TokenUsage {
    pub input_tokens: u64,
    pub output_tokens: u64,
}

impl TokenUsage {
    pub fn total_tokens(&self) -> u64 {
        self.input_tokens.saturating_add(self.output_tokens)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AiError {
    #[error("API error: {0}")]
    ApiError(String),
    #[error("Rate limited")]
    RateLimited,
    #[error("Network error: {0}")]
    NetworkError(String),
    #[error("Parse error: {0}")]
    ParseError(String),
    #[error("Timeout")]
    Timeout,
    #[error("Model unavailable: {0}")]
    ModelUnavailable(String),
    #[error("Response blocked: {0}")]
    Blocked(String),
    #[error("No active chat; start_chat must succeed first")]
    NoActiveChat,
    #[error("No image attached to the session")]
    MissingImage,
    #[error(transparent)]
    Config(#[from] ConfigError),
}
