//! ChatSession struct, construction, model resolution and history access.

use std::path::Path;
use std::sync::Arc;

use gemchat_common::SessionId;
use gemchat_config::{GemchatConfig, ModelConfig, SafetyPolicy};
use tracing::{info, info_span, warn, Span};

use crate::token_tracker::TokenTracker;
use crate::{
    AiError, GeminiClient, GeminiConfig, GenerativeModel, ImageBlob, ModelProvider, Turn,
};

use super::types::{pick_model_name, SessionState};

/// A single chat session over a model provider.
pub struct ChatSession {
    pub(super) id: SessionId,
    /// Builds model handles; holds the credential.
    pub(super) provider: Arc<dyn ModelProvider>,
    /// Loaded once at construction, never mutated.
    pub(super) safety: SafetyPolicy,
    /// Image used by `describe_image`.
    pub(super) image: Option<ImageBlob>,
    /// History the next conversation is seeded from.
    pub(super) history: Vec<Turn>,
    pub(super) state: SessionState,
    pub(super) models: ModelConfig,
    pub(super) tracker: TokenTracker,
    /// Every log line of this session is emitted inside this span.
    pub(super) span: Span,
}

impl ChatSession {
    /// Create a Gemini-backed session with default settings.
    ///
    /// Reads the safety policy from `./safety_settings.json`. A missing or
    /// malformed policy file is an error.
    pub fn new(api_key: impl Into<String>) -> Result<Self, AiError> {
        Self::from_config(&GemchatConfig::default(), api_key)
    }

    /// Create a Gemini-backed session from the app config.
    pub fn from_config(config: &GemchatConfig, api_key: impl Into<String>) -> Result<Self, AiError> {
        let client = GeminiClient::new(GeminiConfig::from_api_config(api_key, &config.api))?;
        let safety = SafetyPolicy::load_from_path(Path::new(&config.safety.policy_path))?;

        Ok(Self::with_provider(Arc::new(client), safety).with_models(config.model.clone()))
    }

    /// Create a session over any provider.
    pub fn with_provider(provider: Arc<dyn ModelProvider>, safety: SafetyPolicy) -> Self {
        let id = SessionId::new();
        let span = info_span!("chat_session", session = %id.short());
        span.in_scope(|| info!(safety_settings = safety.len(), "initiated new chat session"));

        Self {
            id,
            provider,
            safety,
            image: None,
            history: Vec::new(),
            state: SessionState::Idle,
            models: ModelConfig::default(),
            tracker: TokenTracker::new(),
            span,
        }
    }

    pub fn with_image(mut self, image: ImageBlob) -> Self {
        self.image = Some(image);
        self
    }

    pub fn with_history(mut self, history: Vec<Turn>) -> Self {
        self.history = history;
        self
    }

    pub fn with_models(mut self, models: ModelConfig) -> Self {
        self.models = models;
        self
    }

    /// Emit this session's logs inside `span` instead of the default one.
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    pub fn set_image(&mut self, image: Option<ImageBlob>) {
        self.image = image;
    }

    /// Model name to use: the override environment variable if set,
    /// otherwise `requested`.
    pub fn resolve_model_name(&self, requested: &str) -> String {
        pick_model_name(std::env::var(&self.models.env_override).ok(), requested)
    }

    /// Build a model handle for `requested` (after applying the override).
    ///
    /// Any provider failure comes back as `AiError::ModelUnavailable`.
    pub fn resolve_model(&self, requested: &str) -> Result<Box<dyn GenerativeModel>, AiError> {
        let _enter = self.span.enter();
        let name = self.resolve_model_name(requested);
        info!(model = %name, "trying to get generative model");

        self.provider
            .resolve_model(&name, &self.safety)
            .map_err(|e| {
                warn!(model = %name, error = %e, "failed to get model");
                match e {
                    AiError::ModelUnavailable(_) => e,
                    other => AiError::ModelUnavailable(format!("{name}: {other}")),
                }
            })
    }

    /// History of the active conversation, or `None` when no chat is active.
    pub fn chat_history(&self) -> Option<&[Turn]> {
        match &self.state {
            SessionState::ChatActive(conversation) => Some(conversation.history()),
            SessionState::Idle => {
                self.span
                    .in_scope(|| warn!("failed to get chat history: no active chat"));
                None
            }
        }
    }

    /// Drop the active conversation and clear the stored history.
    pub fn close(&mut self) {
        self.span.in_scope(|| info!("closed chat session"));
        self.state = SessionState::Idle;
        self.history.clear();
    }

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn is_chat_active(&self) -> bool {
        matches!(self.state, SessionState::ChatActive(_))
    }

    pub fn image(&self) -> Option<&ImageBlob> {
        self.image.as_ref()
    }

    /// History the next `start_chat` will seed from.
    pub fn stored_history(&self) -> &[Turn] {
        &self.history
    }

    pub fn safety_policy(&self) -> &SafetyPolicy {
        &self.safety
    }

    pub fn models(&self) -> &ModelConfig {
        &self.models
    }

    pub fn usage(&self) -> &TokenTracker {
        &self.tracker
    }
}

impl std::fmt::Debug for ChatSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatSession")
            .field("id", &self.id)
            .field("state", &self.state)
            .field("history", &self.history.len())
            .field("image", &self.image)
            .field("models", &self.models)
            .finish_non_exhaustive()
    }
}
