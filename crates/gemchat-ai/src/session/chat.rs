//! Async session operations: image description, chat turns, title.

use tracing::{info, warn, Instrument};

use crate::{AiError, Conversation, Turn};

use super::manager::ChatSession;
use super::types::{SessionState, DEFAULT_IMAGE_PROMPT, FALLBACK_REPLY, TITLE_PROMPT};

impl ChatSession {
    /// Describe the session image. Returns [`FALLBACK_REPLY`] on any failure.
    pub async fn describe_image(&mut self, prompt: Option<&str>) -> String {
        let result = self.try_describe_image(prompt).await;
        self.or_fallback(result, "send image")
    }

    /// Send `prompt` (default [`DEFAULT_IMAGE_PROMPT`]) and the session image
    /// to the vision model.
    pub async fn try_describe_image(&mut self, prompt: Option<&str>) -> Result<String, AiError> {
        let span = self.span.clone();
        async {
            let prompt = prompt
                .filter(|p| !p.is_empty())
                .unwrap_or(DEFAULT_IMAGE_PROMPT);
            let image = self.image.clone().ok_or(AiError::MissingImage)?;

            let model = self.resolve_model(&self.models.vision)?;
            let response = model
                .generate(&[Turn::user_with_image(prompt, image)])
                .await?;

            info!(model = %model.name(), "received response from Gemini");
            self.tracker.record(model.name(), &response.usage);
            Ok(response.content)
        }
        .instrument(span)
        .await
    }

    /// Open a conversation seeded from the stored history. Failures are
    /// logged and leave the session as it was.
    pub fn start_chat(&mut self) {
        if let Err(e) = self.try_start_chat() {
            self.span
                .in_scope(|| warn!(error = %e, "failed to start chat"));
        }
    }

    /// Open a conversation seeded from the stored history.
    ///
    /// An already active conversation is folded back into the stored history
    /// first, so the new one continues from the current state. If the model
    /// cannot be resolved, an active conversation stays in place.
    pub fn try_start_chat(&mut self) -> Result<(), AiError> {
        let model = self.resolve_model(&self.models.chat)?;

        if let SessionState::ChatActive(previous) = std::mem::take(&mut self.state) {
            self.history = previous.into_history();
        }
        let conversation = Conversation::start(model, self.history.clone());

        self.span.in_scope(|| {
            info!(
                model = %conversation.model_name(),
                turns = self.history.len(),
                "started new conversation"
            )
        });
        self.state = SessionState::ChatActive(conversation);
        Ok(())
    }

    /// Send a message in the active chat. Returns [`FALLBACK_REPLY`] on any
    /// failure, including when no chat is active.
    pub async fn send_message(&mut self, text: &str) -> String {
        let result = self.try_send_message(text).await;
        self.or_fallback(result, "send message")
    }

    pub async fn try_send_message(&mut self, text: &str) -> Result<String, AiError> {
        let span = self.span.clone();
        async {
            let SessionState::ChatActive(conversation) = &mut self.state else {
                return Err(AiError::NoActiveChat);
            };

            let response = conversation.send_turn(text).await?;
            info!(model = %conversation.model_name(), "received response from Gemini");
            self.tracker.record(conversation.model_name(), &response.usage);
            Ok(response.content)
        }
        .instrument(span)
        .await
    }

    /// Ask the model for a short title for the conversation so far.
    pub async fn chat_title(&mut self) -> String {
        self.send_message(TITLE_PROMPT).await
    }

    pub async fn try_chat_title(&mut self) -> Result<String, AiError> {
        self.try_send_message(TITLE_PROMPT).await
    }

    fn or_fallback(&self, result: Result<String, AiError>, action: &str) -> String {
        result.unwrap_or_else(|e| {
            self.span
                .in_scope(|| warn!(error = %e, "failed to {action}"));
            FALLBACK_REPLY.to_string()
        })
    }
}
