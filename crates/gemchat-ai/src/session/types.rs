//! Session constants and state.

use crate::Conversation;

/// Prompt used when `describe_image` is called without one.
pub const DEFAULT_IMAGE_PROMPT: &str = "Please describe this photo";

/// Instruction sent by `chat_title`.
pub const TITLE_PROMPT: &str =
    "Write a one-line short title up to 10 words for this conversation in plain text.";

/// Reply returned in place of any provider failure.
pub const FALLBACK_REPLY: &str = "Couldn't reach out to Google Gemini. Try Again...";

/// `Idle -> ChatActive -> Idle`.
#[derive(Debug, Default)]
pub(super) enum SessionState {
    #[default]
    Idle,
    ChatActive(Conversation),
}

/// The override wins when it is set to something non-blank.
pub(super) fn pick_model_name(env_override: Option<String>, requested: &str) -> String {
    env_override
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| requested.to_string())
}
