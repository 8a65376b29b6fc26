//! Model selection configuration.

use serde::{Deserialize, Serialize};

/// Model used for multi-turn text chat.
pub const DEFAULT_CHAT_MODEL: &str = "gemini-1.5-flash";

/// Model used for one-shot image description.
pub const DEFAULT_VISION_MODEL: &str = "gemini-pro-vision";

/// Environment variable that, when set, replaces every requested model name.
pub const MODEL_ENV_VAR: &str = "GEMINI_MODEL";

/// Which models the session asks for, and where the override comes from.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ModelConfig {
    pub chat: String,
    pub vision: String,
    /// Name of the override environment variable.
    pub env_override: String,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            chat: DEFAULT_CHAT_MODEL.to_string(),
            vision: DEFAULT_VISION_MODEL.to_string(),
            env_override: MODEL_ENV_VAR.to_string(),
        }
    }
}
