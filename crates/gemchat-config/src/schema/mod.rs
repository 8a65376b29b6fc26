//! Configuration schema types for gemchat.
//!
//! All structs use `serde(default)` so partial configs work correctly.

mod api;
mod model;
mod system;

pub use api::*;
pub use model::*;
pub use system::*;

use serde::{Deserialize, Serialize};

/// Root configuration for gemchat.
///
/// Only override what you want to change.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GemchatConfig {
    pub model: ModelConfig,
    pub safety: SafetyConfig,
    pub api: ApiConfig,
    pub logging: LoggingConfig,
}
