//! Remote API connection settings.

use serde::{Deserialize, Serialize};

/// Generative Language API model collection.
pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    /// Valid range: 1-60.
    pub connect_timeout_secs: u32,
    /// Valid range: 1-600.
    pub request_timeout_secs: u32,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE.to_string(),
            connect_timeout_secs: 10,
            request_timeout_secs: 120,
        }
    }
}
