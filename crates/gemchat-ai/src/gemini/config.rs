//! Gemini API client configuration.

use std::time::Duration;

use gemchat_config::{ApiConfig, DEFAULT_API_BASE};

/// Gemini API client configuration.
#[derive(Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    pub base_url: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl std::fmt::Debug for GeminiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiConfig")
            .field("api_key", &"[REDACTED]")
            .field("base_url", &self.base_url)
            .field("connect_timeout", &self.connect_timeout)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

impl GeminiConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_API_BASE.to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(120),
        }
    }

    /// Build from the `[api]` section of the app config.
    pub fn from_api_config(api_key: impl Into<String>, api: &ApiConfig) -> Self {
        Self::new(api_key)
            .with_base_url(api.base_url.clone())
            .with_connect_timeout(Duration::from_secs(u64::from(api.connect_timeout_secs)))
            .with_request_timeout(Duration::from_secs(u64::from(api.request_timeout_secs)))
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_redacts_api_key() {
        let config = GeminiConfig::new("secret-key-123");
        let debug = format!("{config:?}");
        assert!(!debug.contains("secret-key-123"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn from_api_config_applies_timeouts() {
        let api = ApiConfig {
            base_url: "http://localhost:8080/models/".into(),
            connect_timeout_secs: 3,
            request_timeout_secs: 30,
        };
        let config = GeminiConfig::from_api_config("k", &api);
        assert_eq!(config.base_url, "http://localhost:8080/models");
        assert_eq!(config.connect_timeout, Duration::from_secs(3));
        assert_eq!(config.request_timeout, Duration::from_secs(30));
    }
}
