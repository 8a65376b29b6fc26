//! System configuration types: safety policy location and logging.

use serde::{Deserialize, Serialize};

/// Where the safety policy is read from when nothing else is configured.
pub const DEFAULT_SAFETY_POLICY_PATH: &str = "./safety_settings.json";

/// Safety policy configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SafetyConfig {
    pub policy_path: String,
}

impl Default for SafetyConfig {
    fn default() -> Self {
        Self {
            policy_path: DEFAULT_SAFETY_POLICY_PATH.to_string(),
        }
    }
}

/// Log level.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogLevel {
    Debug,
    #[default]
    Info,
    Warning,
    Error,
}

impl LogLevel {
    /// `tracing` filter directive for this level.
    pub fn as_directive(&self) -> &'static str {
        match self {
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warning => "warn",
            LogLevel::Error => "error",
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: LogLevel,
}
