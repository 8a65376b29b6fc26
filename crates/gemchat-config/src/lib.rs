//! gemchat configuration.
//!
//! Provides the TOML application config and the JSON safety policy applied
//! to every model handle. All config sections use defaults so partial
//! configs work out of the box.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use gemchat_config::{load_config, SafetyPolicy};
//!
//! let config = load_config().expect("failed to load config");
//! let policy = SafetyPolicy::load_from_path(config.safety.policy_path.as_ref())
//!     .expect("safety policy missing");
//! println!("{} safety settings", policy.len());
//! ```

pub mod safety;
pub mod schema;
pub mod toml_loader;
pub mod validation;

pub use safety::{HarmBlockThreshold, HarmCategory, SafetyPolicy, SafetySetting};
pub use schema::{
    ApiConfig, GemchatConfig, LogLevel, LoggingConfig, ModelConfig, SafetyConfig,
    DEFAULT_API_BASE, DEFAULT_CHAT_MODEL, DEFAULT_SAFETY_POLICY_PATH,
    DEFAULT_VISION_MODEL, MODEL_ENV_VAR,
};

use gemchat_common::ConfigError;

/// Load config from the platform default path and validate it.
///
/// Creates a default `config.toml` if none exists.
pub fn load_config() -> Result<GemchatConfig, ConfigError> {
    let config = toml_loader::load_default()?;
    validation::validate(&config)?;
    Ok(config)
}
