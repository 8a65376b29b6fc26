//! Full configuration validation.
//!
//! Every check pushes onto a shared error list; the caller gets a single
//! `ConfigError` listing all of them.

use crate::schema::GemchatConfig;
use gemchat_common::ConfigError;

/// Run all validations on a config, collecting all errors.
pub fn validate(config: &GemchatConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    validate_model(&mut errors, config);
    validate_api(&mut errors, config);

    if config.safety.policy_path.trim().is_empty() {
        errors.push("safety.policy_path must not be empty".into());
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}

fn validate_model(errors: &mut Vec<String>, config: &GemchatConfig) {
    validate_not_empty(errors, "model.chat", &config.model.chat);
    validate_not_empty(errors, "model.vision", &config.model.vision);

    let var = &config.model.env_override;
    if var.is_empty() || var.contains('=') || var.contains('\0') {
        errors.push(format!(
            "model.env_override = {var:?} is not a valid environment variable name"
        ));
    }
}

fn validate_api(errors: &mut Vec<String>, config: &GemchatConfig) {
    let base = &config.api.base_url;
    if !(base.starts_with("http://") || base.starts_with("https://")) {
        errors.push(format!("api.base_url = {base:?} must be an http(s) URL"));
    }
    validate_range(
        errors,
        "api.connect_timeout_secs",
        config.api.connect_timeout_secs,
        1,
        60,
    );
    validate_range(
        errors,
        "api.request_timeout_secs",
        config.api.request_timeout_secs,
        1,
        600,
    );
}

fn validate_not_empty(errors: &mut Vec<String>, name: &str, value: &str) {
    if value.trim().is_empty() {
        errors.push(format!("{name} must not be empty"));
    }
}

/// Push an error if `value` is outside `[min, max]`.
fn validate_range(errors: &mut Vec<String>, name: &str, value: u32, min: u32, max: u32) {
    if value < min || value > max {
        errors.push(format!("{name} = {value} is out of range [{min}, {max}]"));
    }
}
