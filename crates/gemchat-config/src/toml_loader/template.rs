//! Default TOML config template with inline documentation comments.

/// Generate the default TOML config content with comments.
pub(crate) fn default_config_toml() -> &'static str {
    r##"# gemchat configuration
# Only override what you want to change -- missing fields use defaults.

[model]
# chat = "gemini-1.5-flash"
# vision = "gemini-pro-vision"
# Environment variable whose value replaces every requested model name.
# env_override = "GEMINI_MODEL"

[safety]
# JSON list of {"category", "threshold"} objects, read once at startup.
# policy_path = "./safety_settings.json"

[api]
# base_url = "https://generativelanguage.googleapis.com/v1beta/models"
# connect_timeout_secs = 10    # 1-60
# request_timeout_secs = 120   # 1-600

[logging]
# level = "INFO"   # DEBUG, INFO, WARNING, ERROR
"##
}
