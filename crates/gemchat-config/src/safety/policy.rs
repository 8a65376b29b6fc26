//! Safety policy document loading.

use std::collections::BTreeMap;
use std::path::Path;

use gemchat_common::ConfigError;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::category::{HarmBlockThreshold, HarmCategory};

/// One harm-category → threshold entry, as written in the policy file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SafetySetting {
    pub category: String,
    pub threshold: String,
}

impl SafetySetting {
    pub fn new(category: impl Into<String>, threshold: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            threshold: threshold.into(),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum PolicyDocument {
    List(Vec<SafetySetting>),
    Map(BTreeMap<String, String>),
}

/// Safety thresholds applied to every model handle.
///
/// Entries are kept verbatim; names are only checked when they are
/// converted for a request, see [`SafetyPolicy::resolve`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SafetyPolicy {
    settings: Vec<SafetySetting>,
}

impl SafetyPolicy {
    pub fn new(settings: Vec<SafetySetting>) -> Self {
        Self { settings }
    }

    /// Load a policy from a JSON file.
    ///
    /// The file holds either a list of `{"category", "threshold"}` objects or
    /// an object mapping category to threshold.
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ConfigError::FileNotFound(path.to_path_buf())
            } else {
                ConfigError::ParseError(format!("failed to read {}: {e}", path.display()))
            }
        })?;

        let policy = Self::from_json_str(&content).map_err(|e| match e {
            ConfigError::ParseError(msg) => {
                ConfigError::ParseError(format!("{}: {msg}", path.display()))
            }
            other => other,
        })?;

        info!(
            entries = policy.len(),
            "loaded safety policy from {}",
            path.display()
        );
        Ok(policy)
    }

    pub fn from_json_str(content: &str) -> Result<Self, ConfigError> {
        let document: PolicyDocument = serde_json::from_str(content)
            .map_err(|e| ConfigError::ParseError(format!("invalid safety policy: {e}")))?;

        let settings = match document {
            PolicyDocument::List(settings) => settings,
            PolicyDocument::Map(map) => map
                .into_iter()
                .map(|(category, threshold)| SafetySetting {
                    category,
                    threshold,
                })
                .collect(),
        };
        Ok(Self { settings })
    }

    pub fn settings(&self) -> &[SafetySetting] {
        &self.settings
    }

    pub fn len(&self) -> usize {
        self.settings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.settings.is_empty()
    }

    /// Convert every entry to typed values, collecting all unknown names
    /// into one error.
    pub fn resolve(&self) -> Result<Vec<(HarmCategory, HarmBlockThreshold)>, ConfigError> {
        let mut errors = Vec::new();
        let mut resolved = Vec::with_capacity(self.settings.len());

        for setting in &self.settings {
            let category = HarmCategory::parse(&setting.category);
            let threshold = HarmBlockThreshold::parse(&setting.threshold);
            match (category, threshold) {
                (Some(c), Some(t)) => resolved.push((c, t)),
                (None, _) => errors.push(format!("unknown harm category '{}'", setting.category)),
                (_, None) => errors.push(format!(
                    "unknown block threshold '{}' for {}",
                    setting.threshold, setting.category
                )),
            }
        }

        if errors.is_empty() {
            Ok(resolved)
        } else {
            Err(ConfigError::ValidationError(errors.join("; ")))
        }
    }
}
