//! Harm categories and block thresholds understood by the Gemini API.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HarmCategory {
    Harassment,
    HateSpeech,
    SexuallyExplicit,
    DangerousContent,
    CivicIntegrity,
}

impl HarmCategory {
    pub const ALL: [HarmCategory; 5] = [
        HarmCategory::Harassment,
        HarmCategory::HateSpeech,
        HarmCategory::SexuallyExplicit,
        HarmCategory::DangerousContent,
        HarmCategory::CivicIntegrity,
    ];

    /// Parse a category name. Accepts the full API name
    /// (`HARM_CATEGORY_HARASSMENT`) or the bare suffix (`harassment`),
    /// case-insensitively.
    pub fn parse(name: &str) -> Option<Self> {
        let upper = name.trim().to_ascii_uppercase();
        let bare = upper.strip_prefix("HARM_CATEGORY_").unwrap_or(&upper);
        match bare {
            "HARASSMENT" => Some(HarmCategory::Harassment),
            "HATE_SPEECH" | "HATE" => Some(HarmCategory::HateSpeech),
            "SEXUALLY_EXPLICIT" | "SEXUAL" => Some(HarmCategory::SexuallyExplicit),
            "DANGEROUS_CONTENT" | "DANGEROUS" => Some(HarmCategory::DangerousContent),
            "CIVIC_INTEGRITY" => Some(HarmCategory::CivicIntegrity),
            _ => None,
        }
    }

    pub fn as_api_str(&self) -> &'static str {
        match self {
            HarmCategory::Harassment => "HARM_CATEGORY_HARASSMENT",
            HarmCategory::HateSpeech => "HARM_CATEGORY_HATE_SPEECH",
            HarmCategory::SexuallyExplicit => "HARM_CATEGORY_SEXUALLY_EXPLICIT",
            HarmCategory::DangerousContent => "HARM_CATEGORY_DANGEROUS_CONTENT",
            HarmCategory::CivicIntegrity => "HARM_CATEGORY_CIVIC_INTEGRITY",
        }
    }
}

impl fmt::Display for HarmCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_api_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HarmBlockThreshold {
    BlockNone,
    BlockOnlyHigh,
    BlockMediumAndAbove,
    BlockLowAndAbove,
    Off,
}

impl HarmBlockThreshold {
    /// Parse a threshold name. Accepts `BLOCK_MEDIUM_AND_ABOVE` or the
    /// shorthand `medium`, case-insensitively.
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_uppercase().as_str() {
            "BLOCK_NONE" | "NONE" => Some(HarmBlockThreshold::BlockNone),
            "BLOCK_ONLY_HIGH" | "HIGH" => Some(HarmBlockThreshold::BlockOnlyHigh),
            "BLOCK_MEDIUM_AND_ABOVE" | "MEDIUM" => Some(HarmBlockThreshold::BlockMediumAndAbove),
            "BLOCK_LOW_AND_ABOVE" | "LOW" => Some(HarmBlockThreshold::BlockLowAndAbove),
            "OFF" => Some(HarmBlockThreshold::Off),
            _ => None,
        }
    }

    pub fn as_api_str(&self) -> &'static str {
        match self {
            HarmBlockThreshold::BlockNone => "BLOCK_NONE",
            HarmBlockThreshold::BlockOnlyHigh => "BLOCK_ONLY_HIGH",
            HarmBlockThreshold::BlockMediumAndAbove => "BLOCK_MEDIUM_AND_ABOVE",
            HarmBlockThreshold::BlockLowAndAbove => "BLOCK_LOW_AND_ABOVE",
            HarmBlockThreshold::Off => "OFF",
        }
    }
}

impl fmt::Display for HarmBlockThreshold {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_api_str())
    }
}
