//! Token usage tracking per model.

use std::collections::HashMap;

use crate::TokenUsage;

/// Tracks cumulative token usage for a session, broken down by model.
#[derive(Debug, Default)]
pub struct TokenTracker {
    total: TokenUsage,
    by_model: HashMap<String, TokenUsage>,
    call_count: u64,
}

impl TokenTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record token usage from one generation call.
    pub fn record(&mut self, model: &str, usage: &TokenUsage) {
        self.total.input_tokens = self.total.input_tokens.saturating_add(usage.input_tokens);
        self.total.output_tokens = self.total.output_tokens.saturating_add(usage.output_tokens);
        self.call_count += 1;

        let entry = self.by_model.entry(model.to_string()).or_default();
        entry.input_tokens = entry.input_tokens.saturating_add(usage.input_tokens);
        entry.output_tokens = entry.output_tokens.saturating_add(usage.output_tokens);
    }

    pub fn total(&self) -> &TokenUsage {
        &self.total
    }

    pub fn for_model(&self, model: &str) -> Option<&TokenUsage> {
        self.by_model.get(model)
    }

    pub fn total_tokens(&self) -> u64 {
        self.total.total_tokens()
    }

    pub fn call_count(&self) -> u64 {
        self.call_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn usage(input: u64, output: u64) -> TokenUsage {
        TokenUsage {
            input_tokens: input,
            output_tokens: output,
        }
    }

    #[test]
    fn records_per_model_and_total() {
        let mut tracker = TokenTracker::new();
        tracker.record("gemini-1.5-flash", &usage(10, 20));
        tracker.record("gemini-1.5-flash", &usage(1, 2));
        tracker.record("gemini-pro-vision", &usage(100, 5));

        assert_eq!(tracker.call_count(), 3);
        assert_eq!(tracker.total_tokens(), 138);
        assert_eq!(tracker.for_model("gemini-1.5-flash"), Some(&usage(11, 22)));
        assert_eq!(tracker.for_model("gemini-pro-vision"), Some(&usage(100, 5)));
        assert!(tracker.for_model("other").is_none());
    }
}
