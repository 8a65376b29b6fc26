//! Live multi-turn conversation with one model.

use tracing::debug;

use crate::{AiError, AiResponse, GenerativeModel, Turn};

/// A model handle plus the history it has seen.
///
/// Every request sends the whole history followed by the new user turn.
/// The history only grows when a turn succeeds.
pub struct Conversation {
    model: Box<dyn GenerativeModel>,
    history: Vec<Turn>,
}

impl Conversation {
    /// Open a conversation seeded with `history`.
    pub fn start(model: Box<dyn GenerativeModel>, history: Vec<Turn>) -> Self {
        Self { model, history }
    }

    /// Send one user message and record the exchange.
    pub async fn send_turn(&mut self, text: &str) -> Result<AiResponse, AiError> {
        let user_turn = Turn::user(text);

        let mut contents = Vec::with_capacity(self.history.len() + 1);
        contents.extend_from_slice(&self.history);
        contents.push(user_turn.clone());

        debug!(
            model = %self.model.name(),
            turns = contents.len(),
            "sending conversation turn"
        );
        let response = self.model.generate(&contents).await?;

        self.history.push(user_turn);
        self.history.push(Turn::model(response.content.clone()));
        Ok(response)
    }

    pub fn history(&self) -> &[Turn] {
        &self.history
    }

    pub fn into_history(self) -> Vec<Turn> {
        self.history
    }

    pub fn model_name(&self) -> &str {
        self.model.name()
    }
}

impl std::fmt::Debug for Conversation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Conversation")
            .field("model", &self.model.name())
            .field("turns", &self.history.len())
            .finish()
    }
}
