//! Chat session management.
//!
//! A `ChatSession` owns the stored history, an optional image and the
//! safety policy, and moves between `Idle` and `ChatActive`. Every
//! operation has a `try_*` form returning the underlying `AiError`; the
//! plain form logs the error and returns [`FALLBACK_REPLY`] instead.

mod chat;
mod manager;
mod types;


pub use manager::ChatSession;
pub use types::{DEFAULT_IMAGE_PROMPT, FALLBACK_REPLY, TITLE_PROMPT};
