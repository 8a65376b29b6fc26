//! Google Gemini API client.
//!
//! Implements `ModelProvider` and `GenerativeModel` over the
//! Generative Language REST API.

mod api;
mod client;
mod config;

pub use client::{GeminiClient, GeminiModel};
pub use config::GeminiConfig;
