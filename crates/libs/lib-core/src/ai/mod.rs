//! # Generative AI
//!
//! Everything that talks to the AI backend: wire types and HTTP client
//! ([`gemini`]), answer parsing ([`json`]), the advisory tools ([`advisory`]) and
//! the chat assistant ([`chat`]).
//!
//! Absence of a credential is an explicit mode. Services take an
//! `Option<Arc<dyn AiBackend>>` and answer with canned payloads when it is `None`.

pub mod advisory;
pub mod chat;
pub mod gemini;
pub mod json;

use std::sync::Arc;

pub use advisory::{AdvisoryService, SoilInput};
pub use chat::{ChatAssistant, ChatContext, ChatReply, ChatSession, PendingTurn, WeatherToolResolver};
pub use gemini::{AiBackend, GeminiClient};

use crate::config::Config;

/// Backend for the configured credential, or `None` in demo mode.
pub fn backend_from_config(config: &Config) -> Option<Arc<dyn AiBackend>> {
    match GeminiClient::from_config(config) {
        Some(client) => {
            tracing::info!("AI backend configured");
            Some(Arc::new(client))
        }
        None => {
            tracing::info!("No AI credential configured, AI tools run in demo mode");
            None
        }
    }
}
