//! Conversation session for the health assistant.

use super::gemini::{Content, GenerateRequest};
use crate::types::ChatMessage;

/// One long-lived conversation with the model.
///
/// The REST API is stateless, so the session keeps every committed turn and
/// resends them with each request. The system instruction is fixed at
/// construction.
#[derive(Debug, Clone)]
pub struct ChatSession {
    pub model: String,
    pub system_instruction: String,
    history: Vec<ChatMessage>,
}

impl ChatSession {
    pub fn new(model: impl Into<String>, system_instruction: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            system_instruction: system_instruction.into(),
            history: Vec::new(),
        }
    }

    /// Committed turns, oldest first.
    pub fn history(&self) -> &[ChatMessage] {
        &self.history
    }

    /// Build the request for sending `prompt` on top of the committed history.
    pub fn request_for(&self, prompt: &str) -> GenerateRequest {
        let contents = self
            .history
            .iter()
            .chain(std::iter::once(&ChatMessage::user(prompt)))
            .map(|m| Content::text(m.role.as_str(), m.text.clone()))
            .collect();

        GenerateRequest {
            contents,
            system_instruction: Some(Content::instruction(self.system_instruction.clone())),
            generation_config: None,
        }
    }

    /// Record a completed exchange.
    pub fn commit(&mut self, prompt: &str, reply: &str) {
        self.history.push(ChatMessage::user(prompt));
        self.history.push(ChatMessage::model(reply));
    }
}
