use super::*;

use guardian_core::gateway::ADVICE_ERROR_MESSAGE;
use guardian_core::{ChatMessage, Result};

/// Lines moved by PageUp/PageDown.
const PAGE_SCROLL: usize = 10;

/// Health assistant state.
///
/// The transcript is scoped to a view session: one continuous stay in the
/// view. Leaving the view ends the session and the next visit starts empty.
/// The gateway's conversation context is separate and is never reset.
#[derive(Debug, Clone)]
pub struct AssistantState {
    /// Current view session id
    pub view_session: u64,
    pub transcript: Vec<ChatMessage>,
    pub input: String,
    /// Waiting for a reply in this view session
    pub pending: bool,
    /// First visible transcript line
    pub scroll_offset: usize,
    /// Follow the newest message
    pub auto_scroll: bool,
}

impl Default for AssistantState {
    fn default() -> Self {
        Self {
            view_session: 0,
            transcript: Vec::new(),
            input: String::new(),
            pending: false,
            scroll_offset: 0,
            auto_scroll: true,
        }
    }
}

impl AssistantState {
    fn reset(&mut self) {
        self.transcript.clear();
        self.input.clear();
        self.pending = false;
        self.scroll_offset = 0;
        self.auto_scroll = true;
    }

    pub(super) fn begin_view_session(&mut self) {
        self.reset();
        tracing::debug!(view_session = self.view_session, "Assistant view session started");
    }

    pub(super) fn end_view_session(&mut self) {
        self.view_session += 1;
        self.reset();
    }

    fn push(&mut self, message: ChatMessage) {
        self.transcript.push(message);
        self.auto_scroll = true;
    }

    /// Apply a finished advice call.
    pub fn finish(&mut self, view_session: u64, result: Result<String>) {
        if view_session != self.view_session {
            tracing::info!(
                reply_session = view_session,
                current_session = self.view_session,
                ok = result.is_ok(),
                "Dropping assistant reply for ended view session"
            );
            return;
        }

        self.pending = false;
        match result {
            Ok(reply) => self.push(ChatMessage::model(reply)),
            Err(e) => {
                tracing::warn!(error = %e, "Health advice failed");
                self.push(ChatMessage::model(ADVICE_ERROR_MESSAGE));
            }
        }
    }

    pub fn can_send(&self) -> bool {
        !self.pending && !self.input.trim().is_empty()
    }

    fn scroll_up(&mut self, lines: usize) {
        self.auto_scroll = false;
        self.scroll_offset = self.scroll_offset.saturating_sub(lines);
    }

    /// Rendering clamps the offset and turns auto-scroll back on at the bottom.
    fn scroll_down(&mut self, lines: usize) {
        self.scroll_offset = self.scroll_offset.saturating_add(lines);
    }
}

impl App {
    // ========== Health Assistant Methods ==========

    /// Handle keyboard input in the health assistant.
    pub(super) fn handle_assistant_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter => self.send_assistant_message(),
            KeyCode::Char(c) if !self.assistant.pending && is_text_input(&key) => {
                self.assistant.input.push(c)
            }
            KeyCode::Backspace if !self.assistant.pending => {
                self.assistant.input.pop();
            }
            KeyCode::PageUp => self.assistant.scroll_up(PAGE_SCROLL),
            KeyCode::PageDown => self.assistant.scroll_down(PAGE_SCROLL),
            KeyCode::Up => self.assistant.scroll_up(1),
            KeyCode::Down => self.assistant.scroll_down(1),
            _ => {}
        }
    }

    /// Append the user's message right away and ask the gateway for a reply.
    fn send_assistant_message(&mut self) {
        if !self.assistant.can_send() {
            return;
        }
        let prompt = std::mem::take(&mut self.assistant.input);
        self.assistant.push(ChatMessage::user(prompt.clone()));
        self.assistant.pending = true;
        self.submit(GatewayRequest::HealthAdvice {
            view_session: self.assistant.view_session,
            prompt,
        });
    }
}
