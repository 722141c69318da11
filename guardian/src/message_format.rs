//! Shared message formatting helpers for TUI rendering.

use guardian_core::ChatRole;
use ratatui::style::{Color, Style};

/// Role label and style for transcript rows.
pub fn chat_role_label(role: ChatRole) -> (&'static str, Style) {
    match role {
        ChatRole::User => ("You", Style::default().fg(Color::Cyan)),
        ChatRole::Model => ("Assistant", Style::default().fg(Color::Green)),
    }
}

/// Word-wrap `text` to `width` columns.
///
/// Explicit newlines are kept, words longer than the width are split, and an
/// empty input yields one empty line.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();

    for raw_line in text.split('\n') {
        let mut current = String::new();
        let mut current_len = 0usize;

        for word in raw_line.split_whitespace() {
            let mut word = word;
            let mut word_len = word.chars().count();

            if current_len > 0 && current_len + 1 + word_len > width {
                lines.push(std::mem::take(&mut current));
                current_len = 0;
            }

            while word_len > width {
                let split = word
                    .char_indices()
                    .nth(width - current_len)
                    .map(|(idx, _)| idx)
                    .unwrap_or(word.len());
                current.push_str(&word[..split]);
                lines.push(std::mem::take(&mut current));
                current_len = 0;
                word = &word[split..];
                word_len = word.chars().count();
            }

            if word.is_empty() {
                continue;
            }
            if current_len > 0 {
                current.push(' ');
                current_len += 1;
            }
            current.push_str(word);
            current_len += word_len;
        }

        lines.push(current);
    }

    lines
}

/// Truncate to at most `max_chars` characters, on a char boundary.
pub fn truncate_chars(input: &str, max_chars: usize) -> &str {
    if input.chars().count() <= max_chars {
        return input;
    }
    input
        .char_indices()
        .nth(max_chars)
        .map(|(idx, _)| &input[..idx])
        .unwrap_or(input)
}
