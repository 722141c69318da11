use super::*;

use ratatui::widgets::{Scrollbar, ScrollbarOrientation, ScrollbarState};

use crate::message_format::{chat_role_label, wrap_text};

const EMPTY_STATE: &str = "Start the conversation by asking a question below.";
const INPUT_PLACEHOLDER: &str = "Type your question...";

pub(super) fn render_assistant(frame: &mut Frame, app: &mut App, area: Rect) {
    let block = panel("AI Health Assistant", ACCENT);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::vertical([
        Constraint::Length(2), // Subtitle
        Constraint::Min(3),    // Transcript
        Constraint::Length(3), // Input
    ])
    .split(inner);

    frame.render_widget(
        Paragraph::new("Ask general health and wellness questions")
            .style(Style::default().fg(DIM)),
        chunks[0],
    );

    render_transcript(frame, app, chunks[1]);
    render_input(frame, app, chunks[2]);
}

/// Build transcript lines pre-wrapped to `width` so the line count is exact.
fn transcript_lines(app: &App, width: usize) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    let body_width = width.saturating_sub(2);

    for message in &app.assistant.transcript {
        let (label, style) = chat_role_label(message.role);
        lines.push(Line::from(Span::styled(label, style.bold())));
        for text in wrap_text(&message.text, body_width) {
            lines.push(Line::raw(format!("  {}", text)));
        }
        lines.push(Line::raw(""));
    }

    if app.assistant.pending {
        let (label, style) = chat_role_label(guardian_core::ChatRole::Model);
        let dots = ".".repeat((app.animation_frame / 3 % 4) as usize);
        lines.push(Line::from(vec![
            Span::styled(label, style.bold()),
            Span::styled(format!(" is typing{}", dots), Style::default().fg(DIM).italic()),
        ]));
    }

    lines
}

fn render_transcript(frame: &mut Frame, app: &mut App, area: Rect) {
    if app.assistant.transcript.is_empty() && !app.assistant.pending {
        let rect = centered(area, EMPTY_STATE.len() as u16, 1);
        frame.render_widget(
            Paragraph::new(EMPTY_STATE).style(Style::default().fg(DIM)),
            rect,
        );
        return;
    }

    // One column for the scrollbar
    let lines = transcript_lines(app, area.width.saturating_sub(1) as usize);
    let visible = area.height as usize;

    // Follow the newest message, or clamp a manual scroll position
    let max_scroll = lines.len().saturating_sub(visible);
    let state = &mut app.assistant;
    if state.auto_scroll || state.scroll_offset >= max_scroll {
        state.scroll_offset = max_scroll;
        state.auto_scroll = true;
    }

    let total = lines.len();
    let paragraph = Paragraph::new(lines).scroll((state.scroll_offset as u16, 0));
    frame.render_widget(paragraph, area);

    if total > visible {
        let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
            .begin_symbol(Some("↑"))
            .end_symbol(Some("↓"));
        let mut scrollbar_state = ScrollbarState::new(max_scroll).position(state.scroll_offset);
        frame.render_stateful_widget(scrollbar, area, &mut scrollbar_state);
    }
}

fn render_input(frame: &mut Frame, app: &App, area: Rect) {
    let pending = app.assistant.pending;
    let border = if pending { DIM } else { ACCENT };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border))
        .title(" Message ");

    let line = if app.assistant.input.is_empty() {
        Line::from(Span::styled(
            INPUT_PLACEHOLDER,
            Style::default().fg(Color::DarkGray).italic(),
        ))
    } else {
        // Show the tail when the input is wider than the box
        let width = area.width.saturating_sub(3) as usize;
        let input = &app.assistant.input;
        let skip = input.chars().count().saturating_sub(width);
        let visible: String = input.chars().skip(skip).collect();
        let mut spans = vec![Span::raw(visible)];
        if !pending {
            spans.push(Span::styled("▏", Style::default().fg(ACCENT)));
        }
        Line::from(spans)
    };

    frame.render_widget(Paragraph::new(line).block(block), area);
}
