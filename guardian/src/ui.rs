//! UI rendering for the TUI.

mod assistant;
mod dashboard;
mod log_form;
mod meal;

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::{App, AppView};

// ========== Palette ==========

/// Accent for titles and the active tab
const ACCENT: Color = Color::Rgb(0, 180, 180);
/// Primary metric values
const VALUE_COLOR: Color = Color::Rgb(80, 200, 120);
/// Dim gray for secondary text
const DIM: Color = Color::Rgb(128, 128, 128);
/// Border color for cards and panels
const BORDER_CARD: Color = Color::Rgb(80, 120, 160);
/// Blood sugar series
const SERIES_SUGAR: Color = Color::Rgb(16, 185, 129);
/// Systolic series
const SERIES_SYSTOLIC: Color = Color::Rgb(59, 130, 246);
/// Diastolic series
const SERIES_DIASTOLIC: Color = Color::Rgb(239, 68, 68);
/// Weight series
const SERIES_WEIGHT: Color = Color::Rgb(245, 158, 11);
/// "Good for Sugar" card
const CARD_GOOD: Color = Color::Rgb(50, 205, 50);
/// "Consider Moderation" card
const CARD_BAD: Color = Color::Rgb(239, 68, 68);
/// "Healthier Suggestions" card
const CARD_TIP: Color = Color::Rgb(245, 158, 11);

/// Braille spinner frames for pending AI calls.
const SPINNER: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Render the application UI.
pub fn render(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    // Layout: tab header, body, footer
    let chunks = Layout::vertical([
        Constraint::Length(2), // Tab header
        Constraint::Min(5),    // Body
        Constraint::Length(1), // Footer
    ])
    .split(area);

    render_tab_header(frame, app.view, chunks[0]);

    match app.view {
        AppView::Dashboard => dashboard::render_dashboard(frame, app, chunks[1]),
        AppView::LogData => log_form::render_log_form(frame, app, chunks[1]),
        AppView::MealAnalyzer => meal::render_meal_analyzer(frame, app, chunks[1]),
        AppView::HealthAssistant => assistant::render_assistant(frame, app, chunks[1]),
    }

    render_footer(frame, app, chunks[2]);
}

/// Render the tab bar header with the four views.
fn render_tab_header(frame: &mut Frame, active: AppView, area: Rect) {
    // Layout: app name on left, tabs on the right
    let chunks = Layout::horizontal([
        Constraint::Length(21), // App name
        Constraint::Min(1),     // Tabs
    ])
    .split(area);

    // App name
    let app_name = Paragraph::new(" Health Guardian AI")
        .style(Style::default().fg(ACCENT).bold())
        .block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(app_name, chunks[0]);

    // Tab styling
    let active_style = Style::default()
        .fg(ACCENT)
        .bold()
        .add_modifier(Modifier::UNDERLINED);
    let inactive_style = Style::default().fg(Color::DarkGray);

    let mut spans = Vec::new();
    for (idx, view) in AppView::ALL.iter().enumerate() {
        if idx > 0 {
            spans.push(Span::raw("  "));
        }
        let style = if *view == active {
            active_style
        } else {
            inactive_style
        };
        spans.push(Span::styled(format!(" {} ", view.tab_label()), style));
    }

    let tabs = Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(tabs, chunks[1]);
}

/// Key hint span pair: highlighted key, then its action.
fn hint(key: &'static str, action: &'static str) -> [Span<'static>; 2] {
    [
        Span::styled(key, Style::default().fg(Color::Yellow)),
        Span::raw(action),
    ]
}

/// Render the footer with key hints for the active view.
fn render_footer(frame: &mut Frame, app: &App, area: Rect) {
    let mut spans = vec![Span::raw(" ")];

    match app.view {
        AppView::Dashboard => {
            spans.extend(hint("n", " log data  "));
            if app.dashboard.is_empty() {
                spans.extend(hint("Enter", " get started  "));
            }
            spans.extend(hint("Tab", " next view  "));
            spans.extend(hint("F1-F4", " jump  "));
            spans.extend(hint("q", " quit  "));
            spans.push(Span::raw("│ "));
            spans.push(Span::styled(
                format!("{} readings", app.dashboard.total_readings),
                Style::default().fg(Color::DarkGray),
            ));
        }
        AppView::LogData => {
            spans.extend(hint("←/→", " type  "));
            spans.extend(hint("↑/↓", " field  "));
            spans.extend(hint("Enter", " save  "));
            spans.extend(hint("Esc", " cancel  "));
            spans.extend(hint("Tab", " next view"));
        }
        AppView::MealAnalyzer => {
            spans.extend(hint("Enter", " analyze  "));
            spans.extend(hint("Esc", " clear  "));
            spans.extend(hint("Tab", " next view  "));
            spans.extend(hint("Ctrl-C", " quit"));
        }
        AppView::HealthAssistant => {
            spans.extend(hint("Enter", " send  "));
            spans.extend(hint("PgUp/PgDn", " scroll  "));
            spans.extend(hint("Tab", " next view  "));
            spans.extend(hint("Ctrl-C", " quit"));
        }
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Current spinner frame.
fn spinner(animation_frame: u64) -> &'static str {
    SPINNER[(animation_frame % SPINNER.len() as u64) as usize]
}

/// Rounded, titled panel.
fn panel(title: &str, color: Color) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(ratatui::widgets::BorderType::Rounded)
        .border_style(Style::default().fg(color))
        .title(format!(" {} ", title))
        .title_style(Style::default().fg(color).bold())
}

/// Center a fixed-size rectangle inside `area`.
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
