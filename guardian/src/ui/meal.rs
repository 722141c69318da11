use super::*;

use ratatui::widgets::Wrap;

const SUBTITLE: &str =
    "Describe your meal, and our AI will give you insights on its potential impact on your blood sugar.";
const PLACEHOLDER: &str =
    "e.g., A bowl of oatmeal with brown sugar, bananas, and a glass of orange juice";
const DISCLAIMER: &str = "Disclaimer: This analysis is AI-generated and for informational purposes only. It is not a substitute for professional medical advice.";

pub(super) fn render_meal_analyzer(frame: &mut Frame, app: &App, area: Rect) {
    let block = panel("AI Meal Analyzer", ACCENT);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::vertical([
        Constraint::Length(2), // Subtitle
        Constraint::Length(5), // Meal description
        Constraint::Length(1), // Analyze button
        Constraint::Length(1), // Spacer
        Constraint::Min(0),    // Error or results
        Constraint::Length(2), // Disclaimer
    ])
    .split(inner);

    frame.render_widget(
        Paragraph::new(SUBTITLE)
            .style(Style::default().fg(DIM))
            .wrap(Wrap { trim: true }),
        chunks[0],
    );

    render_description(frame, app, chunks[1]);
    render_button(frame, app, chunks[2]);

    if let Some(error) = &app.meal.error {
        frame.render_widget(
            Paragraph::new(error.as_str())
                .style(Style::default().fg(Color::Red))
                .wrap(Wrap { trim: true }),
            chunks[4],
        );
    } else if let Some(analysis) = &app.meal.result {
        render_results(frame, analysis, chunks[4]);
    }

    frame.render_widget(
        Paragraph::new(DISCLAIMER)
            .style(Style::default().fg(Color::DarkGray).italic())
            .wrap(Wrap { trim: true }),
        chunks[5],
    );
}

fn render_description(frame: &mut Frame, app: &App, area: Rect) {
    let border = if app.meal.analyzing { DIM } else { ACCENT };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border))
        .title(" What did you eat? ");

    let text = if app.meal.draft.is_empty() {
        Line::from(Span::styled(
            PLACEHOLDER,
            Style::default().fg(Color::DarkGray).italic(),
        ))
    } else {
        Line::raw(app.meal.draft.clone())
    };

    frame.render_widget(
        Paragraph::new(text).block(block).wrap(Wrap { trim: false }),
        area,
    );
}

fn render_button(frame: &mut Frame, app: &App, area: Rect) {
    let line = if app.meal.analyzing {
        Line::from(vec![
            Span::styled(spinner(app.animation_frame), Style::default().fg(ACCENT)),
            Span::styled(" Analyzing...", Style::default().fg(ACCENT)),
        ])
    } else {
        let style = if app.meal.can_submit() {
            Style::default().fg(Color::Black).bg(ACCENT).bold()
        } else {
            Style::default().fg(DIM)
        };
        Line::from(vec![
            Span::styled("[Enter]", Style::default().fg(Color::Yellow)),
            Span::raw(" "),
            Span::styled(" Analyze My Meal ", style),
        ])
    };
    frame.render_widget(Paragraph::new(line), area);
}

fn render_results(frame: &mut Frame, analysis: &guardian_core::MealAnalysis, area: Rect) {
    let chunks = Layout::vertical([
        Constraint::Length(1), // Heading
        Constraint::Length(3), // Summary
        Constraint::Min(0),    // Category cards
    ])
    .split(area);

    frame.render_widget(
        Paragraph::new(Span::styled(
            "Analysis Results",
            Style::default().fg(VALUE_COLOR).bold(),
        )),
        chunks[0],
    );
    frame.render_widget(
        Paragraph::new(format!("\"{}\"", analysis.summary))
            .style(Style::default().italic())
            .wrap(Wrap { trim: true }),
        chunks[1],
    );

    let cards: Vec<(&str, Color, &[String])> = [
        ("Good for Sugar", CARD_GOOD, analysis.good_for_sugar.as_slice()),
        ("Consider Moderation", CARD_BAD, analysis.bad_for_sugar.as_slice()),
        ("Healthier Suggestions", CARD_TIP, analysis.suggestions.as_slice()),
    ]
    .into_iter()
    .filter(|(_, _, items)| !items.is_empty())
    .collect();

    if cards.is_empty() {
        return;
    }

    let constraints: Vec<Constraint> = cards
        .iter()
        .map(|_| Constraint::Ratio(1, cards.len() as u32))
        .collect();
    let columns = Layout::horizontal(constraints).split(chunks[2]);

    for ((title, color, items), column) in cards.iter().zip(columns.iter()) {
        let lines: Vec<Line> = items
            .iter()
            .map(|item| {
                Line::from(vec![
                    Span::styled("• ", Style::default().fg(*color)),
                    Span::raw(item.clone()),
                ])
            })
            .collect();
        frame.render_widget(
            Paragraph::new(lines)
                .block(panel(title, *color))
                .wrap(Wrap { trim: true }),
            *column,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::render_to_string;
    use crate::app::test_support::*;
    use crate::app::AppView;
    use crossterm::event::KeyCode;
    use guardian_core::HealthRecordStore;

    fn meal_app(gateway: MockGateway) -> crate::app::App {
        let (mut app, _) = app_with(HealthRecordStore::new(), gateway);
        app.navigate(AppView::MealAnalyzer);
        app
    }

    #[test]
    fn test_idle_view_shows_placeholder_and_disclaimer() {
        let mut app = meal_app(MockGateway::default());
        let screen = render_to_string(&mut app, 160, 30);

        assert!(screen.contains("AI Meal Analyzer"));
        assert!(screen.contains("e.g., A bowl of oatmeal"));
        assert!(screen.contains("Analyze My Meal"));
        assert!(screen.contains("Disclaimer: This analysis is AI-generated"));
        assert!(!screen.contains("Analysis Results"));
    }

    #[test]
    fn test_pending_shows_analyzing() {
        let mut app = meal_app(MockGateway::default());
        type_text(&mut app, "toast");
        app.handle_key(key(KeyCode::Enter));
        let screen = render_to_string(&mut app, 160, 30);

        assert!(screen.contains("Analyzing..."));
        assert!(!screen.contains("Analyze My Meal"));
    }

    #[test]
    fn test_results_hide_empty_categories() {
        let mut app = meal_app(MockGateway::default());
        type_text(&mut app, "oatmeal");
        app.handle_key(key(KeyCode::Enter));
        app.poll_gateway();
        let screen = render_to_string(&mut app, 160, 30);

        assert!(screen.contains("Analysis Results"));
        assert!(screen.contains("\"Mostly balanced.\""));
        assert!(screen.contains("Good for Sugar"));
        assert!(screen.contains("Healthier Suggestions"));
        // No bad_for_sugar items in the canned analysis
        assert!(!screen.contains("Consider Moderation"));
        assert!(screen.contains("Disclaimer:"));
    }

    #[test]
    fn test_failure_shows_message_without_results() {
        let mut app = meal_app(MockGateway {
            fail_meal: true,
            ..Default::default()
        });
        type_text(&mut app, "pizza");
        app.handle_key(key(KeyCode::Enter));
        app.poll_gateway();
        let screen = render_to_string(&mut app, 160, 30);

        assert!(screen.contains("Sorry, I couldn't analyze the meal. Please try again."));
        assert!(!screen.contains("Analysis Results"));
        assert!(screen.contains("Disclaimer:"));
    }
}
