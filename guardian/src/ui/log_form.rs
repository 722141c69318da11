use super::*;

use guardian_core::types::ReadingKind;

use crate::app::FormField;

pub(super) fn render_log_form(frame: &mut Frame, app: &App, area: Rect) {
    let form = &app.log_form;
    let fields = form.fields();

    // Type selector, one box per field, actions
    let height = 2 + 4 + fields.len() as u16 * 3 + 2;
    let rect = centered(area, 64, height);
    let block = panel("Log New Health Data", ACCENT);
    let inner = block.inner(rect);
    frame.render_widget(block, rect);

    let mut constraints = vec![
        Constraint::Length(1), // "Select data type"
        Constraint::Length(1), // Type buttons
        Constraint::Length(1), // Spacer
    ];
    constraints.extend(fields.iter().map(|_| Constraint::Length(3)));
    constraints.push(Constraint::Length(1)); // Spacer
    constraints.push(Constraint::Length(1)); // Actions
    constraints.push(Constraint::Min(0));
    let rows = Layout::vertical(constraints).split(inner);

    frame.render_widget(
        Paragraph::new("Select data type").style(Style::default().fg(DIM)),
        rows[0],
    );
    frame.render_widget(Paragraph::new(type_buttons(form.kind)), rows[1]);

    let focused = form.focused_field();
    for (idx, field) in fields.iter().enumerate() {
        render_field(frame, *field, form.value(*field), *field == focused, rows[3 + idx]);
    }

    let actions = Line::from(vec![
        Span::styled("[Enter]", Style::default().fg(Color::Yellow)),
        Span::raw(" Save Reading   "),
        Span::styled("[Esc]", Style::default().fg(Color::Yellow)),
        Span::raw(" Cancel"),
    ]);
    frame.render_widget(Paragraph::new(actions), rows[4 + fields.len()]);
}

fn type_buttons(selected: ReadingKind) -> Line<'static> {
    let mut spans = Vec::new();
    for (idx, kind) in ReadingKind::ALL.iter().enumerate() {
        if idx > 0 {
            spans.push(Span::raw(" "));
        }
        let style = if *kind == selected {
            Style::default().fg(Color::Black).bg(ACCENT).bold()
        } else {
            Style::default().fg(DIM)
        };
        spans.push(Span::styled(format!(" {} ", kind.title()), style));
    }
    Line::from(spans)
}

fn render_field(frame: &mut Frame, field: FormField, value: &str, focused: bool, area: Rect) {
    let border = if focused { ACCENT } else { DIM };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border))
        .title(format!(" {} ", field.label()));

    let content = if value.is_empty() {
        Line::from(Span::styled(
            field.placeholder(),
            Style::default().fg(Color::DarkGray).italic(),
        ))
    } else if focused {
        Line::from(vec![
            Span::raw(value.to_string()),
            Span::styled("▏", Style::default().fg(ACCENT)),
        ])
    } else {
        Line::raw(value.to_string())
    };

    frame.render_widget(Paragraph::new(content).block(block), area);
}

#[cfg(test)]
mod tests {
    use super::super::tests::render_to_string;
    use crate::app::test_support::*;
    use crate::app::AppView;
    use crossterm::event::KeyCode;
    use guardian_core::HealthRecordStore;

    #[test]
    fn test_form_shows_selected_kind_fields() {
        let (mut app, _) = app_with(HealthRecordStore::new(), MockGateway::default());
        app.navigate(AppView::LogData);
        let screen = render_to_string(&mut app, 120, 30);

        assert!(screen.contains("Log New Health Data"));
        assert!(screen.contains("Select data type"));
        assert!(screen.contains("Blood Sugar (mg/dL)"));
        assert!(screen.contains("e.g., 120"));
        assert!(!screen.contains("Systolic (mmHg)"));

        app.handle_key(key(KeyCode::Right));
        let screen = render_to_string(&mut app, 120, 30);
        assert!(screen.contains("Systolic (mmHg)"));
        assert!(screen.contains("Diastolic (mmHg)"));
        assert!(screen.contains("e.g., 80"));
    }

    #[test]
    fn test_typed_value_replaces_placeholder() {
        let (mut app, _) = app_with(HealthRecordStore::new(), MockGateway::default());
        app.navigate(AppView::LogData);
        type_text(&mut app, "98.6");
        let screen = render_to_string(&mut app, 120, 30);

        assert!(screen.contains("98.6"));
        assert!(!screen.contains("e.g., 120"));
    }
}
