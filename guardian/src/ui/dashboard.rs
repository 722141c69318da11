//! Dashboard view: metric cards and trend charts.

use super::*;

use guardian_core::format::format_relative_time;
use guardian_core::types::ReadingKind;
use guardian_core::MetricSummary;
use ratatui::{
    symbols::Marker,
    widgets::{Axis, Chart, Dataset, GraphType},
};

use crate::message_format::truncate_chars;

/// Series colors, in [`MetricSummary::series_names`] order.
fn series_colors(kind: ReadingKind) -> &'static [Color] {
    match kind {
        ReadingKind::BloodSugar => &[SERIES_SUGAR],
        ReadingKind::BloodPressure => &[SERIES_SYSTOLIC, SERIES_DIASTOLIC],
        ReadingKind::Weight => &[SERIES_WEIGHT],
    }
}

pub(super) fn render_dashboard(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::vertical([
        Constraint::Length(2), // Title
        Constraint::Min(3),    // Cards and charts, or onboarding
    ])
    .split(area);

    let title = Line::from(vec![
        Span::styled(" Your Health Dashboard", Style::default().fg(ACCENT).bold()),
        Span::raw("   "),
        Span::styled("[n]", Style::default().fg(Color::Yellow)),
        Span::styled(" Log New Data", Style::default().fg(DIM)),
    ]);
    frame.render_widget(Paragraph::new(title), chunks[0]);

    if app.dashboard.is_empty() {
        render_onboarding(frame, chunks[1]);
        return;
    }

    let body = Layout::vertical([
        Constraint::Length(5), // Metric cards
        Constraint::Min(0),    // Trend charts
    ])
    .split(chunks[1]);

    render_metric_cards(frame, &app.dashboard.metrics, body[0]);
    render_trends(frame, app, body[1]);
}

/// Call to action shown before the first reading.
fn render_onboarding(frame: &mut Frame, area: Rect) {
    let rect = centered(area, 60, 7);
    let block = panel("Get Started", ACCENT);
    let inner = block.inner(rect);
    frame.render_widget(block, rect);

    let lines = vec![
        Line::from(Span::styled(
            "Welcome to Health Guardian!",
            Style::default().fg(VALUE_COLOR).bold(),
        )),
        Line::raw(""),
        Line::from(Span::styled(
            "Log your first health metric to see your dashboard.",
            Style::default().fg(DIM),
        )),
        Line::raw(""),
        Line::from(vec![
            Span::styled("[Enter]", Style::default().fg(Color::Yellow)),
            Span::raw(" Get Started"),
        ]),
    ];
    frame.render_widget(
        Paragraph::new(lines).alignment(ratatui::layout::Alignment::Center),
        inner,
    );
}

fn render_metric_cards(frame: &mut Frame, metrics: &[MetricSummary], area: Rect) {
    let constraints: Vec<Constraint> = metrics
        .iter()
        .map(|_| Constraint::Ratio(1, metrics.len() as u32))
        .collect();
    let columns = Layout::horizontal(constraints).split(area);

    for (metric, column) in metrics.iter().zip(columns.iter()) {
        render_metric_card(frame, metric, *column);
    }
}

fn render_metric_card(frame: &mut Frame, metric: &MetricSummary, area: Rect) {
    let block = panel(metric.kind.title(), BORDER_CARD);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let max_width = inner.width as usize;
    let mut value = vec![Span::styled(
        metric.display_value(),
        Style::default().fg(VALUE_COLOR).bold(),
    )];
    if metric.latest.is_some() {
        value.push(Span::styled(
            format!(" {}", metric.kind.unit()),
            Style::default().fg(DIM),
        ));
    }

    let updated = format!("Last updated: {}", metric.last_updated());
    let mut lines = vec![
        Line::from(value),
        Line::from(Span::styled(
            truncate_chars(&updated, max_width).to_string(),
            Style::default().fg(DIM),
        )),
    ];
    if let Some(latest) = &metric.latest {
        lines.push(Line::from(Span::styled(
            format_relative_time(latest.date),
            Style::default().fg(Color::DarkGray).italic(),
        )));
    }

    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_trends(frame: &mut Frame, app: &App, area: Rect) {
    let trends: Vec<&MetricSummary> = app.dashboard.trends().collect();

    if trends.is_empty() {
        let hint = Paragraph::new(" Log at least two readings of a metric to see its trend.")
            .style(Style::default().fg(DIM));
        frame.render_widget(hint, area);
        return;
    }

    let constraints: Vec<Constraint> = trends
        .iter()
        .map(|_| Constraint::Ratio(1, trends.len() as u32))
        .collect();
    let rows = Layout::vertical(constraints).split(area);

    for (metric, row) in trends.iter().zip(rows.iter()) {
        render_trend_chart(frame, metric, *row);
    }
}

/// Line chart of one metric's history; blood pressure draws two lines.
fn render_trend_chart(frame: &mut Frame, metric: &MetricSummary, area: Rect) {
    let series: Vec<Vec<(f64, f64)>> = (0..metric.series_names().len())
        .map(|idx| metric.series(idx))
        .collect();

    let datasets: Vec<Dataset> = metric
        .series_names()
        .iter()
        .zip(series.iter())
        .zip(series_colors(metric.kind).iter())
        .map(|((name, data), color)| {
            Dataset::default()
                .name(*name)
                .marker(Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(*color))
                .data(data)
        })
        .collect();

    let [y_min, y_max] = metric.y_bounds();
    let y_labels = vec![
        format!("{:.0}", y_min),
        format!("{:.0}", (y_min + y_max) / 2.0),
        format!("{:.0}", y_max),
    ];

    let chart = Chart::new(datasets)
        .block(panel(&metric.trend_title(), ACCENT))
        .x_axis(
            Axis::default()
                .style(Style::default().fg(DIM))
                .bounds(metric.x_bounds())
                .labels(metric.x_labels()),
        )
        .y_axis(
            Axis::default()
                .style(Style::default().fg(DIM))
                .bounds([y_min, y_max])
                .labels(y_labels),
        )
        .hidden_legend_constraints((Constraint::Ratio(1, 2), Constraint::Ratio(1, 2)));

    frame.render_widget(chart, area);
}
