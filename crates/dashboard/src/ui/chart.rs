use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols,
    text::{Line, Span},
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph},
    Frame,
};

use crate::format::currency;
use crate::views::{ChartModel, RoiChartView};

const LINE_COLOR: Color = Color::Rgb(0x25, 0x63, 0xeb);

pub(super) fn render(frame: &mut Frame, area: Rect, view: &RoiChartView) {
    if view.is_loading() {
        super::loading(frame, area);
        return;
    }
    if let Some(message) = view.error() {
        super::error(frame, area, message);
        return;
    }
    let Some(model) = view.model() else {
        return;
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(
            model.title.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        ));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [plot, tooltip] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(inner);

    if model.points.is_empty() {
        frame.render_widget(
            Paragraph::new("No price history").style(Style::default().fg(Color::DarkGray)),
            plot,
        );
        return;
    }

    draw_plot(frame, plot, &model);

    if let Some(text) = model.tooltip() {
        frame.render_widget(
            Paragraph::new(text).style(Style::default().fg(Color::Yellow)),
            tooltip,
        );
    }
}

fn draw_plot(frame: &mut Frame, area: Rect, model: &ChartModel) {
    let series = model.series();
    let cursor = [(model.cursor as f64, model.points[model.cursor].price)];

    let datasets = vec![
        Dataset::default()
            .name("Stock Price")
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(LINE_COLOR))
            .data(&series),
        Dataset::default()
            .marker(symbols::Marker::Dot)
            .graph_type(GraphType::Scatter)
            .style(Style::default().fg(Color::Yellow))
            .data(&cursor),
    ];

    let x_labels: Vec<Line> = model
        .x_ticks
        .iter()
        .map(|(_, label)| Line::from(label.clone()))
        .collect();
    let [low, high] = model.price_bounds;
    let y_labels = vec![Line::from(currency(low)), Line::from(currency(high))];

    let chart = Chart::new(datasets)
        .x_axis(
            Axis::default()
                .style(Style::default().fg(Color::Gray))
                .bounds([0.0, (model.points.len().saturating_sub(1)).max(1) as f64])
                .labels(x_labels),
        )
        .y_axis(
            Axis::default()
                .title("Price")
                .style(Style::default().fg(Color::Gray))
                .bounds(model.price_bounds)
                .labels(y_labels),
        );

    frame.render_widget(chart, area);
}
