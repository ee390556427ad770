use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::format::Trend;
use crate::views::opportunity_grid::grid_columns;
use crate::views::{OpportunityCard, OpportunityGridView};

const CARD_HEIGHT: u16 = 12;

pub(super) fn render(frame: &mut Frame, area: Rect, view: &mut OpportunityGridView) {
    if view.is_loading() {
        super::loading(frame, area);
        return;
    }
    if let Some(message) = view.error() {
        super::error(frame, area, message);
        return;
    }

    let cards = view.cards();
    let columns = grid_columns(area.width);
    let visible_rows = (area.height / CARD_HEIGHT).max(1) as usize;
    view.set_viewport(columns, visible_rows);
    let first_row = view.scroll();

    let rows = Layout::vertical(vec![Constraint::Length(CARD_HEIGHT); visible_rows]).split(area);
    let column_constraints = vec![Constraint::Ratio(1, columns as u32); columns];

    for (row_area, row_cards) in rows
        .iter()
        .zip(cards.chunks(columns).skip(first_row))
    {
        let cells = Layout::horizontal(column_constraints.clone()).split(*row_area);
        for (cell, card) in cells.iter().zip(row_cards) {
            render_card(frame, *cell, card);
        }
    }
}

fn render_card(frame: &mut Frame, area: Rect, card: &OpportunityCard) {
    let trend_style = match card.trend {
        Trend::Up => Style::default().fg(Color::Green),
        Trend::Down => Style::default().fg(Color::Red),
    };
    let title = Line::from(vec![
        Span::styled(
            format!(" {} ", card.symbol),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::styled(card.trend.indicator(), trend_style),
        Span::raw(" "),
    ]);
    let block = Block::default().borders(Borders::ALL).title(title);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let width = inner.width as usize;
    let bold = Style::default().add_modifier(Modifier::BOLD);
    let lines = vec![
        Line::from(Span::styled(card.name.clone(), Style::default().fg(Color::Gray))),
        row("Current Price:", &card.current_price, width, bold),
        row("Target Price:", &card.target_price, width, bold),
        row("ROI Potential:", &card.roi_potential, width, bold.fg(Color::Green)),
        Line::from("\u{2500}".repeat(width)),
        Line::from(Span::styled("Analysis Factors", bold)),
        row("P/E Ratio:", &card.pe_ratio, width, Style::default()),
        row("Profit Margin:", &card.profit_margin, width, Style::default()),
        row("Past Year ROI:", &card.past_year_roi, width, Style::default()),
        row("Analyst Rating:", &card.analyst_rating, width, Style::default()),
    ];

    frame.render_widget(Paragraph::new(lines), inner);
}

/// Label on the left, value pushed to the right edge
fn row<'a>(label: &'a str, value: &'a str, width: usize, value_style: Style) -> Line<'a> {
    let gap = width.saturating_sub(label.chars().count() + value.chars().count());
    Line::from(vec![
        Span::raw(label),
        Span::raw(" ".repeat(gap.max(1))),
        Span::styled(value, value_style),
    ])
}
