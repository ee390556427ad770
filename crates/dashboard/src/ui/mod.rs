mod chart;
mod grid;

use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::views::RootView;

const TITLE: &str = "US Large-Cap Stocks Analysis";
const SELECTOR_WIDTH: u16 = 36;
const HELP: &str =
    "\u{2191}\u{2193} browse  Enter select  \u{2190}\u{2192} inspect price  PgUp/PgDn scroll  q quit";

pub(crate) fn loading(frame: &mut Frame, area: Rect) {
    let text = Paragraph::new("Loading...").alignment(Alignment::Center);
    frame.render_widget(text, centered_line(area));
}

pub(crate) fn error(frame: &mut Frame, area: Rect, message: &str) {
    let text = Paragraph::new(message).style(Style::default().fg(Color::Red));
    frame.render_widget(text, area);
}

fn centered_line(area: Rect) -> Rect {
    let [_, line, _] = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(1),
        Constraint::Fill(1),
    ])
    .areas(area);
    line
}

/// Draw the whole dashboard for the current state of `root`.
pub fn draw(frame: &mut Frame, root: &mut RootView) {
    let area = frame.area();

    if root.is_loading() {
        loading(frame, area);
        return;
    }
    if let Some(message) = root.error() {
        error(frame, area, message);
        return;
    }

    let [header, returns, opportunities, help] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Percentage(45),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(area);

    let title = Paragraph::new(Span::styled(
        TITLE,
        Style::default().add_modifier(Modifier::BOLD),
    ))
    .block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(title, header);

    draw_returns(frame, returns, root);

    let block = Block::default()
        .borders(Borders::TOP)
        .title(Span::styled(
            "Top Investment Opportunities",
            Style::default().add_modifier(Modifier::BOLD),
        ));
    let inner = block.inner(opportunities);
    frame.render_widget(block, opportunities);
    if let Some(view) = root.grid_mut() {
        grid::render(frame, inner, view);
    }

    frame.render_widget(
        Paragraph::new(HELP).style(Style::default().fg(Color::DarkGray)),
        help,
    );
}

fn draw_returns(frame: &mut Frame, area: Rect, root: &RootView) {
    let block = Block::default().borders(Borders::TOP).title(Span::styled(
        "Investment Return Rates",
        Style::default().add_modifier(Modifier::BOLD),
    ));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [selector, chart_area] =
        Layout::horizontal([Constraint::Length(SELECTOR_WIDTH), Constraint::Min(0)]).areas(inner);

    let items: Vec<ListItem> = root
        .stocks()
        .iter()
        .map(|stock| {
            let label = format!("{} - {}", stock.symbol, stock.name);
            let style = if stock.symbol == root.selected_symbol() {
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            ListItem::new(Line::from(Span::styled(label, style)))
        })
        .collect();

    let title = if root.selected_symbol().is_empty() {
        "Select a stock".to_string()
    } else {
        root.selected_symbol().to_string()
    };
    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(title))
        .highlight_symbol("> ")
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED));
    let mut state = ListState::default().with_selected(Some(root.highlighted()));
    frame.render_stateful_widget(list, selector, &mut state);

    if !root.selected_symbol().is_empty() {
        if let Some(view) = root.chart() {
            chart::render(frame, chart_area, view);
        }
    }
}
