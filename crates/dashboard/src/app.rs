use std::sync::Arc;

use crossterm::event::{Event, EventStream, KeyCode, KeyEventKind};
use futures_util::StreamExt;
use market_client::MarketDataProvider;

use crate::event;
use crate::terminal::{self, Tui};
use crate::ui;
use crate::views::{RootView, ViewContext};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Run the dashboard until the user quits.
pub async fn run(provider: Arc<dyn MarketDataProvider>) -> anyhow::Result<()> {
    let mut tui = terminal::init()?;
    let result = run_loop(&mut tui, provider).await;
    terminal::restore()?;
    result
}

async fn run_loop(tui: &mut Tui, provider: Arc<dyn MarketDataProvider>) -> anyhow::Result<()> {
    let (tx, mut rx) = event::channel();
    let mut root = RootView::new(ViewContext::new(provider, tx));
    root.start();

    let mut input = EventStream::new();
    loop {
        tui.draw(|frame| ui::draw(frame, &mut root))?;

        tokio::select! {
            Some(event) = rx.recv() => root.handle_event(event),
            next = input.next() => match next {
                Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                    if handle_key(&mut root, key.code) == Flow::Quit {
                        break;
                    }
                }
                Some(Ok(_)) => {}
                Some(Err(e)) => {
                    root.dispose();
                    return Err(e.into());
                }
                None => break,
            },
        }
    }

    root.dispose();
    tracing::info!("Dashboard closed");
    Ok(())
}

pub fn handle_key(root: &mut RootView, code: KeyCode) -> Flow {
    match code {
        KeyCode::Char('q') | KeyCode::Esc => return Flow::Quit,
        KeyCode::Up | KeyCode::Char('k') => root.highlight_previous(),
        KeyCode::Down | KeyCode::Char('j') => root.highlight_next(),
        KeyCode::Enter => root.commit_highlighted(),
        KeyCode::Left | KeyCode::Char('h') => {
            if let Some(chart) = root.chart_mut() {
                chart.move_cursor(-1);
            }
        }
        KeyCode::Right | KeyCode::Char('l') => {
            if let Some(chart) = root.chart_mut() {
                chart.move_cursor(1);
            }
        }
        KeyCode::PageUp => {
            if let Some(grid) = root.grid_mut() {
                grid.scroll_by(-1);
            }
        }
        KeyCode::PageDown => {
            if let Some(grid) = root.grid_mut() {
                grid.scroll_by(1);
            }
        }
        _ => {}
    }
    Flow::Continue
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::views::testing::FakeProvider;

    #[tokio::test]
    async fn test_keys_drive_selection() {
        let provider = Arc::new(FakeProvider::healthy());
        let (tx, mut rx) = event::channel();
        let mut root = RootView::new(ViewContext::new(provider.clone(), tx));
        root.start();
        for _ in 0..3 {
            let event = rx.recv().await.unwrap();
            root.handle_event(event);
        }

        assert_eq!(handle_key(&mut root, KeyCode::Down), Flow::Continue);
        assert_eq!(root.selected_symbol(), "AAPL");
        handle_key(&mut root, KeyCode::Enter);
        assert_eq!(root.selected_symbol(), "MSFT");

        let event = rx.recv().await.unwrap();
        root.handle_event(event);
        handle_key(&mut root, KeyCode::Left);
        assert_eq!(root.chart().unwrap().model().unwrap().cursor, 1);

        assert_eq!(handle_key(&mut root, KeyCode::Char('q')), Flow::Quit);
        assert_eq!(handle_key(&mut root, KeyCode::Esc), Flow::Quit);
    }

    #[test]
    fn test_keys_before_load_are_harmless() {
        let (tx, _rx) = event::channel();
        let mut root = RootView::new(ViewContext::new(Arc::new(FakeProvider::healthy()), tx));

        assert_eq!(handle_key(&mut root, KeyCode::Enter), Flow::Continue);
        assert_eq!(handle_key(&mut root, KeyCode::PageDown), Flow::Continue);
        assert_eq!(handle_key(&mut root, KeyCode::Right), Flow::Continue);
        assert_eq!(root.selected_symbol(), "");
    }
}
