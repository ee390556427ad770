use std::sync::Arc;

use market_client::Stock;

use crate::event::AppEvent;
use crate::load::AsyncLoad;
use crate::views::{OpportunityGridView, RoiChartView, ViewContext};

pub const STOCKS_ERROR: &str = "Failed to load stocks";

/// Owns the stock list and the selected symbol, and composes the chart and grid.
pub struct RootView {
    ctx: ViewContext,
    stocks: AsyncLoad<Vec<Stock>>,
    selected_symbol: String,
    highlighted: usize,
    chart: Option<RoiChartView>,
    grid: Option<OpportunityGridView>,
    started: bool,
}

impl RootView {
    pub fn new(ctx: ViewContext) -> Self {
        Self {
            ctx,
            stocks: AsyncLoad::new("stocks", STOCKS_ERROR),
            selected_symbol: String::new(),
            highlighted: 0,
            chart: None,
            grid: None,
            started: false,
        }
    }

    /// Issue the stock list load. Only the first call has any effect.
    pub fn start(&mut self) {
        if self.started {
            return;
        }
        self.started = true;

        let ticket = self.stocks.begin();
        let provider = Arc::clone(&self.ctx.provider);
        tracing::info!(backend = provider.backend_name(), "Loading large-cap stocks");
        self.ctx.spawn(
            ticket,
            async move { provider.fetch_large_cap_stocks().await },
            |ticket, result| AppEvent::StocksLoaded { ticket, result },
        );
    }

    /// Route a completed fetch to the view that issued it.
    pub fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::StocksLoaded { ticket, result } => {
                if !self.stocks.settle(ticket, result) {
                    return;
                }
                let first = self
                    .stocks
                    .value()
                    .and_then(|stocks| stocks.first())
                    .map(|s| s.symbol.clone());
                if let Some(symbol) = first {
                    self.select(&symbol);
                }
                if self.stocks.value().is_some() {
                    self.grid = Some(OpportunityGridView::mount(self.ctx.clone()));
                }
            }
            AppEvent::RoiLoaded { ticket, result } => match self.chart.as_mut() {
                Some(chart) => {
                    chart.settle(ticket, result);
                }
                None => tracing::debug!("Dropping ROI result with no chart mounted"),
            },
            AppEvent::InvestmentsLoaded { ticket, result } => match self.grid.as_mut() {
                Some(grid) => {
                    grid.settle(ticket, result);
                }
                None => tracing::debug!("Dropping opportunities with no grid mounted"),
            },
        }
    }

    /// Change the selected symbol. Selecting the current value is a no-op.
    pub fn select(&mut self, symbol: &str) {
        if self.selected_symbol == symbol {
            return;
        }
        self.selected_symbol = symbol.to_string();
        if let Some(index) = self.stocks().iter().position(|s| s.symbol == symbol) {
            self.highlighted = index;
        }

        if symbol.is_empty() {
            if let Some(mut chart) = self.chart.take() {
                chart.dispose();
            }
            return;
        }

        match self.chart.as_mut() {
            Some(chart) => chart.set_symbol(symbol),
            None => self.chart = Some(RoiChartView::mount(self.ctx.clone(), symbol)),
        }
    }

    pub fn highlight_next(&mut self) {
        let len = self.stocks().len();
        if len > 0 {
            self.highlighted = (self.highlighted + 1).min(len - 1);
        }
    }

    pub fn highlight_previous(&mut self) {
        self.highlighted = self.highlighted.saturating_sub(1);
    }

    /// Select the highlighted entry of the selector.
    pub fn commit_highlighted(&mut self) {
        let symbol = self.stocks().get(self.highlighted).map(|s| s.symbol.clone());
        if let Some(symbol) = symbol {
            self.select(&symbol);
        }
    }

    pub fn is_loading(&self) -> bool {
        self.stocks.is_loading()
    }

    pub fn error(&self) -> Option<&str> {
        self.stocks.error()
    }

    pub fn stocks(&self) -> &[Stock] {
        self.stocks.value().map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn selected_symbol(&self) -> &str {
        &self.selected_symbol
    }

    pub fn highlighted(&self) -> usize {
        self.highlighted
    }

    pub fn chart(&self) -> Option<&RoiChartView> {
        self.chart.as_ref()
    }

    pub fn chart_mut(&mut self) -> Option<&mut RoiChartView> {
        self.chart.as_mut()
    }

    pub fn grid(&self) -> Option<&OpportunityGridView> {
        self.grid.as_ref()
    }

    pub fn grid_mut(&mut self) -> Option<&mut OpportunityGridView> {
        self.grid.as_mut()
    }

    /// Tear down every view; results still in flight are dropped on arrival.
    pub fn dispose(&mut self) {
        self.stocks.dispose();
        if let Some(chart) = self.chart.as_mut() {
            chart.dispose();
        }
        if let Some(grid) = self.grid.as_mut() {
            grid.dispose();
        }
    }
}
