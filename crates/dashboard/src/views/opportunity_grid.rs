use std::sync::Arc;

use market_client::{InvestmentOpportunity, MarketResult};

use crate::event::AppEvent;
use crate::format::{currency, fixed2, humanize_rating, percent, ratio_percent, Trend};
use crate::load::{AsyncLoad, LoadTicket};
use crate::views::ViewContext;

pub const INVESTMENTS_ERROR: &str = "Failed to load investment opportunities";

/// Display strings for one opportunity card
#[derive(Debug, Clone, PartialEq)]
pub struct OpportunityCard {
    pub symbol: String,
    pub trend: Trend,
    pub name: String,
    pub current_price: String,
    pub target_price: String,
    pub roi_potential: String,
    pub pe_ratio: String,
    pub profit_margin: String,
    pub past_year_roi: String,
    pub analyst_rating: String,
}

impl From<&InvestmentOpportunity> for OpportunityCard {
    fn from(opp: &InvestmentOpportunity) -> Self {
        let factors = &opp.analysis_factors;
        Self {
            symbol: opp.symbol.clone(),
            trend: Trend::from_roi(factors.past_year_roi),
            name: opp.name.clone(),
            current_price: currency(opp.current_price),
            target_price: currency(opp.target_price),
            roi_potential: percent(opp.roi_potential),
            pe_ratio: fixed2(factors.pe_ratio),
            profit_margin: ratio_percent(factors.profit_margins),
            past_year_roi: percent(factors.past_year_roi),
            analyst_rating: humanize_rating(&factors.analyst_rating),
        }
    }
}

/// Grid of ranked opportunities, loaded once when mounted.
///
/// Symbols are assumed unique within the list; duplicates are rendered as-is.
pub struct OpportunityGridView {
    ctx: ViewContext,
    investments: AsyncLoad<Vec<InvestmentOpportunity>>,
    scroll: usize,
    columns: usize,
    visible_rows: usize,
}

impl OpportunityGridView {
    pub fn mount(ctx: ViewContext) -> Self {
        let mut view = Self {
            ctx,
            investments: AsyncLoad::new("investments", INVESTMENTS_ERROR),
            scroll: 0,
            columns: 1,
            visible_rows: 1,
        };

        let ticket = view.investments.begin();
        let provider = Arc::clone(&view.ctx.provider);
        view.ctx.spawn(
            ticket,
            async move { provider.fetch_top_investments().await },
            |ticket, result| AppEvent::InvestmentsLoaded { ticket, result },
        );
        view
    }

    pub fn settle(
        &mut self,
        ticket: LoadTicket,
        result: MarketResult<Vec<InvestmentOpportunity>>,
    ) -> bool {
        let applied = self.investments.settle(ticket, result);
        if let Some(list) = self.investments.value().filter(|_| applied) {
            tracing::info!(count = list.len(), "Loaded investment opportunities");
        }
        applied
    }

    pub fn is_loading(&self) -> bool {
        self.investments.is_loading()
    }

    pub fn error(&self) -> Option<&str> {
        self.investments.error()
    }

    pub fn cards(&self) -> Vec<OpportunityCard> {
        self.investments
            .value()
            .map(|list| list.iter().map(OpportunityCard::from).collect())
            .unwrap_or_default()
    }

    /// First visible card row
    pub fn scroll(&self) -> usize {
        self.scroll
    }

    pub fn scroll_by(&mut self, rows: isize) {
        self.scroll = self.scroll.saturating_add_signed(rows).min(self.max_scroll());
    }

    /// Record the grid shape from the latest render, in columns and whole card rows.
    pub fn set_viewport(&mut self, columns: usize, visible_rows: usize) {
        self.columns = columns.max(1);
        self.visible_rows = visible_rows.max(1);
        self.scroll = self.scroll.min(self.max_scroll());
    }

    /// Last row offset that still fills the viewport
    fn max_scroll(&self) -> usize {
        let cards = self.investments.value().map(Vec::len).unwrap_or(0);
        cards
            .div_ceil(self.columns)
            .saturating_sub(self.visible_rows)
    }

    pub fn dispose(&mut self) {
        self.investments.dispose();
    }
}

/// Columns for a grid `width` cells wide
pub fn grid_columns(width: u16) -> usize {
    match width {
        0..=79 => 1,
        80..=119 => 2,
        _ => 3,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::channel;
    use crate::views::testing::{opportunity, FakeProvider};

    #[test]
    fn test_card_end_to_end_example() {
        let card = OpportunityCard::from(&opportunity("ACME", 5.1));

        assert_eq!(card.symbol, "ACME");
        assert_eq!(card.trend, Trend::Up);
        assert_eq!(card.name, "Acme Corp");
        assert_eq!(card.current_price, "$100.00");
        assert_eq!(card.target_price, "$120.00");
        assert_eq!(card.roi_potential, "20.00%");
        assert_eq!(card.pe_ratio, "18.46");
        assert_eq!(card.profit_margin, "12.00%");
        assert_eq!(card.past_year_roi, "5.10%");
        assert_eq!(card.analyst_rating, "Buy");
    }

    #[test]
    fn test_card_negative_roi_trends_down() {
        let mut opp = opportunity("DOWN", -3.4);
        opp.analysis_factors.profit_margins = 0.1523;
        opp.analysis_factors.analyst_rating = "strong_buy".to_string();

        let card = OpportunityCard::from(&opp);
        assert_eq!(card.trend, Trend::Down);
        assert_eq!(card.past_year_roi, "-3.40%");
        assert_eq!(card.profit_margin, "15.23%");
        assert_eq!(card.analyst_rating, "Strong Buy");
        assert_eq!(opp.analysis_factors.analyst_rating, "strong_buy");
    }

    #[test]
    fn test_zero_roi_trends_down() {
        let card = OpportunityCard::from(&opportunity("FLAT", 0.0));
        assert_eq!(card.trend, Trend::Down);
    }

    #[test]
    fn test_grid_columns() {
        assert_eq!(grid_columns(60), 1);
        assert_eq!(grid_columns(100), 2);
        assert_eq!(grid_columns(200), 3);
    }

    #[tokio::test]
    async fn test_mount_loads_once_in_backend_order() {
        let provider = Arc::new(FakeProvider {
            investments: Some(vec![opportunity("ZZZ", 1.0), opportunity("AAA", 2.0)]),
            ..FakeProvider::healthy()
        });
        let (tx, mut rx) = channel();
        let mut view = OpportunityGridView::mount(ViewContext::new(provider.clone(), tx));
        assert!(view.is_loading());
        assert!(view.cards().is_empty());

        match rx.recv().await {
            Some(AppEvent::InvestmentsLoaded { ticket, result }) => {
                assert!(view.settle(ticket, result))
            }
            other => panic!("expected InvestmentsLoaded, got {:?}", other),
        }

        let symbols: Vec<String> = view.cards().into_iter().map(|c| c.symbol).collect();
        assert_eq!(symbols, vec!["ZZZ", "AAA"]);
        assert_eq!(provider.calls(), vec!["investments"]);
    }

    #[tokio::test]
    async fn test_failure_sets_fixed_error() {
        let provider = Arc::new(FakeProvider {
            investments: None,
            ..FakeProvider::healthy()
        });
        let (tx, mut rx) = channel();
        let mut view = OpportunityGridView::mount(ViewContext::new(provider, tx));

        if let Some(AppEvent::InvestmentsLoaded { ticket, result }) = rx.recv().await {
            view.settle(ticket, result);
        }
        assert!(!view.is_loading());
        assert_eq!(view.error(), Some(INVESTMENTS_ERROR));
    }

    async fn loaded_grid(count: usize) -> OpportunityGridView {
        let investments = (0..count)
            .map(|i| opportunity(&format!("S{}", i), 1.0))
            .collect();
        let provider = Arc::new(FakeProvider {
            investments: Some(investments),
            ..FakeProvider::healthy()
        });
        let (tx, mut rx) = channel();
        let mut view = OpportunityGridView::mount(ViewContext::new(provider, tx));
        if let Some(AppEvent::InvestmentsLoaded { ticket, result }) = rx.recv().await {
            view.settle(ticket, result);
        }
        view
    }

    #[tokio::test]
    async fn test_scroll_is_clamped_to_last_full_row() {
        let mut view = loaded_grid(9).await;
        view.set_viewport(3, 1);

        for _ in 0..20 {
            view.scroll_by(1);
        }
        assert_eq!(view.scroll(), 2);

        view.scroll_by(-1);
        assert_eq!(view.scroll(), 1);
        view.scroll_by(-5);
        assert_eq!(view.scroll(), 0);
    }

    #[tokio::test]
    async fn test_scroll_counts_partial_last_row() {
        let mut view = loaded_grid(7).await;
        view.set_viewport(2, 2);

        view.scroll_by(10);
        assert_eq!(view.scroll(), 2);
    }

    #[tokio::test]
    async fn test_wider_viewport_pulls_scroll_back() {
        let mut view = loaded_grid(6).await;
        view.set_viewport(1, 1);
        view.scroll_by(10);
        assert_eq!(view.scroll(), 5);

        view.set_viewport(3, 1);
        assert_eq!(view.scroll(), 1);
        view.set_viewport(3, 4);
        assert_eq!(view.scroll(), 0);
    }
}
