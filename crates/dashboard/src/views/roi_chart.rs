use std::sync::Arc;

use market_client::{MarketResult, RoiData};

use crate::event::AppEvent;
use crate::format::{currency, fixed2, locale_date};
use crate::load::{AsyncLoad, LoadTicket};
use crate::views::ViewContext;

pub const ROI_ERROR: &str = "Failed to load ROI data";

/// Number of points skipped between two labelled x-axis ticks
pub const X_TICK_INTERVAL: usize = 30;

/// One-year price line for the selected symbol
pub struct RoiChartView {
    ctx: ViewContext,
    symbol: String,
    roi: AsyncLoad<RoiData>,
    cursor: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartPoint {
    pub date: String,
    pub price: f64,
}

/// Everything the renderer needs, derived from a loaded [`RoiData`]
#[derive(Debug, Clone, PartialEq)]
pub struct ChartModel {
    pub title: String,
    pub points: Vec<ChartPoint>,
    /// `(point index, label)` for each labelled x tick
    pub x_ticks: Vec<(usize, String)>,
    pub price_bounds: [f64; 2],
    pub cursor: usize,
}

impl ChartModel {
    pub fn from_roi(symbol: &str, roi: &RoiData, cursor: usize) -> Self {
        let points: Vec<ChartPoint> = roi
            .points()
            .map(|(date, price)| ChartPoint {
                date: date.to_string(),
                price,
            })
            .collect();

        let x_ticks = points
            .iter()
            .enumerate()
            .step_by(X_TICK_INTERVAL + 1)
            .map(|(i, p)| (i, locale_date(&p.date)))
            .collect();

        let min = points.iter().map(|p| p.price).fold(f64::INFINITY, f64::min);
        let max = points.iter().map(|p| p.price).fold(f64::NEG_INFINITY, f64::max);
        let price_bounds = if points.is_empty() {
            [0.0, 1.0]
        } else if (max - min).abs() < f64::EPSILON {
            [min * 0.98, max * 1.02 + f64::EPSILON]
        } else {
            [min * 0.98, max * 1.02]
        };

        Self {
            title: format!("{} - 1 Year ROI: {}%", symbol, fixed2(roi.roi_percentage)),
            cursor: cursor.min(points.len().saturating_sub(1)),
            points,
            x_ticks,
            price_bounds,
        }
    }

    pub fn series(&self) -> Vec<(f64, f64)> {
        self.points
            .iter()
            .enumerate()
            .map(|(i, p)| (i as f64, p.price))
            .collect()
    }

    pub fn tooltip(&self) -> Option<String> {
        self.points
            .get(self.cursor)
            .map(|p| format!("{}  Price: {}", locale_date(&p.date), currency(p.price)))
    }
}

impl RoiChartView {
    /// Mount the chart and issue the first load for `symbol`.
    pub fn mount(ctx: ViewContext, symbol: impl Into<String>) -> Self {
        let mut view = Self {
            ctx,
            symbol: symbol.into(),
            roi: AsyncLoad::new("roi", ROI_ERROR),
            cursor: 0,
        };
        view.load();
        view
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Reload only when the symbol actually changes.
    pub fn set_symbol(&mut self, symbol: &str) {
        if self.symbol == symbol {
            return;
        }
        self.symbol = symbol.to_string();
        self.load();
    }

    fn load(&mut self) {
        let ticket = self.roi.begin();
        self.cursor = 0;

        let provider = Arc::clone(&self.ctx.provider);
        let symbol = self.symbol.clone();
        tracing::debug!(%symbol, "Loading ROI data");
        self.ctx.spawn(
            ticket,
            async move { provider.fetch_stock_roi(&symbol).await },
            |ticket, result| AppEvent::RoiLoaded { ticket, result },
        );
    }

    pub fn settle(&mut self, ticket: LoadTicket, result: MarketResult<RoiData>) -> bool {
        if !self.roi.settle(ticket, result) {
            return false;
        }
        if let Some(data) = self.roi.value() {
            if !data.is_consistent() {
                tracing::warn!(
                    symbol = %data.symbol,
                    dates = data.dates.len(),
                    prices = data.prices.len(),
                    "ROI series lengths differ; extra entries are not charted"
                );
            }
            self.cursor = data.points().count().saturating_sub(1);
        }
        true
    }

    pub fn move_cursor(&mut self, delta: isize) {
        let Some(data) = self.roi.value() else {
            return;
        };
        let last = data.points().count().saturating_sub(1);
        self.cursor = self.cursor.saturating_add_signed(delta).min(last);
    }

    pub fn is_loading(&self) -> bool {
        self.roi.is_loading()
    }

    pub fn error(&self) -> Option<&str> {
        self.roi.error()
    }

    pub fn model(&self) -> Option<ChartModel> {
        self.roi
            .value()
            .map(|roi| ChartModel::from_roi(&self.symbol, roi, self.cursor))
    }

    pub fn dispose(&mut self) {
        self.roi.dispose();
    }
}
