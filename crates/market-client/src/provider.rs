use async_trait::async_trait;

use crate::error::MarketResult;
use crate::models::{InvestmentOpportunity, RoiData, Stock};
use crate::MarketClient;

/// Source of market data for the dashboard views.
///
/// Implemented by the HTTP client; tests substitute an in-memory provider.
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    async fn fetch_large_cap_stocks(&self) -> MarketResult<Vec<Stock>>;

    async fn fetch_stock_roi(&self, symbol: &str) -> MarketResult<RoiData>;

    async fn fetch_top_investments(&self) -> MarketResult<Vec<InvestmentOpportunity>>;

    fn backend_name(&self) -> &'static str;
}

#[async_trait]
impl MarketDataProvider for MarketClient {
    async fn fetch_large_cap_stocks(&self) -> MarketResult<Vec<Stock>> {
        MarketClient::fetch_large_cap_stocks(self).await
    }

    async fn fetch_stock_roi(&self, symbol: &str) -> MarketResult<RoiData> {
        MarketClient::fetch_stock_roi(self, symbol).await
    }

    async fn fetch_top_investments(&self) -> MarketResult<Vec<InvestmentOpportunity>> {
        MarketClient::fetch_top_investments(self).await
    }

    fn backend_name(&self) -> &'static str {
        "http"
    }
}
