use reqwest::Url;
use serde::de::DeserializeOwned;

use crate::error::{MarketError, MarketResult};
use crate::models::{BackendErrorBody, InvestmentOpportunity, RoiData, Stock};
use crate::MarketConfig;

/// HTTP client for the market analysis backend.
///
/// Every call issues exactly one GET. Nothing is cached and nothing is retried.
#[derive(Clone)]
pub struct MarketClient {
    client: reqwest::Client,
    base_url: Url,
}

impl MarketClient {
    pub fn new(config: MarketConfig) -> MarketResult<Self> {
        let base_url = Url::parse(&config.api_base_url)
            .map_err(|e| MarketError::InvalidConfig(format!("{}: {}", config.api_base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(MarketError::InvalidConfig(format!(
                "{} cannot be used as a base URL",
                config.api_base_url
            )));
        }

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    /// List the large-cap stocks the backend considers tradable
    pub async fn fetch_large_cap_stocks(&self) -> MarketResult<Vec<Stock>> {
        let url = self.endpoint(&["api", "stocks", "large-cap"])?;
        self.get_json(url).await
    }

    /// One-year ROI series for `symbol`
    pub async fn fetch_stock_roi(&self, symbol: &str) -> MarketResult<RoiData> {
        let url = self.endpoint(&["api", "stocks", symbol, "roi"])?;
        self.get_json(url).await
    }

    /// Ranked investment opportunities, in backend order
    pub async fn fetch_top_investments(&self) -> MarketResult<Vec<InvestmentOpportunity>> {
        let url = self.endpoint(&["api", "analysis", "top-investments"])?;
        self.get_json(url).await
    }

    /// Check service health
    pub async fn health(&self) -> MarketResult<bool> {
        let url = self.endpoint(&["healthz"])?;
        let response = self.client.get(url).send().await?;

        Ok(response.status().is_success())
    }

    /// Join path segments onto the base URL, percent-encoding each one.
    pub(crate) fn endpoint(&self, segments: &[&str]) -> MarketResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| {
                MarketError::InvalidConfig(format!("{} cannot be used as a base URL", self.base_url))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> MarketResult<T> {
        tracing::debug!(%url, "GET");
        let response = self.client.get(url.clone()).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(MarketError::Status {
                status,
                url: url.to_string(),
            });
        }

        let body = response.bytes().await?;
        decode(&body)
    }
}

/// Parse a success body as `T`, falling back to the backend's `{"error": ...}` shape.
pub(crate) fn decode<T: DeserializeOwned>(body: &[u8]) -> MarketResult<T> {
    match serde_json::from_slice::<T>(body) {
        Ok(value) => Ok(value),
        Err(err) => match serde_json::from_slice::<BackendErrorBody>(body) {
            Ok(backend) => Err(MarketError::Backend(backend.error)),
            Err(_) => Err(MarketError::InvalidResponse(err.to_string())),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str) -> MarketClient {
        MarketClient::new(MarketConfig::new(base)).unwrap()
    }

    #[test]
    fn test_endpoint_joins_segments() {
        let c = client("http://localhost:8000");
        let url = c.endpoint(&["api", "stocks", "large-cap"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8000/api/stocks/large-cap");
    }

    #[test]
    fn test_endpoint_keeps_base_path_prefix() {
        let c = client("http://example.com/market/");
        let url = c.endpoint(&["api", "stocks", "AAPL", "roi"]).unwrap();
        assert_eq!(url.as_str(), "http://example.com/market/api/stocks/AAPL/roi");
    }

    #[test]
    fn test_endpoint_encodes_symbol_segment() {
        let c = client("http://localhost:8000");
        let url = c.endpoint(&["api", "stocks", "BRK/B", "roi"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8000/api/stocks/BRK%2FB/roi");

        let url = c.endpoint(&["api", "stocks", "BRK-B", "roi"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8000/api/stocks/BRK-B/roi");
    }

    #[test]
    fn test_new_rejects_invalid_base_url() {
        let result = MarketClient::new(MarketConfig::new("not a url"));
        assert!(matches!(result, Err(MarketError::InvalidConfig(_))));

        let result = MarketClient::new(MarketConfig::new("mailto:ops@example.com"));
        assert!(matches!(result, Err(MarketError::InvalidConfig(_))));
    }

    #[test]
    fn test_decode_backend_error_body() {
        let result = decode::<RoiData>(br#"{"error": "Insufficient data"}"#);
        match result {
            Err(MarketError::Backend(msg)) => assert_eq!(msg, "Insufficient data"),
            other => panic!("expected backend error, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_decode_malformed_body() {
        let result = decode::<Vec<Stock>>(b"<html>bad gateway</html>");
        assert!(matches!(result, Err(MarketError::InvalidResponse(_))));
    }

    #[test]
    fn test_decode_stock_list() {
        let body = br#"[{"symbol":"AAPL","name":"Apple Inc.","market_cap":3.4e12,"current_price":227.5}]"#;
        let stocks = decode::<Vec<Stock>>(body).unwrap();
        assert_eq!(stocks.len(), 1);
        assert_eq!(stocks[0].symbol, "AAPL");
    }
}
