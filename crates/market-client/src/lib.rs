pub mod client;
pub mod error;
pub mod models;
pub mod provider;

pub use client::MarketClient;
pub use error::{MarketError, MarketResult};
pub use models::{AnalysisFactors, InvestmentOpportunity, RoiData, Stock};
pub use provider::MarketDataProvider;

use std::time::Duration;

const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";

/// Configuration for the market analysis backend.
///
/// Built once at process start and never mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct MarketConfig {
    pub api_base_url: String,
    /// `None` means requests wait for the backend indefinitely.
    pub timeout: Option<Duration>,
}

impl MarketConfig {
    pub fn new(api_base_url: impl Into<String>) -> Self {
        Self {
            api_base_url: normalize_base_url(api_base_url.into()),
            timeout: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// `API_BASE_URL` from the runtime environment, then the value baked in at
    /// build time, then the local default. `API_TIMEOUT_SECS` is optional.
    pub fn from_env() -> Self {
        Self::resolve(
            std::env::var("API_BASE_URL").ok(),
            option_env!("API_BASE_URL"),
            std::env::var("API_TIMEOUT_SECS").ok(),
        )
    }

    /// A zero or unparseable timeout means no timeout.
    fn resolve(
        runtime_url: Option<String>,
        build_url: Option<&str>,
        timeout_secs: Option<String>,
    ) -> Self {
        let api_base_url = runtime_url
            .or_else(|| build_url.map(str::to_string))
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());

        let timeout = timeout_secs
            .and_then(|v| v.trim().parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs);

        Self {
            api_base_url: normalize_base_url(api_base_url),
            timeout,
        }
    }
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

fn normalize_base_url(url: String) -> String {
    let trimmed = url.trim();
    trimmed.trim_end_matches('/').to_string()
}
