use serde::{Deserialize, Serialize};

/// Tradable large-cap stock as listed by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stock {
    pub symbol: String,
    pub name: String,
    pub market_cap: f64,
    pub current_price: f64,
}

/// One-year price history and return for a single symbol.
///
/// `dates[i]` is the as-of date of `prices[i]`. `roi_percentage` is computed
/// server-side and displayed verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoiData {
    pub symbol: String,
    pub initial_price: f64,
    pub final_price: f64,
    pub roi_percentage: f64,
    pub dates: Vec<String>,
    pub prices: Vec<f64>,
}

impl RoiData {
    /// Pair dates with prices by index. Extra entries on the longer side are dropped.
    pub fn points(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.dates
            .iter()
            .map(String::as_str)
            .zip(self.prices.iter().copied())
    }

    pub fn is_consistent(&self) -> bool {
        self.dates.len() == self.prices.len()
    }
}

/// Backend-computed metrics behind an opportunity's ranking
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisFactors {
    pub pe_ratio: f64,
    pub profit_margins: f64,
    pub analyst_rating: String, // "buy", "strong_buy", "hold", "none", ...
    pub past_year_roi: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvestmentOpportunity {
    pub symbol: String,
    pub name: String,
    pub current_price: f64,
    pub target_price: f64,
    pub roi_potential: f64,
    pub analysis_factors: AnalysisFactors,
}

/// Body the backend returns with a 200 when it cannot compute a result
#[derive(Debug, Deserialize)]
pub(crate) struct BackendErrorBody {
    pub error: String,
}
