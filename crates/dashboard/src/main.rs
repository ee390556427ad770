use std::sync::Arc;

use market_client::{MarketClient, MarketConfig, MarketDataProvider};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    dashboard::logging::init()?;

    let config = MarketConfig::from_env();
    tracing::info!(
        api_base_url = %config.api_base_url,
        timeout_secs = config.timeout.map(|t| t.as_secs()),
        "Starting dashboard"
    );
    let client = MarketClient::new(config)?;

    // Probe in the background; the views report their own failures.
    let probe = client.clone();
    tokio::spawn(async move {
        match probe.health().await {
            Ok(true) => tracing::info!("Backend is healthy"),
            Ok(false) => tracing::warn!("Backend health check returned a non-success status"),
            Err(e) => tracing::warn!("Backend health check failed: {}", e),
        }
    });

    let provider: Arc<dyn MarketDataProvider> = Arc::new(client);
    dashboard::app::run(provider).await
}
