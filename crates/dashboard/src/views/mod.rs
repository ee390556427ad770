pub mod opportunity_grid;
pub mod roi_chart;
pub mod root;

pub use opportunity_grid::{OpportunityCard, OpportunityGridView};
pub use roi_chart::{ChartModel, RoiChartView};
pub use root::RootView;

use std::future::Future;
use std::sync::Arc;

use market_client::{MarketDataProvider, MarketResult};

use crate::event::{AppEvent, EventSender};
use crate::load::LoadTicket;

/// What every view needs to issue requests: the data source and the way back
/// to the UI loop.
#[derive(Clone)]
pub struct ViewContext {
    pub provider: Arc<dyn MarketDataProvider>,
    events: EventSender,
}

impl ViewContext {
    pub fn new(provider: Arc<dyn MarketDataProvider>, events: EventSender) -> Self {
        Self { provider, events }
    }

    /// Run `fetch` on the runtime and post its result tagged with `ticket`.
    pub(crate) fn spawn<T, Fut, Wrap>(&self, ticket: LoadTicket, fetch: Fut, wrap: Wrap)
    where
        T: Send + 'static,
        Fut: Future<Output = MarketResult<T>> + Send + 'static,
        Wrap: FnOnce(LoadTicket, MarketResult<T>) -> AppEvent + Send + 'static,
    {
        let events = self.events.clone();
        tokio::spawn(async move {
            let result = fetch.await;
            if events.send(wrap(ticket, result)).is_err() {
                tracing::debug!("UI loop closed before fetch completed");
            }
        });
    }
}
