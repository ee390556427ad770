use market_client::{InvestmentOpportunity, MarketResult, RoiData, Stock};
use tokio::sync::mpsc;

use crate::load::LoadTicket;

/// Completed fetches, delivered back to the UI loop
#[derive(Debug)]
pub enum AppEvent {
    StocksLoaded {
        ticket: LoadTicket,
        result: MarketResult<Vec<Stock>>,
    },
    RoiLoaded {
        ticket: LoadTicket,
        result: MarketResult<RoiData>,
    },
    InvestmentsLoaded {
        ticket: LoadTicket,
        result: MarketResult<Vec<InvestmentOpportunity>>,
    },
}

pub type EventSender = mpsc::UnboundedSender<AppEvent>;
pub type EventReceiver = mpsc::UnboundedReceiver<AppEvent>;

pub fn channel() -> (EventSender, EventReceiver) {
    mpsc::unbounded_channel()
}
