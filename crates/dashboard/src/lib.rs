//! Terminal dashboard over the market analysis backend: a stock selector, a
//! one-year price/ROI chart and a grid of top investment opportunities.
//!
//! Each view owns an [`load::AsyncLoad`] and spawns its own fetch; results come
//! back to the UI loop as [`event::AppEvent`]s and are applied in order.

pub mod app;
pub mod event;
pub mod format;
pub mod load;
pub mod logging;
pub mod terminal;
pub mod ui;
pub mod views;
