//! EV Dashboard - Indian electric vehicle market, 2001 onward
//!
//! Loads the yearly market CSV once and derives everything the dashboard
//! shows from it: headline KPIs for a target year, a long-form segment
//! series for plotting and the government policy timeline.

pub mod charts;
pub mod data;
pub mod logging;
pub mod metrics;
pub mod report;

#[cfg(feature = "gui")]
pub mod gui;

pub use data::{DataLoader, MarketTable, Segment};
pub use report::DashboardReport;
