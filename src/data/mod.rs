//! Data module - CSV loading, validation and reshaping

mod loader;
mod processor;
mod table;

pub use loader::{read_market_csv, DataLoader, LoaderError, DEFAULT_DATA_PATH};
pub use processor::{DataProcessor, PolicyEvent, ProcessorError, SeriesPoint};
pub use table::{
    AuditFinding, MarketTable, Segment, EV_2W_SALES, EV_3W_SALES, EV_4W_SALES, EV_BUS_SALES,
    GOVT_POLICY, MARKET_PENETRATION_PCT, POLICY_SENTINEL, REQUIRED_COLUMNS, TOTAL_EV_SALES, YEAR,
};
