//! Dashboard Report Module
//! Everything the dashboard shows for one target year, computed once.

use serde::Serialize;
use thiserror::Error;

use crate::data::{DataProcessor, MarketTable, PolicyEvent, ProcessorError, Segment, SeriesPoint};
use crate::metrics::{format_percent, format_thousands, KpiCalculator, KpiSet, SummaryError};

pub const DASHBOARD_TITLE: &str = "Indian Electric Vehicle Market Dashboard";
pub const FOOTER: &str = "Data from simulated estimates based on public reports";

#[derive(Error, Debug)]
pub enum ReportError {
    #[error(transparent)]
    Summary(#[from] SummaryError),
    #[error(transparent)]
    Processor(#[from] ProcessorError),
}

/// A labelled, display-ready KPI value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetricCard {
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardReport {
    pub first_year: i32,
    pub last_year: i32,
    pub kpis: KpiSet,
    pub segment_sales: Vec<SeriesPoint>,
    pub total_sales: Vec<(i32, i64)>,
    pub penetration: Vec<(i32, f64)>,
    pub policies: Vec<PolicyEvent>,
}

impl DashboardReport {
    pub fn build(table: &MarketTable, target_year: i32) -> Result<Self, ReportError> {
        let kpis = KpiCalculator::summarize(table, target_year)?;
        // A successful summary implies at least one row.
        let (first_year, last_year) = table.year_span().unwrap_or((target_year, target_year));

        Ok(Self {
            first_year,
            last_year,
            kpis,
            segment_sales: DataProcessor::to_long_form(table, &Segment::ALL)?,
            total_sales: DataProcessor::total_sales_series(table)?,
            penetration: DataProcessor::penetration_series(table)?,
            policies: DataProcessor::policy_timeline(table)?,
        })
    }

    /// "2001-2024"
    pub fn year_range(&self) -> String {
        format!("{}-{}", self.first_year, self.last_year)
    }

    pub fn title(&self) -> String {
        format!(
            "{} ({} - {})",
            DASHBOARD_TITLE, self.first_year, self.last_year
        )
    }

    pub fn metric_cards(&self) -> [MetricCard; 3] {
        let year = self.kpis.year;
        [
            MetricCard {
                label: format!("{year} EV Sales"),
                value: format_thousands(self.kpis.total_ev_sales),
            },
            MetricCard {
                label: format!("Market Penetration ({year})"),
                value: format_percent(self.kpis.market_penetration_pct),
            },
            MetricCard {
                label: format!("2W Sales in {year}"),
                value: format_thousands(self.kpis.ev_2w_sales),
            },
        ]
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
