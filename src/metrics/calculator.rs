//! KPI Calculator Module
//! Extracts the headline metrics for a single year.

use polars::prelude::*;
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::data::{MarketTable, EV_2W_SALES, MARKET_PENETRATION_PCT, TOTAL_EV_SALES, YEAR};

/// Year the dashboard headlines by default.
pub const DEFAULT_TARGET_YEAR: i32 = 2024;

#[derive(Error, Debug)]
pub enum SummaryError {
    #[error("No row found for year {year}")]
    RowNotFound { year: i32 },
    #[error("Year {year} appears in {count} rows")]
    DuplicateYear { year: i32, count: usize },
    #[error("Column '{column}' has no value for year {year}")]
    MissingValue { column: &'static str, year: i32 },
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
}

/// Headline metrics for one year. Raw values; formatting is up to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct KpiSet {
    pub year: i32,
    pub total_ev_sales: i64,
    pub market_penetration_pct: f64,
    pub ev_2w_sales: i64,
}

/// Computes the KPI set from the market table.
pub struct KpiCalculator;

impl KpiCalculator {
    /// Look up exactly one row for `target_year` and pick its three KPIs.
    pub fn summarize(table: &MarketTable, target_year: i32) -> Result<KpiSet, SummaryError> {
        let matched = table
            .dataframe()
            .clone()
            .lazy()
            .filter(col(YEAR).eq(lit(target_year)))
            .select([
                col(TOTAL_EV_SALES),
                col(MARKET_PENETRATION_PCT),
                col(EV_2W_SALES),
            ])
            .collect()?;

        match matched.height() {
            0 => return Err(SummaryError::RowNotFound { year: target_year }),
            1 => {}
            count => {
                return Err(SummaryError::DuplicateYear {
                    year: target_year,
                    count,
                })
            }
        }

        let missing = |column| SummaryError::MissingValue {
            column,
            year: target_year,
        };

        let kpis = KpiSet {
            year: target_year,
            total_ev_sales: matched
                .column(TOTAL_EV_SALES)?
                .i64()?
                .get(0)
                .ok_or_else(|| missing(TOTAL_EV_SALES))?,
            market_penetration_pct: matched
                .column(MARKET_PENETRATION_PCT)?
                .f64()?
                .get(0)
                .ok_or_else(|| missing(MARKET_PENETRATION_PCT))?,
            ev_2w_sales: matched
                .column(EV_2W_SALES)?
                .i64()?
                .get(0)
                .ok_or_else(|| missing(EV_2W_SALES))?,
        };

        debug!(?kpis, "summarized year");
        Ok(kpis)
    }
}

/// Format an integer with comma thousands separators ("1,500,000").
pub fn format_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        out.push('-');
    }
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Format a percentage with at least one decimal place ("7.5%", "7.0%").
pub fn format_percent(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{value:.1}%")
    } else {
        format!("{value}%")
    }
}
