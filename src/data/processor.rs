//! Data Processor Module
//! Reshapes the market table into chart-ready series and the policy timeline.

use polars::prelude::*;
use serde::Serialize;
use std::collections::BTreeMap;
use thiserror::Error;
use tracing::debug;

use super::table::{
    MarketTable, Segment, GOVT_POLICY, MARKET_PENETRATION_PCT, POLICY_SENTINEL, TOTAL_EV_SALES,
    YEAR,
};

#[derive(Error, Debug)]
pub enum ProcessorError {
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
    #[error("Column '{column}' has no value at row {row}")]
    MissingValue { column: &'static str, row: usize },
}

/// One (year, series, value) row of the long-format table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SeriesPoint {
    pub year: i32,
    pub series: Segment,
    pub value: i64,
}

/// A year with a government policy event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PolicyEvent {
    pub year: i32,
    pub policy: String,
}

/// Handles data reshaping and filtering operations.
pub struct DataProcessor;

impl DataProcessor {
    /// Melt the requested segment columns into long format.
    ///
    /// Years outer, segments inner, in row order and then request order.
    /// Always yields `rows * segments.len()` points; zero sales are kept.
    pub fn to_long_form(
        table: &MarketTable,
        segments: &[Segment],
    ) -> Result<Vec<SeriesPoint>, ProcessorError> {
        let df = table.dataframe();
        let years = df.column(YEAR)?.i32()?;

        let value_columns = segments
            .iter()
            .map(|&segment| Ok((segment, df.column(segment.column_name())?.i64()?)))
            .collect::<PolarsResult<Vec<_>>>()?;

        let mut points = Vec::with_capacity(df.height() * segments.len());
        for (row, year) in years.into_iter().enumerate() {
            let year = year.ok_or(ProcessorError::MissingValue { column: YEAR, row })?;

            for (segment, values) in &value_columns {
                let value = values.get(row).ok_or(ProcessorError::MissingValue {
                    column: segment.column_name(),
                    row,
                })?;
                points.push(SeriesPoint {
                    year,
                    series: *segment,
                    value,
                });
            }
        }

        debug!(
            rows = df.height(),
            segments = segments.len(),
            points = points.len(),
            "reshaped to long form"
        );
        Ok(points)
    }

    /// Group long-format points back into one year-ordered series per segment.
    pub fn series_by_segment(points: &[SeriesPoint]) -> BTreeMap<Segment, Vec<(i32, i64)>> {
        let mut grouped: BTreeMap<Segment, Vec<(i32, i64)>> = BTreeMap::new();
        for point in points {
            grouped
                .entry(point.series)
                .or_default()
                .push((point.year, point.value));
        }
        for series in grouped.values_mut() {
            series.sort_by_key(|&(year, _)| year);
        }
        grouped
    }

    /// Rows that carry a government policy, in table order.
    ///
    /// The sentinel text, null cells and whitespace-only cells all mean
    /// "no policy". The sentinel match is exact and case-sensitive.
    pub fn policy_timeline(table: &MarketTable) -> Result<Vec<PolicyEvent>, ProcessorError> {
        let filtered = table
            .dataframe()
            .clone()
            .lazy()
            .select([col(YEAR), col(GOVT_POLICY)])
            .filter(
                col(GOVT_POLICY)
                    .is_not_null()
                    .and(col(GOVT_POLICY).neq(lit(POLICY_SENTINEL))),
            )
            .collect()?;

        let years = filtered.column(YEAR)?.i32()?;
        let policies = filtered.column(GOVT_POLICY)?.str()?;

        let events: Vec<PolicyEvent> = years
            .into_iter()
            .zip(policies.into_iter())
            .filter_map(|(year, policy)| match (year, policy) {
                (Some(year), Some(policy)) if !policy.trim().is_empty() => Some(PolicyEvent {
                    year,
                    policy: policy.to_string(),
                }),
                _ => None,
            })
            .collect();

        debug!(
            rows = table.height(),
            events = events.len(),
            "filtered policy timeline"
        );
        Ok(events)
    }

    /// (year, total sales) pairs for the area chart.
    pub fn total_sales_series(table: &MarketTable) -> Result<Vec<(i32, i64)>, ProcessorError> {
        let df = table.dataframe();
        let years = df.column(YEAR)?.i32()?;
        let totals = df.column(TOTAL_EV_SALES)?.i64()?;

        years
            .into_iter()
            .zip(totals.into_iter())
            .enumerate()
            .map(|(row, pair)| match pair {
                (Some(year), Some(total)) => Ok((year, total)),
                (None, _) => Err(ProcessorError::MissingValue { column: YEAR, row }),
                (_, None) => Err(ProcessorError::MissingValue {
                    column: TOTAL_EV_SALES,
                    row,
                }),
            })
            .collect()
    }

    /// (year, market penetration %) pairs for the bar chart.
    pub fn penetration_series(table: &MarketTable) -> Result<Vec<(i32, f64)>, ProcessorError> {
        let df = table.dataframe();
        let years = df.column(YEAR)?.i32()?;
        let shares = df.column(MARKET_PENETRATION_PCT)?.f64()?;

        years
            .into_iter()
            .zip(shares.into_iter())
            .enumerate()
            .map(|(row, pair)| match pair {
                (Some(year), Some(share)) => Ok((year, share)),
                (None, _) => Err(ProcessorError::MissingValue { column: YEAR, row }),
                (_, None) => Err(ProcessorError::MissingValue {
                    column: MARKET_PENETRATION_PCT,
                    row,
                }),
            })
            .collect()
    }
}
