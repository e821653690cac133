//! Market Table Module
//! Validated, immutable view of the EV market CSV.

use polars::prelude::*;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use super::loader::LoaderError;

pub const YEAR: &str = "Year";
pub const EV_2W_SALES: &str = "EV_2W_Sales";
pub const EV_3W_SALES: &str = "EV_3W_Sales";
pub const EV_4W_SALES: &str = "EV_4W_Sales";
pub const EV_BUS_SALES: &str = "EV_Bus_Sales";
pub const TOTAL_EV_SALES: &str = "Total_EV_Sales";
pub const MARKET_PENETRATION_PCT: &str = "EV_Market_Penetration_%";
pub const GOVT_POLICY: &str = "Govt_Policy";

/// Policy cell text meaning "no policy event this year".
pub const POLICY_SENTINEL: &str = "None";

/// Columns every input file must carry, in canonical order.
pub const REQUIRED_COLUMNS: [&str; 8] = [
    YEAR,
    EV_2W_SALES,
    EV_3W_SALES,
    EV_4W_SALES,
    EV_BUS_SALES,
    TOTAL_EV_SALES,
    MARKET_PENETRATION_PCT,
    GOVT_POLICY,
];

const SALES_COLUMNS: [&str; 5] = [
    EV_2W_SALES,
    EV_3W_SALES,
    EV_4W_SALES,
    EV_BUS_SALES,
    TOTAL_EV_SALES,
];

/// Vehicle segment, one per melt-able sales column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Segment {
    #[serde(rename = "EV_2W_Sales")]
    TwoWheeler,
    #[serde(rename = "EV_3W_Sales")]
    ThreeWheeler,
    #[serde(rename = "EV_4W_Sales")]
    FourWheeler,
    #[serde(rename = "EV_Bus_Sales")]
    Bus,
}

impl Segment {
    pub const ALL: [Segment; 4] = [
        Segment::TwoWheeler,
        Segment::ThreeWheeler,
        Segment::FourWheeler,
        Segment::Bus,
    ];

    pub fn column_name(self) -> &'static str {
        match self {
            Segment::TwoWheeler => EV_2W_SALES,
            Segment::ThreeWheeler => EV_3W_SALES,
            Segment::FourWheeler => EV_4W_SALES,
            Segment::Bus => EV_BUS_SALES,
        }
    }

    /// Short label used on the command line and in legends.
    pub fn label(self) -> &'static str {
        match self {
            Segment::TwoWheeler => "2W",
            Segment::ThreeWheeler => "3W",
            Segment::FourWheeler => "4W",
            Segment::Bus => "Bus",
        }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column_name())
    }
}

impl FromStr for Segment {
    type Err = String;

    /// Accepts either the CSV column name or the short label, case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Segment::ALL
            .into_iter()
            .find(|seg| {
                seg.column_name().eq_ignore_ascii_case(wanted)
                    || seg.label().eq_ignore_ascii_case(wanted)
            })
            .ok_or_else(|| {
                format!("unknown segment '{wanted}' (expected one of 2W, 3W, 4W, Bus)")
            })
    }
}

/// A dataset assumption that does not hold. Reported, never enforced.
#[derive(Debug, Clone, PartialEq)]
pub enum AuditFinding {
    DuplicateYear { year: i32 },
    YearsNotAscending { year: i32, previous: i32 },
    NegativeSales { column: &'static str, year: i32, value: i64 },
    PenetrationOutOfRange { year: i32, value: f64 },
    TotalMismatch { year: i32, total: i64, segment_sum: i64 },
}

impl fmt::Display for AuditFinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuditFinding::DuplicateYear { year } => write!(f, "year {year} appears more than once"),
            AuditFinding::YearsNotAscending { year, previous } => {
                write!(f, "year {year} follows {previous}")
            }
            AuditFinding::NegativeSales {
                column,
                year,
                value,
            } => write!(f, "{column} is negative ({value}) in {year}"),
            AuditFinding::PenetrationOutOfRange { year, value } => {
                write!(f, "market penetration {value}% in {year} is outside [0, 100]")
            }
            AuditFinding::TotalMismatch {
                year,
                total,
                segment_sum,
            } => write!(
                f,
                "total sales {total} in {year} differ from segment sum {segment_sum}"
            ),
        }
    }
}

/// Immutable market dataset with normalized column types.
///
/// Holds exactly the eight required columns: `Year` as Int32, the five sales
/// columns as Int64, penetration as Float64 and the policy text as String.
/// Numeric cells are guaranteed present; policy cells may be null.
#[derive(Debug, Clone)]
pub struct MarketTable {
    df: DataFrame,
}

impl MarketTable {
    /// Validate and normalize a raw frame.
    ///
    /// Extra columns are dropped. Fails on an empty frame, a missing column,
    /// non-numeric text in a numeric column or an absent numeric cell.
    pub fn try_from_dataframe(df: DataFrame) -> Result<Self, LoaderError> {
        if df.height() == 0 {
            return Err(LoaderError::Empty);
        }

        for name in REQUIRED_COLUMNS {
            if df.column(name).is_err() {
                return Err(LoaderError::MissingColumn {
                    column: name.to_string(),
                });
            }
        }

        let mut columns = Vec::with_capacity(REQUIRED_COLUMNS.len());
        columns.push(Self::numeric_column(&df, YEAR, DataType::Int32)?);
        for name in SALES_COLUMNS {
            columns.push(Self::numeric_column(&df, name, DataType::Int64)?);
        }
        columns.push(Self::numeric_column(
            &df,
            MARKET_PENETRATION_PCT,
            DataType::Float64,
        )?);

        let policy = df
            .column(GOVT_POLICY)?
            .as_materialized_series()
            .cast(&DataType::String)?;
        columns.push(Column::from(policy));

        Ok(Self {
            df: DataFrame::new(columns)?,
        })
    }

    fn numeric_column(df: &DataFrame, name: &str, dtype: DataType) -> Result<Column, LoaderError> {
        // Formatting a failed cast walks the values, which needs one chunk.
        let series = df.column(name)?.as_materialized_series().rechunk();
        let cast = series
            .strict_cast(&dtype)
            .map_err(|_| LoaderError::NonNumeric {
                column: name.to_string(),
            })?;

        let nulls = cast.is_null();
        if let Some(row) = nulls.into_iter().position(|v| v == Some(true)) {
            return Err(LoaderError::MissingValue {
                column: name.to_string(),
                row,
            });
        }

        Ok(Column::from(cast))
    }

    pub fn dataframe(&self) -> &DataFrame {
        &self.df
    }

    /// Number of rows (one per year).
    pub fn height(&self) -> usize {
        self.df.height()
    }

    /// Years in row order.
    pub fn years(&self) -> Vec<i32> {
        self.df
            .column(YEAR)
            .ok()
            .and_then(|col| col.i32().ok())
            .map(|ca| ca.into_iter().flatten().collect())
            .unwrap_or_default()
    }

    /// Smallest and largest year in the table.
    pub fn year_span(&self) -> Option<(i32, i32)> {
        let years = self.years();
        Some((*years.iter().min()?, *years.iter().max()?))
    }

    /// Check the assumptions the dashboard relies on but the source never
    /// enforces: unique ascending years, non-negative sales, penetration in
    /// `[0, 100]` and totals equal to the segment sum.
    pub fn audit(&self) -> Vec<AuditFinding> {
        let years = self.years();
        let mut findings = Vec::new();

        let mut seen = std::collections::HashSet::new();
        for (idx, &year) in years.iter().enumerate() {
            if !seen.insert(year) {
                findings.push(AuditFinding::DuplicateYear { year });
            }
            if idx > 0 && year < years[idx - 1] {
                findings.push(AuditFinding::YearsNotAscending {
                    year,
                    previous: years[idx - 1],
                });
            }
        }

        let sales: Vec<(&'static str, Vec<i64>)> = SALES_COLUMNS
            .iter()
            .map(|&name| (name, self.int_values(name)))
            .collect();

        for (name, values) in &sales {
            for (&year, &value) in years.iter().zip(values) {
                if value < 0 {
                    findings.push(AuditFinding::NegativeSales {
                        column: *name,
                        year,
                        value,
                    });
                }
            }
        }

        // Segment columns come first in SALES_COLUMNS, total last.
        if let Some(((_, totals), segments)) = sales.split_last() {
            for (row, (&year, &total)) in years.iter().zip(totals).enumerate() {
                let segment_sum: i64 = segments.iter().map(|(_, values)| values[row]).sum();
                if segment_sum != total {
                    findings.push(AuditFinding::TotalMismatch {
                        year,
                        total,
                        segment_sum,
                    });
                }
            }
        }

        let penetration = self
            .df
            .column(MARKET_PENETRATION_PCT)
            .ok()
            .and_then(|col| col.f64().ok())
            .map(|ca| ca.into_iter().flatten().collect::<Vec<f64>>())
            .unwrap_or_default();
        for (&year, &value) in years.iter().zip(&penetration) {
            if !(0.0..=100.0).contains(&value) {
                findings.push(AuditFinding::PenetrationOutOfRange { year, value });
            }
        }

        findings
    }

    fn int_values(&self, name: &str) -> Vec<i64> {
        self.df
            .column(name)
            .ok()
            .and_then(|col| col.i64().ok())
            .map(|ca| ca.into_iter().map(|v| v.unwrap_or(0)).collect())
            .unwrap_or_default()
    }
}
