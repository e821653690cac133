//! Shared fixture: a 2001-2024 market table shaped like the real dataset.
#![allow(dead_code)]

use polars::prelude::*;
use std::io::Write;
use tempfile::NamedTempFile;

use ev_dashboard::data::{
    EV_2W_SALES, EV_3W_SALES, EV_4W_SALES, EV_BUS_SALES, GOVT_POLICY, MARKET_PENETRATION_PCT,
    TOTAL_EV_SALES, YEAR,
};
use ev_dashboard::MarketTable;

pub const HEADER: &str = "Year,EV_2W_Sales,EV_3W_Sales,EV_4W_Sales,EV_Bus_Sales,Total_EV_Sales,EV_Market_Penetration_%,Govt_Policy";

#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub year: i32,
    pub two_wheeler: i64,
    pub three_wheeler: i64,
    pub four_wheeler: i64,
    pub bus: i64,
    pub total: i64,
    pub penetration: f64,
    pub policy: Option<String>,
}

impl Row {
    pub fn new(year: i32, segments: [i64; 4], penetration: f64, policy: &str) -> Self {
        let [two_wheeler, three_wheeler, four_wheeler, bus] = segments;
        Self {
            year,
            two_wheeler,
            three_wheeler,
            four_wheeler,
            bus,
            total: segments.iter().sum(),
            penetration,
            policy: Some(policy.to_string()),
        }
    }

    /// Segment values in `Segment::ALL` order.
    pub fn segments(&self) -> [i64; 4] {
        [
            self.two_wheeler,
            self.three_wheeler,
            self.four_wheeler,
            self.bus,
        ]
    }
}

/// 24 rows, 2001 through 2024. Buses sell nothing before 2006.
/// 2024 is (900000, 400000, 190000, 10000), total 1500000, 7.5%.
pub fn fixture_rows() -> Vec<Row> {
    (2001..=2024)
        .map(|year| {
            if year == 2024 {
                return Row::new(year, [900_000, 400_000, 190_000, 10_000], 7.5, "PM E-DRIVE");
            }
            let step = i64::from(year - 2000);
            let bus = if year < 2006 { 0 } else { step * 10 };
            let policy = match year {
                2015 => "FAME I",
                2019 => "FAME II",
                _ => "None",
            };
            Row::new(
                year,
                [step * step * 1_000, step * 500, step * 100, bus],
                f64::from(year - 2000) * 0.25,
                policy,
            )
        })
        .collect()
}

pub fn frame_from_rows(rows: &[Row]) -> DataFrame {
    df!(
        YEAR => rows.iter().map(|r| r.year).collect::<Vec<_>>(),
        EV_2W_SALES => rows.iter().map(|r| r.two_wheeler).collect::<Vec<_>>(),
        EV_3W_SALES => rows.iter().map(|r| r.three_wheeler).collect::<Vec<_>>(),
        EV_4W_SALES => rows.iter().map(|r| r.four_wheeler).collect::<Vec<_>>(),
        EV_BUS_SALES => rows.iter().map(|r| r.bus).collect::<Vec<_>>(),
        TOTAL_EV_SALES => rows.iter().map(|r| r.total).collect::<Vec<_>>(),
        MARKET_PENETRATION_PCT => rows.iter().map(|r| r.penetration).collect::<Vec<_>>(),
        GOVT_POLICY => rows.iter().map(|r| r.policy.clone()).collect::<Vec<_>>(),
    )
    .unwrap()
}

pub fn table_from_rows(rows: &[Row]) -> MarketTable {
    MarketTable::try_from_dataframe(frame_from_rows(rows)).unwrap()
}

pub fn fixture_table() -> MarketTable {
    table_from_rows(&fixture_rows())
}

/// CSV text for `rows`, header included. A `None` policy is an empty cell.
pub fn csv_from_rows(rows: &[Row]) -> String {
    let mut text = String::from(HEADER);
    text.push('\n');
    for r in rows {
        text.push_str(&format!(
            "{},{},{},{},{},{},{},{}\n",
            r.year,
            r.two_wheeler,
            r.three_wheeler,
            r.four_wheeler,
            r.bus,
            r.total,
            r.penetration,
            r.policy.as_deref().unwrap_or("")
        ));
    }
    text
}

pub fn write_csv(contents: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}
