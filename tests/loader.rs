//! Tests for CSV loading, validation and the memoizing loader.

mod common;

use std::sync::Arc;

use common::{csv_from_rows, fixture_rows, write_csv, HEADER};
use ev_dashboard::data::{
    read_market_csv, DataLoader, LoaderError, GOVT_POLICY, REQUIRED_COLUMNS, TOTAL_EV_SALES,
};
use ev_dashboard::metrics::KpiCalculator;

#[test]
fn loads_a_well_formed_csv() {
    let file = write_csv(&csv_from_rows(&fixture_rows()));
    let table = read_market_csv(file.path()).unwrap();

    assert_eq!(table.height(), 24);
    assert_eq!(table.years(), (2001..=2024).collect::<Vec<_>>());
    assert_eq!(table.year_span(), Some((2001, 2024)));
    assert!(table.audit().is_empty(), "{:?}", table.audit());

    let kpis = KpiCalculator::summarize(&table, 2024).unwrap();
    assert_eq!(kpis.total_ev_sales, 1_500_000);
    assert_eq!(kpis.market_penetration_pct, 7.5);
}

#[test]
fn missing_file_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let err = read_market_csv(&dir.path().join("absent.csv")).unwrap_err();
    assert!(matches!(err, LoaderError::FileNotFound { .. }), "{err}");
}

#[test]
fn missing_column_is_rejected() {
    let csv = csv_from_rows(&fixture_rows())
        .lines()
        .map(|line| line.rsplit_once(',').map_or(line, |(head, _)| head).to_string())
        .collect::<Vec<_>>()
        .join("\n");
    let file = write_csv(&csv);

    match read_market_csv(file.path()) {
        Err(LoaderError::MissingColumn { column }) => assert_eq!(column, GOVT_POLICY),
        other => panic!("expected MissingColumn, got {other:?}"),
    }
}

#[test]
fn non_numeric_sales_are_rejected() {
    let csv = format!(
        "{HEADER}\n2023,10,abc,30,0,40,1.5,None\n2024,900000,400000,190000,10000,1500000,7.5,None\n"
    );
    let file = write_csv(&csv);

    match read_market_csv(file.path()) {
        Err(LoaderError::NonNumeric { column }) => assert_eq!(column, "EV_3W_Sales"),
        other => panic!("expected NonNumeric, got {other:?}"),
    }
}

#[test]
fn blank_numeric_cell_is_rejected() {
    let csv = format!(
        "{HEADER}\n2022,1,1,1,1,4,0.5,None\n2023,1,1,1,1,4,0.5,None\n2024,1,1,1,1,,0.5,None\n"
    );
    let file = write_csv(&csv);

    match read_market_csv(file.path()) {
        Err(LoaderError::MissingValue { column, row }) => {
            assert_eq!(column, TOTAL_EV_SALES);
            assert_eq!(row, 2);
        }
        other => panic!("expected MissingValue, got {other:?}"),
    }
}

#[test]
fn header_only_is_empty() {
    let file = write_csv(&format!("{HEADER}\n"));
    let err = read_market_csv(file.path()).unwrap_err();
    assert!(matches!(err, LoaderError::Empty), "{err}");
}

#[test]
fn extra_columns_are_ignored() {
    let csv = csv_from_rows(&fixture_rows())
        .lines()
        .enumerate()
        .map(|(i, line)| {
            if i == 0 {
                format!("{line},Source")
            } else {
                format!("{line},estimate")
            }
        })
        .collect::<Vec<_>>()
        .join("\n");
    let file = write_csv(&csv);

    let table = read_market_csv(file.path()).unwrap();
    assert_eq!(table.dataframe().width(), REQUIRED_COLUMNS.len());
}

#[test]
fn inconsistent_rows_load_with_findings() {
    // Total does not match the segment sum; the row is still loaded.
    let csv = format!("{HEADER}\n2024,1,1,1,1,99,0.5,None\n");
    let file = write_csv(&csv);

    let table = read_market_csv(file.path()).unwrap();
    assert_eq!(table.audit().len(), 1);
}

#[test]
fn loader_reads_once() {
    let file = write_csv(&csv_from_rows(&fixture_rows()));
    let path = file.path().to_path_buf();
    let mut loader = DataLoader::new(&path);
    assert!(loader.cached().is_none());

    let first = loader.table().unwrap();
    file.close().unwrap();
    assert!(!path.exists());

    let second = loader.table().unwrap();
    assert!(Arc::ptr_eq(&first, &second));

    // Same path: cache survives.
    loader.set_file_path(&path);
    assert!(loader.cached().is_some());

    loader.invalidate();
    assert!(matches!(
        loader.table(),
        Err(LoaderError::FileNotFound { .. })
    ));
}

#[test]
fn changing_the_path_drops_the_cache() {
    let file = write_csv(&csv_from_rows(&fixture_rows()));
    let mut loader = DataLoader::new(file.path());
    loader.table().unwrap();

    loader.set_file_path("elsewhere.csv");
    assert!(loader.cached().is_none());
}
