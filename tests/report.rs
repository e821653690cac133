//! Tests for the assembled dashboard report.

mod common;

use common::fixture_table;
use ev_dashboard::metrics::SummaryError;
use ev_dashboard::report::{DashboardReport, MetricCard, ReportError};

#[test]
fn title_spans_the_data() {
    let report = DashboardReport::build(&fixture_table(), 2024).unwrap();
    assert_eq!(
        report.title(),
        "Indian Electric Vehicle Market Dashboard (2001 - 2024)"
    );
    assert_eq!(report.year_range(), "2001-2024");
}

#[test]
fn metric_cards_are_formatted() {
    let report = DashboardReport::build(&fixture_table(), 2024).unwrap();
    let card = |label: &str, value: &str| MetricCard {
        label: label.to_string(),
        value: value.to_string(),
    };

    assert_eq!(
        report.metric_cards(),
        [
            card("2024 EV Sales", "1,500,000"),
            card("Market Penetration (2024)", "7.5%"),
            card("2W Sales in 2024", "900,000"),
        ]
    );
}

#[test]
fn carries_every_chart_series() {
    let report = DashboardReport::build(&fixture_table(), 2019).unwrap();

    assert_eq!(report.kpis.year, 2019);
    assert_eq!(report.segment_sales.len(), 24 * 4);
    assert_eq!(report.total_sales.len(), 24);
    assert_eq!(report.penetration.len(), 24);
    assert_eq!(report.total_sales.last(), Some(&(2024, 1_500_000)));
    assert_eq!(report.penetration.last(), Some(&(2024, 7.5)));
    assert_eq!(report.policies.len(), 3);
}

#[test]
fn json_uses_column_names_for_series() {
    let report = DashboardReport::build(&fixture_table(), 2024).unwrap();
    let json: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();

    assert_eq!(json["kpis"]["total_ev_sales"], 1_500_000);
    assert_eq!(json["kpis"]["market_penetration_pct"], 7.5);
    assert_eq!(json["segment_sales"][0]["series"], "EV_2W_Sales");
    assert_eq!(json["segment_sales"][3]["series"], "EV_Bus_Sales");
    assert_eq!(json["policies"][2]["policy"], "PM E-DRIVE");
}

#[test]
fn unknown_year_fails_the_report() {
    let err = DashboardReport::build(&fixture_table(), 1999).unwrap_err();
    assert!(matches!(
        err,
        ReportError::Summary(SummaryError::RowNotFound { year: 1999 })
    ));
}

#[test]
fn whole_percent_keeps_a_decimal() {
    // 2004 sits at exactly 1%.
    let report = DashboardReport::build(&fixture_table(), 2004).unwrap();
    assert_eq!(report.metric_cards()[1].value, "1.0%");
}
