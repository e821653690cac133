//! Tests for the policy timeline filter.

mod common;

use common::{fixture_table, table_from_rows, Row};
use ev_dashboard::data::{DataProcessor, PolicyEvent, POLICY_SENTINEL};
use proptest::prelude::*;

fn rows_with_policies(policies: &[Option<&str>]) -> Vec<Row> {
    policies
        .iter()
        .enumerate()
        .map(|(i, policy)| {
            let mut row = Row::new(2001 + i as i32, [1, 1, 1, 1], 0.1, "None");
            row.policy = policy.map(str::to_string);
            row
        })
        .collect()
}

fn event(year: i32, policy: &str) -> PolicyEvent {
    PolicyEvent {
        year,
        policy: policy.to_string(),
    }
}

#[test]
fn fixture_has_three_policy_years() {
    let events = DataProcessor::policy_timeline(&fixture_table()).unwrap();
    assert_eq!(
        events,
        vec![
            event(2015, "FAME I"),
            event(2019, "FAME II"),
            event(2024, "PM E-DRIVE"),
        ]
    );
}

#[test]
fn all_sentinel_gives_an_empty_timeline() {
    let table = table_from_rows(&rows_with_policies(&[Some("None"); 5]));
    assert!(DataProcessor::policy_timeline(&table).unwrap().is_empty());
}

#[test]
fn null_and_blank_cells_are_not_policies() {
    let table = table_from_rows(&rows_with_policies(&[
        None,
        Some(""),
        Some("   "),
        Some("EV Policy 2020"),
    ]));
    assert_eq!(
        DataProcessor::policy_timeline(&table).unwrap(),
        vec![event(2004, "EV Policy 2020")]
    );
}

#[test]
fn sentinel_match_is_exact() {
    let table = table_from_rows(&rows_with_policies(&[
        Some("none"),
        Some("None "),
        Some(POLICY_SENTINEL),
    ]));
    let events = DataProcessor::policy_timeline(&table).unwrap();

    assert_eq!(events, vec![event(2001, "none"), event(2002, "None ")]);
}

#[test]
fn policy_text_is_returned_as_stored() {
    let table = table_from_rows(&rows_with_policies(&[Some("  FAME II, phase 2 ")]));
    let events = DataProcessor::policy_timeline(&table).unwrap();
    assert_eq!(events[0].policy, "  FAME II, phase 2 ");
}

fn arb_policy() -> impl Strategy<Value = Option<&'static str>> {
    prop::sample::select(vec![
        Some("None"),
        Some("None"),
        Some("FAME I"),
        Some("FAME II"),
        Some("State subsidy"),
        Some(""),
        None,
    ])
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn keeps_exactly_the_policy_rows_in_year_order(
        policies in prop::collection::vec(arb_policy(), 0..30)
    ) {
        let table_rows = rows_with_policies(&policies);
        if table_rows.is_empty() {
            return Ok(());
        }
        let events = DataProcessor::policy_timeline(&table_from_rows(&table_rows)).unwrap();

        let expected: Vec<PolicyEvent> = table_rows
            .iter()
            .filter_map(|row| match row.policy.as_deref() {
                Some(p) if p != POLICY_SENTINEL && !p.trim().is_empty() => Some(event(row.year, p)),
                _ => None,
            })
            .collect();
        prop_assert_eq!(&events, &expected);
        prop_assert!(events.windows(2).all(|pair| pair[0].year < pair[1].year));
    }
}
