//! Metrics module - headline KPIs and their display formatting

mod calculator;

pub use calculator::{
    format_percent, format_thousands, KpiCalculator, KpiSet, SummaryError, DEFAULT_TARGET_YEAR,
};
