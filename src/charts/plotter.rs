//! Chart Plotter Module
//! Draws the interactive dashboard charts using egui_plot.

use egui::{Color32, RichText};
use egui_plot::{Bar, BarChart, Legend, Line, Plot, PlotPoints};

use crate::data::{
    DataProcessor, PolicyEvent, GOVT_POLICY, MARKET_PENETRATION_PCT, TOTAL_EV_SALES, YEAR,
};
use crate::metrics::format_thousands;
use crate::report::DashboardReport;

use super::{segment_color, PENETRATION_COLOR, TOTAL_COLOR};

fn color32((r, g, b): (u8, u8, u8)) -> Color32 {
    Color32::from_rgb(r, g, b)
}

/// Creates the dashboard visualizations using egui_plot.
pub struct ChartPlotter;

impl ChartPlotter {
    /// Line chart: one line per vehicle segment.
    pub fn draw_segment_sales(ui: &mut egui::Ui, report: &DashboardReport, height: f32) {
        let series = DataProcessor::series_by_segment(&report.segment_sales);

        Plot::new("segment_sales")
            .height(height)
            .legend(Legend::default())
            .allow_scroll(false)
            .x_axis_label("Year")
            .y_axis_label("Sales")
            .x_axis_formatter(|mark, _range| format!("{:.0}", mark.value))
            .y_axis_formatter(|mark, _range| format_thousands(mark.value.round() as i64))
            .show(ui, |plot_ui| {
                for (segment, values) in &series {
                    let points: PlotPoints = values
                        .iter()
                        .map(|&(year, value)| [year as f64, value as f64])
                        .collect();

                    plot_ui.line(
                        Line::new(points)
                            .color(color32(segment_color(*segment as usize)))
                            .width(2.0)
                            .name(segment.column_name()),
                    );
                }
            });
    }

    /// Area chart of yearly total sales.
    pub fn draw_total_sales(ui: &mut egui::Ui, report: &DashboardReport, height: f32) {
        Plot::new("total_sales")
            .height(height)
            .allow_scroll(false)
            .x_axis_label("Year")
            .y_axis_label("Total Sales")
            .include_y(0.0)
            .x_axis_formatter(|mark, _range| format!("{:.0}", mark.value))
            .y_axis_formatter(|mark, _range| format_thousands(mark.value.round() as i64))
            .show(ui, |plot_ui| {
                let points: PlotPoints = report
                    .total_sales
                    .iter()
                    .map(|&(year, total)| [year as f64, total as f64])
                    .collect();

                plot_ui.line(
                    Line::new(points)
                        .color(color32(TOTAL_COLOR))
                        .width(2.0)
                        .fill(0.0)
                        .name(TOTAL_EV_SALES),
                );
            });
    }

    /// Bar chart of market penetration per year.
    pub fn draw_penetration(ui: &mut egui::Ui, report: &DashboardReport, height: f32) {
        Plot::new("market_penetration")
            .height(height)
            .allow_scroll(false)
            .x_axis_label("Year")
            .y_axis_label("Market Share (%)")
            .include_y(0.0)
            .x_axis_formatter(|mark, _range| format!("{:.0}", mark.value))
            .show(ui, |plot_ui| {
                let bars: Vec<Bar> = report
                    .penetration
                    .iter()
                    .map(|&(year, share)| Bar::new(year as f64, share).width(0.8))
                    .collect();

                plot_ui.bar_chart(
                    BarChart::new(bars)
                        .color(color32(PENETRATION_COLOR))
                        .name(MARKET_PENETRATION_PCT),
                );
            });
    }

    /// Two-column policy timeline table.
    pub fn draw_policy_table(ui: &mut egui::Ui, policies: &[PolicyEvent]) {
        if policies.is_empty() {
            ui.label(RichText::new("No policy events recorded").color(Color32::GRAY));
            return;
        }

        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                egui::Grid::new("policy_timeline")
                    .striped(true)
                    .min_col_width(60.0)
                    .spacing([16.0, 4.0])
                    .show(ui, |ui| {
                        ui.label(RichText::new(YEAR).strong());
                        ui.label(RichText::new(GOVT_POLICY).strong());
                        ui.end_row();

                        for event in policies {
                            ui.label(event.year.to_string());
                            ui.label(event.policy.as_str());
                            ui.end_row();
                        }
                    });
            });
    }
}
