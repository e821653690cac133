//! Dashboard View Widget
//! Central scrollable page: title, metric cards, three charts, policy table.

use egui::{Color32, RichText, ScrollArea};

use crate::charts::ChartPlotter;
use crate::report::{DashboardReport, MetricCard, FOOTER};

const CHART_HEIGHT: f32 = 320.0;
const SECTION_SPACING: f32 = 18.0;

/// Scrollable dashboard page for the current report.
#[derive(Default)]
pub struct DashboardView {
    pub report: Option<DashboardReport>,
}

impl DashboardView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.report = None;
    }

    pub fn set_report(&mut self, report: DashboardReport) {
        self.report = Some(report);
    }

    pub fn show(&self, ui: &mut egui::Ui) {
        let Some(report) = &self.report else {
            ui.centered_and_justified(|ui| {
                ui.label(RichText::new("No Data").size(20.0));
            });
            return;
        };

        ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.heading(RichText::new(format!("🇮🇳 {}", report.title())).size(24.0));
                ui.add_space(SECTION_SPACING);

                Self::section_header(ui, "📊 Key Metrics");
                ui.columns(3, |columns| {
                    for (column, card) in columns.iter_mut().zip(report.metric_cards()) {
                        Self::draw_metric_card(column, &card);
                    }
                });
                ui.add_space(SECTION_SPACING);

                Self::section_header(ui, "📈 EV Sales Over Time");
                ChartPlotter::draw_segment_sales(ui, report, CHART_HEIGHT);
                ui.add_space(SECTION_SPACING);

                Self::section_header(ui, "📊 Total EV Sales Growth");
                ChartPlotter::draw_total_sales(ui, report, CHART_HEIGHT);
                ui.add_space(SECTION_SPACING);

                Self::section_header(ui, "📉 EV Market Penetration");
                ChartPlotter::draw_penetration(ui, report, CHART_HEIGHT);
                ui.add_space(SECTION_SPACING);

                Self::section_header(ui, "📌 Government Policies Timeline");
                ChartPlotter::draw_policy_table(ui, &report.policies);
                ui.add_space(SECTION_SPACING);

                ui.separator();
                ui.label(RichText::new(FOOTER).size(11.0).color(Color32::GRAY));
            });
    }

    fn section_header(ui: &mut egui::Ui, title: &str) {
        ui.label(RichText::new(title).size(18.0).strong());
        ui.add_space(6.0);
    }

    fn draw_metric_card(ui: &mut egui::Ui, card: &MetricCard) {
        egui::Frame::none()
            .rounding(8.0)
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .inner_margin(12.0)
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.label(RichText::new(&card.label).size(13.0).color(Color32::GRAY));
                ui.label(RichText::new(&card.value).size(26.0).strong());
            });
    }
}
