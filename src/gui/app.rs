//! EV Dashboard Main Application
//! Main window with control panel and dashboard view.

use egui::SidePanel;
use std::sync::mpsc::{channel, Receiver};
use std::sync::Arc;
use std::thread;
use tracing::{error, info, warn};

use crate::charts::{StaticChartRenderer, DEFAULT_CHART_SIZE};
use crate::data::{read_market_csv, DataLoader, MarketTable};
use crate::gui::{ControlPanel, ControlPanelAction, DashboardView, UserSettings};
use crate::report::DashboardReport;

/// CSV loading result from background thread
enum LoadResult {
    Complete(Arc<MarketTable>),
    Error(String),
}

fn year_fallback_status(requested: i32, shown: i32) -> String {
    format!("Year {requested} not in data, showing {shown}")
}

/// Main application window.
pub struct DashboardApp {
    loader: DataLoader,
    control_panel: ControlPanel,
    dashboard_view: DashboardView,

    // Async CSV loading
    load_rx: Option<Receiver<LoadResult>>,
    is_loading: bool,
}

impl DashboardApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, loader: DataLoader, year: Option<i32>) -> Self {
        let settings = UserSettings {
            csv_path: loader.file_path().display().to_string(),
            target_year: year,
            ..UserSettings::default()
        };

        let mut app = Self {
            loader,
            control_panel: ControlPanel::new(settings),
            dashboard_view: DashboardView::new(),
            load_rx: None,
            is_loading: false,
        };
        app.start_loading();
        app
    }

    /// Read the CSV in a background thread. A cached table is reused.
    fn start_loading(&mut self) {
        if self.is_loading {
            return;
        }

        self.loader.set_file_path(self.control_panel.csv_path());
        if let Some(table) = self.loader.cached() {
            self.apply_table(table);
            return;
        }

        self.dashboard_view.clear();
        self.control_panel.export_enabled = false;
        self.control_panel.set_status("Loading CSV file...");
        self.is_loading = true;

        let (tx, rx) = channel();
        self.load_rx = Some(rx);
        let path = self.loader.file_path().to_path_buf();

        thread::spawn(move || {
            let result = match read_market_csv(&path) {
                Ok(table) => LoadResult::Complete(Arc::new(table)),
                Err(e) => LoadResult::Error(e.to_string()),
            };
            let _ = tx.send(result);
        });
    }

    /// Check for CSV loading results
    fn check_load_results(&mut self) {
        let Some(rx) = self.load_rx.take() else {
            return;
        };

        match rx.try_recv() {
            Ok(LoadResult::Complete(table)) => {
                self.is_loading = false;
                self.loader.set_table(Arc::clone(&table));
                self.apply_table(table);
            }
            Ok(LoadResult::Error(e)) => {
                self.is_loading = false;
                error!(error = %e, "CSV load failed");
                self.control_panel.set_status(format!("Error: {e}"));
            }
            Err(std::sync::mpsc::TryRecvError::Empty) => self.load_rx = Some(rx),
            Err(std::sync::mpsc::TryRecvError::Disconnected) => {
                self.is_loading = false;
                self.control_panel
                    .set_status("Error: loader thread stopped unexpectedly");
            }
        }
    }

    fn apply_table(&mut self, table: Arc<MarketTable>) {
        let missing = self.control_panel.update_years(table.years());
        self.refresh_report();

        if let (Some(missing), Some(shown)) = (missing, self.control_panel.settings.target_year) {
            if self.dashboard_view.report.is_some() {
                warn!(requested = missing, shown, "year not in dataset, showing another");
                self.control_panel
                    .set_status(year_fallback_status(missing, shown));
            }
        }
    }

    /// Rebuild the report for the selected year from the cached table.
    fn refresh_report(&mut self) {
        let Some(table) = self.loader.cached() else {
            return;
        };
        let Some(year) = self.control_panel.settings.target_year else {
            self.dashboard_view.clear();
            self.control_panel.export_enabled = false;
            self.control_panel.set_status("Error: dataset has no years");
            return;
        };

        match DashboardReport::build(&table, year) {
            Ok(report) => {
                self.dashboard_view.set_report(report);
                self.control_panel.export_enabled = true;
                self.control_panel
                    .set_status(format!("Loaded {} rows, showing {}", table.height(), year));
            }
            Err(e) => {
                self.dashboard_view.clear();
                self.control_panel.export_enabled = false;
                self.control_panel.set_status(format!("Error: {e}"));
            }
        }
    }

    /// Write the SVG charts and open the folder.
    fn handle_export(&mut self) {
        let Some(report) = &self.dashboard_view.report else {
            self.control_panel.set_status("No charts to export");
            return;
        };

        let dir = self.control_panel.export_dir();
        match StaticChartRenderer::export_all(report, &dir, DEFAULT_CHART_SIZE) {
            Ok(written) => {
                self.control_panel
                    .set_status(format!("Exported {} charts to {}", written.len(), dir.display()));
                if let Err(e) = open::that(&dir) {
                    info!(error = %e, dir = %dir.display(), "could not open export folder");
                }
            }
            Err(e) => {
                error!(error = %e, "chart export failed");
                self.control_panel.set_status(format!("Error: {e}"));
            }
        }
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.check_load_results();

        if self.is_loading {
            ctx.request_repaint();
        }

        // Left panel - Control Panel
        SidePanel::left("control_panel")
            .min_width(260.0)
            .max_width(320.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    match self.control_panel.show(ui, self.is_loading) {
                        ControlPanelAction::Reload => {
                            // An explicit reload always re-reads the file.
                            self.loader.invalidate();
                            self.start_loading();
                        }
                        ControlPanelAction::YearChanged => self.refresh_report(),
                        ControlPanelAction::ExportCharts => self.handle_export(),
                        ControlPanelAction::None => {}
                    }
                });
            });

        // Central panel - Dashboard
        egui::CentralPanel::default().show(ctx, |ui| {
            self.dashboard_view.show(ui);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_status_names_both_years() {
        assert_eq!(
            year_fallback_status(1999, 2024),
            "Year 1999 not in data, showing 2024"
        );
    }
}
