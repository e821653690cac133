//! Control Panel Widget
//! Left side panel with the data source, year selection and export controls.

use egui::{Color32, ComboBox, RichText};
use std::path::PathBuf;

/// User settings for the dashboard
#[derive(Debug, Clone)]
pub struct UserSettings {
    pub csv_path: String,
    pub target_year: Option<i32>,
    pub export_dir: String,
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            csv_path: crate::data::DEFAULT_DATA_PATH.to_string(),
            target_year: None,
            export_dir: "charts".to_string(),
        }
    }
}

/// Left side control panel with file selection and export controls.
pub struct ControlPanel {
    pub settings: UserSettings,
    pub years: Vec<i32>,
    pub status: String,
    pub export_enabled: bool,
}

impl Default for ControlPanel {
    fn default() -> Self {
        Self {
            settings: UserSettings::default(),
            years: Vec::new(),
            status: "Ready".to_string(),
            export_enabled: false,
        }
    }
}

impl ControlPanel {
    pub fn new(settings: UserSettings) -> Self {
        Self {
            settings,
            ..Self::default()
        }
    }

    /// Update available years after CSV load.
    ///
    /// Keeps the current selection when it still exists, otherwise prefers
    /// the default headline year and falls back to the latest year. Returns
    /// the previously selected year when it is not in the new table.
    pub fn update_years(&mut self, years: Vec<i32>) -> Option<i32> {
        let requested = self.settings.target_year;
        let selected = requested
            .filter(|year| years.contains(year))
            .or_else(|| {
                years
                    .contains(&crate::metrics::DEFAULT_TARGET_YEAR)
                    .then_some(crate::metrics::DEFAULT_TARGET_YEAR)
            })
            .or_else(|| years.iter().max().copied());

        self.settings.target_year = selected;
        self.years = years;
        requested.filter(|year| Some(*year) != selected)
    }

    pub fn csv_path(&self) -> PathBuf {
        PathBuf::from(self.settings.csv_path.trim())
    }

    pub fn export_dir(&self) -> PathBuf {
        PathBuf::from(self.settings.export_dir.trim())
    }

    /// Draw the control panel
    pub fn show(&mut self, ui: &mut egui::Ui, is_loading: bool) -> ControlPanelAction {
        let mut action = ControlPanelAction::None;

        // Title
        ui.vertical_centered(|ui| {
            ui.add_space(5.0);
            ui.label(
                RichText::new("🇮🇳 EV Market Dashboard")
                    .size(20.0)
                    .color(Color32::from_rgb(100, 149, 237)),
            );
            ui.label(
                RichText::new("Sales & Policy Explorer")
                    .size(11.0)
                    .color(Color32::GRAY),
            );
        });
        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        // ===== CSV File Section =====
        ui.label(RichText::new("📁 Data Source").size(14.0).strong());
        ui.add_space(5.0);

        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                ui.add(
                    egui::TextEdit::singleline(&mut self.settings.csv_path)
                        .desired_width(f32::INFINITY)
                        .hint_text("path/to/data.csv"),
                );
                ui.add_space(4.0);
                ui.add_enabled_ui(!is_loading, |ui| {
                    if ui.button("🔄 Load").clicked() {
                        action = ControlPanelAction::Reload;
                    }
                });
            });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Year Section =====
        ui.label(RichText::new("📅 Headline Year").size(14.0).strong());
        ui.add_space(5.0);

        let selected_text = self
            .settings
            .target_year
            .map(|year| year.to_string())
            .unwrap_or_else(|| "-".to_string());

        ComboBox::from_id_salt("target_year")
            .width(150.0)
            .selected_text(selected_text)
            .show_ui(ui, |ui| {
                for &year in self.years.iter().rev() {
                    if ui
                        .selectable_label(self.settings.target_year == Some(year), year.to_string())
                        .clicked()
                        && self.settings.target_year != Some(year)
                    {
                        self.settings.target_year = Some(year);
                        action = ControlPanelAction::YearChanged;
                    }
                }
            });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Export Section =====
        ui.label(RichText::new("🖼 Export Charts").size(14.0).strong());
        ui.add_space(5.0);

        ui.horizontal(|ui| {
            ui.label("Folder:");
            ui.text_edit_singleline(&mut self.settings.export_dir);
        });
        ui.add_space(5.0);

        ui.vertical_centered(|ui| {
            ui.add_enabled_ui(self.export_enabled, |ui| {
                let button = egui::Button::new(RichText::new("📄 Export SVG").size(14.0))
                    .min_size(egui::vec2(150.0, 30.0));
                if ui.add(button).clicked() {
                    action = ControlPanelAction::ExportCharts;
                }
            });
        });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Status Section =====
        ui.label(RichText::new("📊 Status").size(14.0).strong());
        ui.add_space(5.0);

        if is_loading {
            ui.add(egui::Spinner::new());
        }

        let status_color = if self.status.contains("Error") {
            Color32::from_rgb(220, 53, 69)
        } else if self.status.contains("not in data") {
            Color32::from_rgb(255, 193, 7)
        } else if self.status.starts_with("Loaded") || self.status.starts_with("Exported") {
            Color32::from_rgb(40, 167, 69)
        } else {
            Color32::GRAY
        };
        ui.label(RichText::new(&self.status).size(11.0).color(status_color));

        action
    }

    pub fn set_status(&mut self, status: impl Into<String>) {
        self.status = status.into();
    }
}

/// Actions triggered by control panel
#[derive(Debug, Clone, PartialEq)]
pub enum ControlPanelAction {
    None,
    Reload,
    YearChanged,
    ExportCharts,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_years_prefers_default_year() {
        let mut panel = ControlPanel::default();
        assert_eq!(panel.update_years((2001..=2024).collect()), None);
        assert_eq!(panel.settings.target_year, Some(2024));
    }

    #[test]
    fn update_years_falls_back_to_latest() {
        let mut panel = ControlPanel::default();
        assert_eq!(panel.update_years(vec![2010, 2015, 2012]), None);
        assert_eq!(panel.settings.target_year, Some(2015));
    }

    #[test]
    fn update_years_keeps_existing_selection() {
        let mut panel = ControlPanel::default();
        panel.settings.target_year = Some(2019);
        assert_eq!(panel.update_years((2001..=2024).collect()), None);
        assert_eq!(panel.settings.target_year, Some(2019));
    }

    #[test]
    fn update_years_reports_a_missing_selection() {
        let mut panel = ControlPanel::default();
        panel.settings.target_year = Some(1999);
        assert_eq!(panel.update_years((2001..=2024).collect()), Some(1999));
        assert_eq!(panel.settings.target_year, Some(2024));

        assert_eq!(panel.update_years(vec![2001, 2002]), Some(2024));
        assert_eq!(panel.settings.target_year, Some(2002));
    }
}
