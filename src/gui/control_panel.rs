//! Control Panel Widget
//! Left side panel with the four filter dimensions and export buttons.

use crate::data::{Dimension, FilterOptions, FilterSelection};
use crate::stats::format_count;
use egui::{Color32, RichText};

/// Left side control panel.
pub struct ControlPanel {
    pub status: String,
}

impl Default for ControlPanel {
    fn default() -> Self {
        Self {
            status: "Ready".to_string(),
        }
    }
}

impl ControlPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draw the control panel
    pub fn show(
        &mut self,
        ui: &mut egui::Ui,
        options: &FilterOptions,
        selection: &FilterSelection,
        total_rows: usize,
    ) -> ControlPanelAction {
        let mut action = ControlPanelAction::None;

        ui.add_space(5.0);
        ui.label(RichText::new("🔍 Filters").size(20.0).strong());
        ui.label(
            RichText::new(format!("{} records loaded", format_count(total_rows)))
                .size(11.0)
                .color(Color32::GRAY),
        );
        ui.add_space(8.0);
        ui.separator();

        for dim in Dimension::ALL {
            let labels = options.labels(dim);
            let header = format!(
                "{} ({}/{})",
                dim.label(),
                selection.selected_count(dim),
                labels.len()
            );

            egui::CollapsingHeader::new(RichText::new(header).size(14.0).strong())
                .id_salt(dim.label())
                .default_open(true)
                .show(ui, |ui| {
                    ui.horizontal(|ui| {
                        if ui.small_button("All").clicked() {
                            action = ControlPanelAction::SelectionChanged(
                                selection.with_all(dim, options),
                            );
                        }
                        if ui.small_button("None").clicked() {
                            action = ControlPanelAction::SelectionChanged(selection.with_none(dim));
                        }
                    });

                    for label in &labels {
                        let mut checked = selection.contains(dim, label);
                        if ui.checkbox(&mut checked, label.as_str()).changed() {
                            action = ControlPanelAction::SelectionChanged(
                                selection.with_value(dim, label, checked),
                            );
                        }
                    }
                });
            ui.add_space(4.0);
        }

        ui.separator();
        ui.add_space(10.0);

        // ===== Export Buttons =====
        ui.label(RichText::new("💾 Export").size(14.0).strong());
        ui.add_space(5.0);
        ui.horizontal(|ui| {
            if ui.button("CSV").on_hover_text("Save the filtered rows").clicked() {
                action = ControlPanelAction::ExportCsv;
            }
            if ui.button("PNG").on_hover_text("Save the four charts").clicked() {
                action = ControlPanelAction::ExportPng;
            }
        });

        ui.add_space(10.0);
        let status_color = if self.status.starts_with("Error") {
            Color32::from_rgb(220, 53, 69)
        } else {
            Color32::GRAY
        };
        ui.label(RichText::new(&self.status).size(11.0).color(status_color));

        action
    }

    pub fn set_status(&mut self, status: &str) {
        self.status = status.to_string();
    }
}

/// Actions triggered by control panel
#[derive(Debug, Clone, PartialEq)]
pub enum ControlPanelAction {
    None,
    SelectionChanged(FilterSelection),
    ExportCsv,
    ExportPng,
}
