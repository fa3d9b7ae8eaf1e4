//! Detail table of the filtered rows, virtualised so only visible rows are laid out.

use crate::data::FilteredView;
use egui::{RichText, ScrollArea};

const ROW_HEIGHT: f32 = 20.0;
const TABLE_HEIGHT: f32 = 360.0;

fn column_width(column: &str) -> f32 {
    match column {
        "role" => 220.0,
        "country" | "experience" => 120.0,
        "contract_type" | "seniority" | "company_size" | "work_model" => 100.0,
        _ => 80.0,
    }
}

#[derive(Default)]
pub struct DataTable;

impl DataTable {
    pub fn new() -> Self {
        Self
    }

    pub fn show(&mut self, ui: &mut egui::Ui, view: &FilteredView) {
        let columns = view.columns();
        ScrollArea::horizontal().id_salt("detail_table_h").show(ui, |ui| {
            ui.vertical(|ui| {
                ui.horizontal(|ui| {
                    for &column in &columns {
                        ui.add_sized(
                            [column_width(column), ROW_HEIGHT],
                            egui::Label::new(RichText::new(column).strong()),
                        );
                    }
                });
                ui.separator();

                ScrollArea::vertical()
                    .id_salt("detail_table_v")
                    .max_height(TABLE_HEIGHT)
                    .show_rows(ui, ROW_HEIGHT, view.len(), |ui, rows| {
                        for row in rows {
                            ui.horizontal(|ui| {
                                for &column in &columns {
                                    ui.add_sized(
                                        [column_width(column), ROW_HEIGHT],
                                        egui::Label::new(view.cell(row, column)).truncate(),
                                    );
                                }
                            });
                        }
                    });
            });
        });
    }
}
