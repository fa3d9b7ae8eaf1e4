//! Chart Viewer Widget
//! Central scrollable panel: headline KPIs, the four chart regions and the
//! detail table.

use crate::charts::ChartPlotter;
use crate::data::FilteredView;
use crate::gui::DataTable;
use crate::stats::{format_count, format_usd, ChartState, DashboardSnapshot, Kpis};
use egui::{Color32, RichText, ScrollArea};

const CARD_SPACING: f32 = 15.0;

/// Central dashboard area.
pub struct ChartViewer {
    /// Role used by the per-country chart title.
    pub spotlight_role: String,
    table: DataTable,
}

impl ChartViewer {
    pub fn new(spotlight_role: &str) -> Self {
        Self {
            spotlight_role: spotlight_role.to_string(),
            table: DataTable::new(),
        }
    }

    pub fn show(&mut self, ui: &mut egui::Ui, snapshot: &DashboardSnapshot, view: &FilteredView) {
        ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.label(RichText::new("🎲 Data Salaries Dashboard").size(26.0).strong());
                ui.label(
                    "Explore salary data for data roles across recent years. \
                     Use the filters on the left to refine the view.",
                );
                ui.add_space(CARD_SPACING);

                ui.label(
                    RichText::new("Key Metrics (Annual Salary in USD)")
                        .size(18.0)
                        .strong(),
                );
                ui.add_space(6.0);
                Self::draw_kpis(ui, &snapshot.kpis);

                ui.add_space(CARD_SPACING);
                ui.separator();
                ui.label(RichText::new("Charts").size(18.0).strong());
                ui.add_space(6.0);

                ui.columns(2, |cols| {
                    Self::chart_card(
                        &mut cols[0],
                        "Top 10 roles by average salary",
                        &snapshot.top_roles,
                        |ui, d| ChartPlotter::draw_top_roles(ui, d),
                    );
                    Self::chart_card(
                        &mut cols[1],
                        "Distribution of annual salaries",
                        &snapshot.histogram,
                        |ui, d| ChartPlotter::draw_histogram(ui, d),
                    );
                });
                ui.add_space(CARD_SPACING);

                let map_title = format!("Average {} salary by country", self.spotlight_role);
                ui.columns(2, |cols| {
                    Self::chart_card(
                        &mut cols[0],
                        "Work model proportion",
                        &snapshot.work_models,
                        |ui, d| ChartPlotter::draw_work_models(ui, d),
                    );
                    Self::chart_card(&mut cols[1], &map_title, &snapshot.countries, |ui, d| {
                        ChartPlotter::draw_countries(ui, d)
                    });
                });

                ui.add_space(CARD_SPACING);
                ui.separator();
                ui.label(RichText::new("Detailed Data").size(18.0).strong());
                ui.add_space(6.0);
                self.table.show(ui, view);
            });
    }

    fn draw_kpis(ui: &mut egui::Ui, kpis: &Kpis) {
        let cards = [
            ("Average salary", format_usd(kpis.average_usd)),
            ("Max salary", format_usd(kpis.max_usd)),
            ("Total records", format_count(kpis.record_count)),
            ("Most common role", kpis.most_common_role.clone()),
        ];

        ui.columns(cards.len(), |cols| {
            for (col, (label, value)) in cols.iter_mut().zip(cards.iter()) {
                egui::Frame::none()
                    .fill(col.visuals().widgets.noninteractive.bg_fill)
                    .rounding(8.0)
                    .inner_margin(12.0)
                    .show(col, |ui| {
                        ui.set_width(ui.available_width());
                        ui.label(RichText::new(*label).size(13.0).color(Color32::GRAY));
                        ui.label(RichText::new(value).size(24.0).strong());
                    });
            }
        });
    }

    /// Framed chart region: the chart when ready, its notice otherwise.
    fn chart_card<T>(
        ui: &mut egui::Ui,
        title: &str,
        state: &ChartState<T>,
        draw: impl FnOnce(&mut egui::Ui, &T),
    ) {
        egui::Frame::none()
            .rounding(8.0)
            .stroke(ui.visuals().widgets.noninteractive.bg_stroke)
            .inner_margin(12.0)
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                ChartPlotter::title(ui, title);
                match state {
                    ChartState::Ready(data) => draw(ui, data),
                    ChartState::Empty(notice) => ChartPlotter::draw_notice(ui, notice),
                }
            });
    }
}
