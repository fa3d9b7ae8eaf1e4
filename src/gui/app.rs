//! Salary Dashboard Main Application
//! Main window with the filter sidebar and the dashboard viewer.

use crate::data::{FilterOptions, FilterSelection, FilteredView, SalaryTable};
use crate::export::Exporter;
use crate::gui::{ChartViewer, ControlPanel, ControlPanelAction};
use crate::stats::{AggregationSettings, DashboardSnapshot, StatsCalculator};
use egui::SidePanel;
use std::sync::Arc;

/// Per-window filter state over the shared table.
///
/// The table is read-only and may be shared; selection, view and snapshot
/// belong to this session and are rebuilt together on every change.
pub struct Session {
    table: Arc<SalaryTable>,
    settings: AggregationSettings,
    pub options: FilterOptions,
    pub selection: FilterSelection,
    pub view: FilteredView,
    pub snapshot: DashboardSnapshot,
}

impl Session {
    /// Start with every dimension fully selected.
    pub fn new(table: Arc<SalaryTable>, settings: AggregationSettings) -> Self {
        let options = FilterOptions::from_records(table.records());
        let selection = FilterSelection::all(&options);
        let view = FilteredView::apply(&table, &selection);
        let snapshot = StatsCalculator::snapshot(&view, &settings);
        Self {
            table,
            settings,
            options,
            selection,
            view,
            snapshot,
        }
    }

    /// Replace the selection and recompute everything downstream of it.
    pub fn set_selection(&mut self, selection: FilterSelection) {
        self.view = FilteredView::apply(&self.table, &selection);
        self.snapshot = StatsCalculator::snapshot(&self.view, &self.settings);
        self.selection = selection;
    }

    pub fn total_rows(&self) -> usize {
        self.table.len()
    }

    pub fn spotlight_role(&self) -> &str {
        &self.settings.spotlight_role
    }
}

/// Main application window.
pub struct DashboardApp {
    session: Session,
    control_panel: ControlPanel,
    chart_viewer: ChartViewer,
}

impl DashboardApp {
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        table: Arc<SalaryTable>,
        settings: AggregationSettings,
    ) -> Self {
        let chart_viewer = ChartViewer::new(&settings.spotlight_role);
        Self {
            session: Session::new(table, settings),
            control_panel: ControlPanel::new(),
            chart_viewer,
        }
    }

    fn handle_export_csv(&mut self) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("CSV Files", &["csv"])
            .set_file_name("salaries_filtered.csv")
            .save_file()
        else {
            return;
        };

        match Exporter::export_csv(&self.session.view, &path) {
            Ok(rows) => self
                .control_panel
                .set_status(&format!("Exported {rows} rows to {}", path.display())),
            Err(e) => {
                tracing::error!(error = %e, "CSV export failed");
                self.control_panel.set_status(&format!("Error: {e}"));
            }
        }
    }

    fn handle_export_png(&mut self) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("PNG Image", &["png"])
            .set_file_name("salary_dashboard.png")
            .save_file()
        else {
            return;
        };

        let result = Exporter::export_png(
            &self.session.snapshot,
            self.session.spotlight_role(),
            &path,
        )
        .and_then(|()| Exporter::open_file(&path));

        match result {
            Ok(()) => self
                .control_panel
                .set_status(&format!("Charts saved to {}", path.display())),
            Err(e) => {
                tracing::error!(error = %e, "PNG export failed");
                self.control_panel.set_status(&format!("Error: {e}"));
            }
        }
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Left panel - Filters
        SidePanel::left("filters")
            .min_width(240.0)
            .max_width(300.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    let action = self.control_panel.show(
                        ui,
                        &self.session.options,
                        &self.session.selection,
                        self.session.total_rows(),
                    );

                    match action {
                        ControlPanelAction::SelectionChanged(selection) => {
                            self.session.set_selection(selection);
                        }
                        ControlPanelAction::ExportCsv => self.handle_export_csv(),
                        ControlPanelAction::ExportPng => self.handle_export_png(),
                        ControlPanelAction::None => {}
                    }
                });
            });

        // Central panel - Dashboard
        egui::CentralPanel::default().show(ctx, |ui| {
            self.chart_viewer
                .show(ui, &self.session.snapshot, &self.session.view);
        });
    }
}
