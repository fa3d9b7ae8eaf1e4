//! Chart Plotter Module
//! Interactive dashboard charts drawn with egui_plot and the egui painter.

use crate::charts::palette;
use crate::stats::{
    format_usd, CountryAverage, HistogramBin, Notice, RoleAverage, Severity, WorkModelShare,
};
use egui::{Color32, FontId, Pos2, RichText, Sense, Stroke};
use egui_plot::{Bar, BarChart, Plot};
use std::f32::consts::TAU;

pub const CHART_HEIGHT: f32 = 320.0;
const WARNING_COLOR: Color32 = Color32::from_rgb(255, 193, 7);
const INFO_COLOR: Color32 = Color32::from_rgb(23, 162, 184);

pub fn rgb((r, g, b): (u8, u8, u8)) -> Color32 {
    Color32::from_rgb(r, g, b)
}

/// Creates the dashboard's four chart regions.
pub struct ChartPlotter;

impl ChartPlotter {
    /// Chart title, styled like the rest of the dashboard.
    pub fn title(ui: &mut egui::Ui, text: &str) {
        ui.label(RichText::new(text).size(15.0).strong());
        ui.add_space(4.0);
    }

    /// Boxed message shown in place of a chart.
    pub fn draw_notice(ui: &mut egui::Ui, notice: &Notice) {
        let (icon, color) = match notice.severity() {
            Severity::Warning => ("⚠", WARNING_COLOR),
            Severity::Info => ("ℹ", INFO_COLOR),
        };

        egui::Frame::none()
            .fill(color.gamma_multiply(0.15))
            .stroke(Stroke::new(1.0, color))
            .rounding(5.0)
            .inner_margin(10.0)
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.label(RichText::new(format!("{icon} {}", notice.message())).color(color));
            });
    }

    /// Horizontal bars, largest mean on top (input is ascending).
    pub fn draw_top_roles(ui: &mut egui::Ui, roles: &[RoleAverage]) {
        let labels: Vec<String> = roles.iter().map(|r| r.role.clone()).collect();
        let bars: Vec<Bar> = roles
            .iter()
            .enumerate()
            .map(|(i, r)| {
                Bar::new(i as f64, r.mean_usd)
                    .name(format!("{}: {}", r.role, format_usd(r.mean_usd)))
                    .fill(rgb(palette::BAR))
            })
            .collect();

        Plot::new("top_roles")
            .height(CHART_HEIGHT)
            .allow_zoom(false)
            .allow_drag(false)
            .allow_scroll(false)
            .x_axis_label("Average annual salary (USD)")
            .y_axis_formatter(move |mark, _range| category_label(&labels, mark.value))
            .show(ui, |plot_ui| {
                plot_ui.bar_chart(BarChart::new(bars).horizontal().width(0.7));
            });
    }

    /// Salary histogram, one bar per bin.
    pub fn draw_histogram(ui: &mut egui::Ui, bins: &[HistogramBin]) {
        let bars: Vec<Bar> = bins
            .iter()
            .map(|b| {
                Bar::new((b.lower + b.upper) / 2.0, b.count as f64)
                    .width(b.upper - b.lower)
                    .name(format!("{} – {}", format_usd(b.lower), format_usd(b.upper)))
                    .fill(rgb(palette::BAR))
            })
            .collect();

        Plot::new("salary_histogram")
            .height(CHART_HEIGHT)
            .allow_zoom(false)
            .allow_drag(false)
            .allow_scroll(false)
            .x_axis_label("Salary range (USD)")
            .show(ui, |plot_ui| {
                plot_ui.bar_chart(BarChart::new(bars));
            });
    }

    /// Donut with "label percent" annotations, plus a legend.
    pub fn draw_work_models(ui: &mut egui::Ui, shares: &[WorkModelShare]) {
        let size = egui::vec2(ui.available_width(), CHART_HEIGHT);
        let (rect, _) = ui.allocate_exact_size(size, Sense::hover());
        let painter = ui.painter_at(rect);

        let legend_width = 120.0;
        let pie_rect = egui::Rect::from_min_max(rect.min, rect.max - egui::vec2(legend_width, 0.0));
        let center = pie_rect.center();
        let outer = pie_rect.width().min(pie_rect.height()) / 2.0 - 8.0;
        let inner = outer * 0.5;

        let mut start = -TAU / 4.0;
        for (i, share) in shares.iter().enumerate() {
            let sweep = (share.percent / 100.0) as f32 * TAU;
            let color = rgb(palette::category(i));
            for shape in Self::ring_segment(center, inner, outer, start, sweep, color) {
                painter.add(shape);
            }

            let mid = start + sweep / 2.0;
            let label_at = center + egui::vec2(mid.cos(), mid.sin()) * (inner + outer) / 2.0;
            if share.percent >= 3.0 {
                painter.text(
                    label_at,
                    egui::Align2::CENTER_CENTER,
                    format!("{}\n{:.1}%", share.work_model, share.percent),
                    FontId::proportional(12.0),
                    Color32::WHITE,
                );
            }
            start += sweep;
        }

        let mut y = rect.min.y + 10.0;
        let x = rect.max.x - legend_width + 10.0;
        for (i, share) in shares.iter().enumerate() {
            let swatch = egui::Rect::from_min_size(Pos2::new(x, y), egui::vec2(12.0, 12.0));
            painter.rect_filled(swatch, 2.0, rgb(palette::category(i)));
            painter.text(
                Pos2::new(x + 18.0, y + 6.0),
                egui::Align2::LEFT_CENTER,
                &share.work_model,
                FontId::proportional(12.0),
                ui.visuals().text_color(),
            );
            y += 20.0;
        }
    }

    /// Annular sector as convex quads.
    fn ring_segment(
        center: Pos2,
        inner: f32,
        outer: f32,
        start: f32,
        sweep: f32,
        color: Color32,
    ) -> Vec<egui::Shape> {
        let steps = ((sweep / 0.05).ceil() as usize).max(1);
        let step = sweep / steps as f32;
        let at = |radius: f32, angle: f32| center + egui::vec2(angle.cos(), angle.sin()) * radius;

        (0..steps)
            .map(|s| {
                let a0 = start + step * s as f32;
                let a1 = a0 + step;
                egui::Shape::convex_polygon(
                    vec![at(outer, a0), at(outer, a1), at(inner, a1), at(inner, a0)],
                    color,
                    Stroke::NONE,
                )
            })
            .collect()
    }

    /// Per-country averages coloured on the red-yellow-green scale.
    pub fn draw_countries(ui: &mut egui::Ui, countries: &[CountryAverage]) {
        let mut ranked = countries.to_vec();
        ranked.sort_by(|a, b| a.mean_usd.total_cmp(&b.mean_usd));

        let (min, max) = ranked
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), c| {
                (lo.min(c.mean_usd), hi.max(c.mean_usd))
            });

        let labels: Vec<String> = ranked.iter().map(|c| c.iso3.clone()).collect();
        let bars: Vec<Bar> = ranked
            .iter()
            .enumerate()
            .map(|(i, c)| {
                let color = palette::rdylgn(palette::scale_position(c.mean_usd, min, max));
                Bar::new(i as f64, c.mean_usd)
                    .name(format!("{}: {} (n={})", c.iso3, format_usd(c.mean_usd), c.count))
                    .fill(rgb(color))
            })
            .collect();

        Plot::new("country_averages")
            .height(CHART_HEIGHT - 30.0)
            .allow_zoom(false)
            .allow_drag(false)
            .allow_scroll(false)
            .x_axis_label("Average salary (USD)")
            .y_axis_formatter(move |mark, _range| category_label(&labels, mark.value))
            .show(ui, |plot_ui| {
                plot_ui.bar_chart(BarChart::new(bars).horizontal().width(0.8));
            });

        if !ranked.is_empty() {
            Self::draw_color_scale(ui, min, max);
        }
    }

    fn draw_color_scale(ui: &mut egui::Ui, min: f64, max: f64) {
        ui.horizontal(|ui| {
            ui.label(RichText::new(format_usd(min)).size(11.0));
            let (rect, _) = ui.allocate_exact_size(egui::vec2(200.0, 12.0), Sense::hover());
            let steps = 50;
            let width = rect.width() / steps as f32;
            for i in 0..steps {
                let t = i as f64 / (steps - 1) as f64;
                let cell = egui::Rect::from_min_size(
                    Pos2::new(rect.min.x + width * i as f32, rect.min.y),
                    egui::vec2(width + 0.5, rect.height()),
                );
                ui.painter().rect_filled(cell, 0.0, rgb(palette::rdylgn(t)));
            }
            ui.label(RichText::new(format_usd(max)).size(11.0));
        });
    }
}

/// Axis label for an integer category position, blank between categories.
pub fn category_label(labels: &[String], value: f64) -> String {
    let idx = value.round();
    if (value - idx).abs() > 1e-6 || idx < 0.0 {
        return String::new();
    }
    labels.get(idx as usize).cloned().unwrap_or_default()
}
