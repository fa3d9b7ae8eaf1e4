//! Static Chart Renderer
//! Draws the four dashboard charts into a single 2x2 PNG with plotters.
//!
//! Layout:
//! 1. Top left: top roles by average salary (horizontal bars)
//! 2. Top right: salary distribution (histogram)
//! 3. Bottom left: work model proportion (donut)
//! 4. Bottom right: spotlight-role average by country (RdYlGn bars)
//!
//! A region whose data is unavailable shows its notice text instead.

use crate::charts::palette;
use crate::stats::{
    format_usd, ChartState, CountryAverage, DashboardSnapshot, HistogramBin, Notice, RoleAverage,
    Severity, WorkModelShare,
};
use plotters::coord::Shift;
use plotters::prelude::*;
use std::error::Error;
use std::path::Path;

type RenderResult = Result<(), Box<dyn Error>>;

const TITLE_FONT: (&str, i32) = ("sans-serif", 22);
const LABEL_FONT: (&str, i32) = ("sans-serif", 14);

fn color((r, g, b): (u8, u8, u8)) -> RGBColor {
    RGBColor(r, g, b)
}

pub struct StaticChartRenderer;

impl StaticChartRenderer {
    /// Render `snapshot` to a PNG at `path`.
    pub fn render_png(
        snapshot: &DashboardSnapshot,
        spotlight_role: &str,
        path: &Path,
        size: (u32, u32),
    ) -> RenderResult {
        let root = BitMapBackend::new(path, size).into_drawing_area();
        root.fill(&WHITE)?;

        let panels = root.split_evenly((2, 2));
        Self::panel(&panels[0], "Top 10 roles by average salary", &snapshot.top_roles, |area, d| {
            Self::draw_top_roles(area, d)
        })?;
        Self::panel(&panels[1], "Distribution of annual salaries", &snapshot.histogram, |area, d| {
            Self::draw_histogram(area, d)
        })?;
        Self::panel(&panels[2], "Work model proportion", &snapshot.work_models, |area, d| {
            Self::draw_work_models(area, d)
        })?;
        let map_title = format!("Average {spotlight_role} salary by country");
        Self::panel(&panels[3], &map_title, &snapshot.countries, |area, d| {
            Self::draw_countries(area, d)
        })?;

        root.present()?;
        tracing::info!(path = %path.display(), "chart image written");
        Ok(())
    }

    fn panel<DB, T, F>(
        area: &DrawingArea<DB, Shift>,
        title: &str,
        state: &ChartState<T>,
        draw: F,
    ) -> RenderResult
    where
        DB: DrawingBackend,
        DB::ErrorType: 'static,
        F: FnOnce(&DrawingArea<DB, Shift>, &T) -> RenderResult,
    {
        let inner = area.titled(title, TITLE_FONT.into_font())?;
        match state {
            ChartState::Ready(data) => draw(&inner, data),
            ChartState::Empty(notice) => Self::draw_notice(&inner, notice),
        }
    }

    fn draw_notice<DB>(area: &DrawingArea<DB, Shift>, notice: &Notice) -> RenderResult
    where
        DB: DrawingBackend,
        DB::ErrorType: 'static,
    {
        let tint = match notice.severity() {
            Severity::Warning => RGBColor(176, 120, 0),
            Severity::Info => RGBColor(23, 120, 150),
        };
        let style = LABEL_FONT.into_font().color(&tint);
        area.draw(&Text::new(notice.message(), (30, 40), style))?;
        Ok(())
    }

    fn draw_top_roles<DB>(area: &DrawingArea<DB, Shift>, roles: &[RoleAverage]) -> RenderResult
    where
        DB: DrawingBackend,
        DB::ErrorType: 'static,
    {
        let max = roles.iter().map(|r| r.mean_usd).fold(0.0, f64::max).max(1.0);
        let labels: Vec<(String, f64)> = roles
            .iter()
            .map(|r| (r.role.clone(), r.mean_usd))
            .collect();
        Self::horizontal_bars(area, &labels, max, "Average annual salary (USD)", |_| {
            color(palette::BAR)
        })
    }

    fn draw_countries<DB>(
        area: &DrawingArea<DB, Shift>,
        countries: &[CountryAverage],
    ) -> RenderResult
    where
        DB: DrawingBackend,
        DB::ErrorType: 'static,
    {
        let mut ranked = countries.to_vec();
        ranked.sort_by(|a, b| a.mean_usd.total_cmp(&b.mean_usd));
        let min = ranked.first().map_or(0.0, |c| c.mean_usd);
        let max = ranked.last().map_or(1.0, |c| c.mean_usd);

        let labels: Vec<(String, f64)> = ranked
            .iter()
            .map(|c| (c.iso3.clone(), c.mean_usd))
            .collect();
        Self::horizontal_bars(area, &labels, max.max(1.0), "Average salary (USD)", |value| {
            color(palette::rdylgn(palette::scale_position(value, min, max)))
        })
    }

    /// Bars from the bottom up in input order, each labelled at its base.
    fn horizontal_bars<DB>(
        area: &DrawingArea<DB, Shift>,
        bars: &[(String, f64)],
        max: f64,
        x_desc: &str,
        fill: impl Fn(f64) -> RGBColor,
    ) -> RenderResult
    where
        DB: DrawingBackend,
        DB::ErrorType: 'static,
    {
        let n = bars.len().max(1) as f64;
        let mut chart = ChartBuilder::on(area)
            .margin(10)
            .x_label_area_size(35)
            .y_label_area_size(10)
            .build_cartesian_2d(0.0..max * 1.05, -0.5..n - 0.5)?;

        chart
            .configure_mesh()
            .disable_y_mesh()
            .y_labels(0)
            .x_desc(x_desc)
            .x_label_formatter(&|v| format_usd(*v))
            .draw()?;

        chart.draw_series(bars.iter().enumerate().map(|(i, (_, value))| {
            let y = i as f64;
            Rectangle::new([(0.0, y - 0.35), (*value, y + 0.35)], fill(*value).filled())
        }))?;

        chart.draw_series(bars.iter().enumerate().map(|(i, (label, _))| {
            Text::new(label.clone(), (max * 0.01, i as f64 + 0.15), LABEL_FONT.into_font())
        }))?;
        Ok(())
    }

    fn draw_histogram<DB>(area: &DrawingArea<DB, Shift>, bins: &[HistogramBin]) -> RenderResult
    where
        DB: DrawingBackend,
        DB::ErrorType: 'static,
    {
        let lo = bins.first().map_or(0.0, |b| b.lower);
        let hi = bins.last().map_or(1.0, |b| b.upper);
        let top = bins.iter().map(|b| b.count).max().unwrap_or(0).max(1) as f64;

        let mut chart = ChartBuilder::on(area)
            .margin(10)
            .x_label_area_size(35)
            .y_label_area_size(45)
            .build_cartesian_2d(lo..hi, 0.0..top * 1.1)?;

        chart
            .configure_mesh()
            .x_desc("Salary range (USD)")
            .x_label_formatter(&|v| format_usd(*v))
            .y_label_formatter(&|v| format!("{v:.0}"))
            .draw()?;

        let fill = color(palette::BAR);
        chart.draw_series(bins.iter().map(|b| {
            Rectangle::new([(b.lower, 0.0), (b.upper, b.count as f64)], fill.filled())
        }))?;
        Ok(())
    }

    fn draw_work_models<DB>(
        area: &DrawingArea<DB, Shift>,
        shares: &[WorkModelShare],
    ) -> RenderResult
    where
        DB: DrawingBackend,
        DB::ErrorType: 'static,
    {
        if shares.is_empty() {
            return Ok(());
        }

        let (w, h) = area.dim_in_pixel();
        let center = (w as i32 / 2, h as i32 / 2);
        let radius = (w.min(h) as f64 / 2.0 - 30.0).max(10.0);
        let sizes: Vec<f64> = shares.iter().map(|s| s.count as f64).collect();
        let colors: Vec<RGBColor> = (0..shares.len())
            .map(|i| color(palette::category(i)))
            .collect();
        let labels: Vec<String> = shares.iter().map(|s| s.work_model.clone()).collect();

        let mut pie = Pie::new(&center, &radius, &sizes, &colors, &labels);
        pie.start_angle(-90.0);
        pie.donut_hole(radius * 0.5);
        pie.label_style(LABEL_FONT.into_font().color(&BLACK));
        pie.percentages(LABEL_FONT.into_font().color(&WHITE));
        area.draw(&pie)?;
        Ok(())
    }
}
