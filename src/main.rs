//! Salary Dashboard - interactive view over data-industry salaries
//!
//! Loads the salary CSV once, normalizes it, and serves sidebar filters,
//! headline KPIs, four charts and the detail table.

mod charts;
mod config;
mod data;
mod export;
mod gui;
mod stats;

use anyhow::{Context, Result};
use config::DashboardConfig;
use data::{DataLoader, Normalizer, SalaryTable};
use eframe::egui;
use gui::DashboardApp;
use stats::AggregationSettings;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("salary_dashboard=info")),
        )
        .init();

    let config = DashboardConfig::load().context("failed to load dashboard.toml")?;
    tracing::info!(source = %config.source, remote = config.is_remote(), "starting dashboard");
    let table = Arc::new(load_table(&config.source)?);

    let settings = AggregationSettings {
        histogram_bins: config.histogram_bins,
        top_roles: config.top_roles,
        spotlight_role: config.spotlight_role.clone(),
    };

    // Configure native options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(config.window_size)
            .with_min_inner_size([1000.0, 700.0])
            .with_title(&config.window_title),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        &config.window_title,
        options,
        Box::new(move |cc| Ok(Box::new(DashboardApp::new(cc, table, settings)))),
    )
    .map_err(|e| anyhow::anyhow!("dashboard window failed: {e}"))
}

/// Fetch, normalize and type the dataset. Any failure aborts startup.
fn load_table(source: &str) -> Result<SalaryTable> {
    let raw = DataLoader::load(source).with_context(|| format!("failed to load {source}"))?;
    let normalized = Normalizer::normalize(raw).context("failed to normalize salary table")?;
    let table = SalaryTable::from_dataframe(&normalized).context("salary table is unusable")?;
    tracing::info!(records = table.len(), "salary table ready");
    Ok(table)
}
