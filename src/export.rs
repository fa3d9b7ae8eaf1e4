//! Export Module
//! Writes the filtered view as CSV and the charts as a PNG report.

use crate::charts::StaticChartRenderer;
use crate::data::FilteredView;
use crate::stats::DashboardSnapshot;
use polars::prelude::*;
use std::fs::File;
use std::path::Path;
use thiserror::Error;

/// Pixel size of the exported chart image.
pub const REPORT_SIZE: (u32, u32) = (1600, 1200);

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Failed to write file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to build table: {0}")]
    Polars(#[from] PolarsError),
    #[error("Failed to render charts: {0}")]
    Render(String),
    #[error("Failed to open {path}: {message}")]
    Open { path: String, message: String },
}

pub struct Exporter;

impl Exporter {
    /// Write every row of the view with all normalized columns.
    pub fn export_csv(view: &FilteredView, path: &Path) -> Result<usize, ExportError> {
        let mut df = view.to_dataframe()?;
        let mut file = File::create(path)?;
        CsvWriter::new(&mut file)
            .include_header(true)
            .finish(&mut df)?;

        tracing::info!(path = %path.display(), rows = df.height(), "filtered view exported");
        Ok(df.height())
    }

    pub fn export_png(
        snapshot: &DashboardSnapshot,
        spotlight_role: &str,
        path: &Path,
    ) -> Result<(), ExportError> {
        StaticChartRenderer::render_png(snapshot, spotlight_role, path, REPORT_SIZE)
            .map_err(|e| ExportError::Render(e.to_string()))
    }

    /// Hand the file to the system's default viewer.
    pub fn open_file(path: &Path) -> Result<(), ExportError> {
        open::that(path).map_err(|e| ExportError::Open {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }
}
