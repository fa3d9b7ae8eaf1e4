//! Stats module - KPIs and chart tables

mod calculator;
mod format;

pub use calculator::{
    AggregationSettings, ChartState, CountryAverage, DashboardSnapshot, HistogramBin,
    Kpis, Notice, RoleAverage, Severity, StatsCalculator, WorkModelShare,
};
pub use format::{format_count, format_usd};
