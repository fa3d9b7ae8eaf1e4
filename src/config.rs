//! Dashboard Configuration
//! Static settings with an optional `dashboard.toml` override.

use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

/// Published dataset the dashboard is built around.
pub const DEFAULT_SOURCE: &str =
    "https://raw.githubusercontent.com/vqrca/dashboard_salarios_dados/main/dados-imersao-final.csv";

/// File looked up in the working directory at startup.
pub const CONFIG_FILE: &str = "dashboard.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid config: {0}")]
    Toml(#[from] toml::de::Error),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// URL (http/https) or local path of the salary CSV.
    pub source: String,
    pub window_title: String,
    pub window_size: [f32; 2],
    pub histogram_bins: usize,
    pub top_roles: usize,
    /// Role used by the per-country map.
    pub spotlight_role: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            source: DEFAULT_SOURCE.to_string(),
            window_title: "Salaries in Data Dashboard".to_string(),
            window_size: [1400.0, 900.0],
            histogram_bins: 30,
            top_roles: 10,
            spotlight_role: "Data Scientist".to_string(),
        }
    }
}

impl DashboardConfig {
    /// Load `dashboard.toml` from the working directory, or defaults if absent.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(Path::new(CONFIG_FILE))
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path)?;
        Self::from_toml(&text)
    }

    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        tracing::debug!(source = %config.source, "configuration parsed");
        Ok(config)
    }

    pub fn is_remote(&self) -> bool {
        self.source.starts_with("http://") || self.source.starts_with("https://")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = DashboardConfig::load_from(&dir.path().join("nope.toml")).unwrap();
        assert_eq!(config, DashboardConfig::default());
        assert!(config.is_remote());
    }

    #[test]
    fn partial_file_overrides_only_given_keys() {
        let config = DashboardConfig::from_toml(
            "source = \"data/salaries.csv\"\nhistogram_bins = 12\n",
        )
        .unwrap();
        assert_eq!(config.source, "data/salaries.csv");
        assert_eq!(config.histogram_bins, 12);
        assert_eq!(config.top_roles, 10);
        assert_eq!(config.spotlight_role, "Data Scientist");
        assert!(!config.is_remote());
    }

    #[test]
    fn malformed_file_is_an_error() {
        assert!(matches!(
            DashboardConfig::from_toml("histogram_bins = \"many\""),
            Err(ConfigError::Toml(_))
        ));
    }
}
