//! CSV Data Loader Module
//! Fetches the salary CSV over HTTP (or from disk) and parses it with Polars.

use polars::prelude::*;
use std::io::Cursor;
use thiserror::Error;

/// Rows scanned for schema inference.
const INFER_SCHEMA_ROWS: usize = 10_000;

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Failed to fetch {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("Fetching {url} returned HTTP {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },
    #[error("Failed to load CSV: {0}")]
    CsvError(#[from] PolarsError),
    #[error("Source is empty")]
    NoData,
}

/// Handles CSV loading with Polars.
pub struct DataLoader;

impl DataLoader {
    /// Load the table from a URL (`http://`, `https://`) or a local path.
    pub fn load(source: &str) -> Result<DataFrame, LoaderError> {
        if source.starts_with("http://") || source.starts_with("https://") {
            Self::fetch_csv(source)
        } else {
            Self::load_csv(source)
        }
    }

    /// One blocking GET, no retry.
    pub fn fetch_csv(url: &str) -> Result<DataFrame, LoaderError> {
        tracing::info!(url, "fetching salary data");
        let response = reqwest::blocking::get(url).map_err(|source| LoaderError::Transport {
            url: url.to_string(),
            source,
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(LoaderError::Status {
                url: url.to_string(),
                status,
            });
        }

        let bytes = response.bytes().map_err(|source| LoaderError::Transport {
            url: url.to_string(),
            source,
        })?;
        tracing::debug!(bytes = bytes.len(), "download complete");
        Self::parse_csv(bytes.to_vec())
    }

    /// Parse an in-memory CSV document.
    pub fn parse_csv(bytes: Vec<u8>) -> Result<DataFrame, LoaderError> {
        if bytes.iter().all(|b| b.is_ascii_whitespace()) {
            return Err(LoaderError::NoData);
        }

        let df = CsvReadOptions::default()
            .with_has_header(true)
            .with_infer_schema_length(Some(INFER_SCHEMA_ROWS))
            .into_reader_with_file_handle(Cursor::new(bytes))
            .finish()?;

        tracing::info!(rows = df.height(), columns = df.width(), "salary table parsed");
        Ok(df)
    }

    /// Load a CSV file using Polars.
    pub fn load_csv(file_path: &str) -> Result<DataFrame, LoaderError> {
        tracing::info!(path = file_path, "reading salary data from disk");

        let df = LazyCsvReader::new(file_path)
            .with_has_header(true)
            .with_infer_schema_length(Some(INFER_SCHEMA_ROWS))
            .finish()?
            .collect()?;

        if df.width() == 0 {
            return Err(LoaderError::NoData);
        }
        tracing::info!(rows = df.height(), columns = df.width(), "salary table parsed");
        Ok(df)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE: &str = "ano,senioridade,cargo,usd\n\
                          2024,senior,Data Scientist,120000\n\
                          2023,junior,Data Analyst,55000.5\n";

    #[test]
    fn parses_in_memory_csv() {
        let df = DataLoader::parse_csv(SAMPLE.as_bytes().to_vec()).unwrap();
        assert_eq!(df.height(), 2);
        assert_eq!(df.width(), 4);
        assert_eq!(df.column("usd").unwrap().dtype(), &DataType::Float64);
        assert_eq!(df.column("ano").unwrap().dtype(), &DataType::Int64);
    }

    #[test]
    fn empty_document_is_rejected() {
        assert!(matches!(
            DataLoader::parse_csv(b"  \n".to_vec()),
            Err(LoaderError::NoData)
        ));
    }

    #[test]
    fn local_paths_go_through_the_file_reader() {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let df = DataLoader::load(file.path().to_str().unwrap()).unwrap();
        assert_eq!(df.height(), 2);
        assert!(df.column("senioridade").is_ok());
    }

    #[test]
    fn missing_local_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.csv");
        assert!(DataLoader::load(path.to_str().unwrap()).is_err());
    }
}
