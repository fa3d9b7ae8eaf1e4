//! Schema Normalizer Module
//! Renames source columns to canonical English names and translates
//! categorical codes to display labels.

use polars::prelude::*;
use thiserror::Error;

/// Source column name -> canonical column name.
pub const COLUMN_MAP: [(&str, &str); 12] = [
    ("ano", "year"),
    ("senioridade", "seniority"),
    ("contrato", "contract_type"),
    ("cargo", "role"),
    ("salario", "salary"),
    ("moeda", "currency"),
    ("usd", "usd"),
    ("residencia", "country"),
    ("residencia_iso3", "country_iso3"),
    ("experiencia", "experience"),
    ("tamanho_empresa", "company_size"),
    ("remoto", "work_model"),
];

/// Source categorical code -> canonical label.
///
/// Applied to every text cell of the table, whatever its column.
pub const VALUE_MAP: [(&str, &str); 13] = [
    ("executivo", "executive"),
    ("junior", "entry level"),
    ("pleno", "mid-level"),
    ("senior", "senior"),
    ("integral", "full time"),
    ("parcial", "part time"),
    ("contrato", "contract"),
    ("remoto", "remote"),
    ("hibrido", "hybrid"),
    ("presencial", "onsite"),
    ("media", "medium"),
    ("grande", "large"),
    ("pequena", "small"),
];

#[derive(Error, Debug)]
pub enum NormalizeError {
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
}

/// Canonical name for a source column, if it has one.
pub fn canonical_column(source: &str) -> Option<&'static str> {
    COLUMN_MAP
        .iter()
        .find(|(from, _)| *from == source)
        .map(|(_, to)| *to)
}

/// Canonical label for a categorical code, if it has one.
pub fn translate_value(code: &str) -> Option<&'static str> {
    VALUE_MAP
        .iter()
        .find(|(from, _)| *from == code)
        .map(|(_, to)| *to)
}

/// Turns the raw source table into the canonical schema.
pub struct Normalizer;

impl Normalizer {
    pub fn normalize(mut df: DataFrame) -> Result<DataFrame, NormalizeError> {
        let renamed = Self::rename_columns(&mut df)?;
        let replaced = Self::translate_values(&mut df)?;
        tracing::info!(renamed, replaced, "salary table normalized");
        Ok(df)
    }

    /// Rename known source columns; unknown columns stay as they are.
    fn rename_columns(df: &mut DataFrame) -> Result<usize, NormalizeError> {
        let renames: Vec<(String, &'static str)> = df
            .get_column_names()
            .iter()
            .filter_map(|name| {
                canonical_column(name.as_str())
                    .filter(|target| *target != name.as_str())
                    .map(|target| (name.to_string(), target))
            })
            .collect();

        for (from, to) in &renames {
            df.rename(from, (*to).into())?;
        }
        Ok(renames.len())
    }

    /// Replace every text cell matching a `VALUE_MAP` key, table-wide.
    fn translate_values(df: &mut DataFrame) -> Result<usize, NormalizeError> {
        let text_columns: Vec<PlSmallStr> = df
            .get_columns()
            .iter()
            .filter(|col| col.dtype() == &DataType::String)
            .map(|col| col.name().clone())
            .collect();

        let mut replaced = 0;
        for name in text_columns {
            let column = {
                let values = df.column(name.as_str())?.str()?;
                let translated: Vec<Option<&str>> = values
                    .into_iter()
                    .map(|cell| {
                        cell.map(|text| match translate_value(text) {
                            Some(label) => {
                                replaced += 1;
                                label
                            }
                            None => text,
                        })
                    })
                    .collect();
                Column::new(name.clone(), translated)
            };
            df.with_column(column)?;
        }
        Ok(replaced)
    }
}
