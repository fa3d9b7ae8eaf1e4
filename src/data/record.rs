//! Salary Records
//! Typed rows extracted from the normalized table.

use polars::prelude::*;
use thiserror::Error;

/// Canonical columns every downstream computation relies on.
pub const REQUIRED_COLUMNS: [&str; 8] = [
    "year",
    "seniority",
    "contract_type",
    "role",
    "usd",
    "country_iso3",
    "company_size",
    "work_model",
];

#[derive(Error, Debug)]
pub enum RecordError {
    #[error("Missing column '{0}' in the normalized salary table")]
    MissingColumn(&'static str),
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
}

/// One salary observation.
///
/// Text fields hold `""` where the source cell was null.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SalaryRecord {
    pub year: Option<i64>,
    pub seniority: String,
    pub contract_type: String,
    pub role: String,
    pub salary: Option<f64>,
    pub currency: String,
    /// Salary converted to USD; `None` when the source cell is empty.
    pub usd: Option<f64>,
    pub country: String,
    pub country_iso3: String,
    pub experience: String,
    pub company_size: String,
    pub work_model: String,
}

impl SalaryRecord {
    /// Whether `country_iso3` looks like a three-letter ISO code.
    pub fn has_iso3(&self) -> bool {
        self.country_iso3.len() == 3 && self.country_iso3.chars().all(|c| c.is_ascii_alphabetic())
    }
}

/// The normalized dataset, built once and shared read-only.
///
/// Keeps the normalized frame next to the typed records so row views can
/// show and export every column, including ones the aggregations ignore.
#[derive(Debug, Default)]
pub struct SalaryTable {
    records: Vec<SalaryRecord>,
    frame: DataFrame,
}

impl SalaryTable {
    pub fn from_records(records: Vec<SalaryRecord>) -> Result<Self, RecordError> {
        let frame = records_to_dataframe(&records)?;
        Ok(Self { records, frame })
    }

    /// Extract typed records from a normalized DataFrame.
    pub fn from_dataframe(df: &DataFrame) -> Result<Self, RecordError> {
        for name in REQUIRED_COLUMNS {
            if df.column(name).is_err() {
                return Err(RecordError::MissingColumn(name));
            }
        }

        let years = Self::int_values(df, "year")?;
        let seniority = Self::text_values(df, "seniority")?;
        let contract_type = Self::text_values(df, "contract_type")?;
        let role = Self::text_values(df, "role")?;
        let salary = Self::float_values(df, "salary")?;
        let currency = Self::text_values(df, "currency")?;
        let usd = Self::float_values(df, "usd")?;
        let country = Self::text_values(df, "country")?;
        let country_iso3 = Self::text_values(df, "country_iso3")?;
        let experience = Self::text_values(df, "experience")?;
        let company_size = Self::text_values(df, "company_size")?;
        let work_model = Self::text_values(df, "work_model")?;

        let records = (0..df.height())
            .map(|i| SalaryRecord {
                year: years[i],
                seniority: seniority[i].clone(),
                contract_type: contract_type[i].clone(),
                role: role[i].clone(),
                salary: salary[i],
                currency: currency[i].clone(),
                usd: usd[i],
                country: country[i].clone(),
                country_iso3: country_iso3[i].clone(),
                experience: experience[i].clone(),
                company_size: company_size[i].clone(),
                work_model: work_model[i].clone(),
            })
            .collect::<Vec<_>>();

        tracing::debug!(
            records = records.len(),
            columns = df.width(),
            "salary records extracted"
        );
        Ok(Self {
            records,
            frame: df.clone(),
        })
    }

    pub fn records(&self) -> &[SalaryRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Column names of the normalized frame, in source order.
    pub fn columns(&self) -> Vec<&str> {
        self.frame.get_column_names_str()
    }

    /// Display text of one cell; nulls and unknown columns read as empty.
    pub fn cell(&self, row: usize, column: &str) -> String {
        let Ok(value) = self.frame.column(column).and_then(|c| c.get(row)) else {
            return String::new();
        };
        match value {
            AnyValue::Null => String::new(),
            AnyValue::Int64(v) => v.to_string(),
            AnyValue::Int32(v) => v.to_string(),
            AnyValue::UInt64(v) => v.to_string(),
            AnyValue::UInt32(v) => v.to_string(),
            AnyValue::Float64(v) => v.to_string(),
            AnyValue::Float32(v) => v.to_string(),
            other => other.str_value().into_owned(),
        }
    }

    /// The normalized frame restricted to `rows`, in that order.
    pub fn select_rows(&self, rows: &[usize]) -> PolarsResult<DataFrame> {
        let idx = IdxCa::from_vec(
            "rows".into(),
            rows.iter().map(|&i| i as IdxSize).collect(),
        );
        self.frame.take(&idx)
    }

    /// Text cells of a column; an absent optional column reads as empty.
    fn text_values(df: &DataFrame, name: &str) -> Result<Vec<String>, RecordError> {
        let Ok(column) = df.column(name) else {
            return Ok(vec![String::new(); df.height()]);
        };
        let as_text = column.cast(&DataType::String)?;
        Ok(as_text
            .str()?
            .into_iter()
            .map(|v| v.unwrap_or_default().to_string())
            .collect())
    }

    fn float_values(df: &DataFrame, name: &str) -> Result<Vec<Option<f64>>, RecordError> {
        let Ok(column) = df.column(name) else {
            return Ok(vec![None; df.height()]);
        };
        let as_float = column.cast(&DataType::Float64)?;
        Ok(as_float
            .f64()?
            .into_iter()
            .map(|v| v.filter(|x| !x.is_nan()))
            .collect())
    }

    fn int_values(df: &DataFrame, name: &str) -> Result<Vec<Option<i64>>, RecordError> {
        let Ok(column) = df.column(name) else {
            return Ok(vec![None; df.height()]);
        };
        let as_int = column.cast(&DataType::Int64)?;
        Ok(as_int.i64()?.into_iter().collect())
    }
}

/// Canonical frame for records built in memory rather than loaded.
fn records_to_dataframe(records: &[SalaryRecord]) -> PolarsResult<DataFrame> {
    let rows: Vec<&SalaryRecord> = records.iter().collect();

    DataFrame::new(vec![
        Column::new("year".into(), rows.iter().map(|r| r.year).collect::<Vec<_>>()),
        text_column("seniority", &rows, |r| r.seniority.as_str()),
        text_column("contract_type", &rows, |r| r.contract_type.as_str()),
        text_column("role", &rows, |r| r.role.as_str()),
        Column::new("salary".into(), rows.iter().map(|r| r.salary).collect::<Vec<_>>()),
        text_column("currency", &rows, |r| r.currency.as_str()),
        Column::new("usd".into(), rows.iter().map(|r| r.usd).collect::<Vec<_>>()),
        text_column("country", &rows, |r| r.country.as_str()),
        text_column("country_iso3", &rows, |r| r.country_iso3.as_str()),
        text_column("experience", &rows, |r| r.experience.as_str()),
        text_column("company_size", &rows, |r| r.company_size.as_str()),
        text_column("work_model", &rows, |r| r.work_model.as_str()),
    ])
}

fn text_column(
    name: &str,
    rows: &[&SalaryRecord],
    field: impl Fn(&SalaryRecord) -> &str,
) -> Column {
    let values: Vec<&str> = rows.iter().map(|&r| field(r)).collect();
    Column::new(name.into(), values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn normalized() -> DataFrame {
        df!(
            "year" => [Some(2024i64), None],
            "seniority" => ["senior", "mid-level"],
            "contract_type" => ["full time", "contract"],
            "role" => [Some("Data Scientist"), None],
            "usd" => [Some(150_000.0), None],
            "country_iso3" => ["BRA", "USA"],
            "company_size" => ["large", "small"],
            "work_model" => ["remote", "onsite"]
        )
        .unwrap()
    }

    #[test]
    fn extracts_records_with_optional_columns_blank() {
        let table = SalaryTable::from_dataframe(&normalized()).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(
            table.records()[0],
            SalaryRecord {
                year: Some(2024),
                seniority: "senior".into(),
                contract_type: "full time".into(),
                role: "Data Scientist".into(),
                usd: Some(150_000.0),
                country_iso3: "BRA".into(),
                company_size: "large".into(),
                work_model: "remote".into(),
                ..Default::default()
            }
        );
        let second = &table.records()[1];
        assert_eq!(second.year, None);
        assert_eq!(second.usd, None);
        assert_eq!(second.role, "");
    }

    #[test]
    fn missing_required_column_is_named() {
        let df = normalized().drop("year").unwrap();
        let err = SalaryTable::from_dataframe(&df).unwrap_err();
        assert!(matches!(err, RecordError::MissingColumn("year")));
        assert_eq!(
            err.to_string(),
            "Missing column 'year' in the normalized salary table"
        );
    }

    #[test]
    fn untranslated_source_schema_is_rejected() {
        let df = df!("ano" => [2024i64], "usd" => [1.0]).unwrap();
        assert!(matches!(
            SalaryTable::from_dataframe(&df),
            Err(RecordError::MissingColumn(_))
        ));
    }

    #[test]
    fn iso3_check() {
        let mut record = SalaryRecord {
            country_iso3: "DEU".into(),
            ..Default::default()
        };
        assert!(record.has_iso3());
        record.country_iso3 = "DE".into();
        assert!(!record.has_iso3());
        record.country_iso3 = String::new();
        assert!(!record.has_iso3());
    }

    #[test]
    fn raw_cells_come_from_the_normalized_frame() {
        let df = normalized()
            .hstack(&[Column::new("bonus".into(), [Some(5_000.5), None])])
            .unwrap();
        let table = SalaryTable::from_dataframe(&df).unwrap();

        assert_eq!(
            table.columns(),
            vec![
                "year",
                "seniority",
                "contract_type",
                "role",
                "usd",
                "country_iso3",
                "company_size",
                "work_model",
                "bonus",
            ]
        );
        assert_eq!(table.cell(0, "usd"), "150000");
        assert_eq!(table.cell(0, "bonus"), "5000.5");
        assert_eq!(table.cell(0, "role"), "Data Scientist");
        assert_eq!(table.cell(1, "year"), "");
        assert_eq!(table.cell(1, "bonus"), "");
        assert_eq!(table.cell(0, "salary"), "");
    }

    #[test]
    fn select_rows_keeps_every_column() {
        let df = normalized()
            .hstack(&[Column::new("bonus".into(), [1.0, 2.0])])
            .unwrap();
        let table = SalaryTable::from_dataframe(&df).unwrap();
        let picked = table.select_rows(&[1]).unwrap();
        assert_eq!(picked.height(), 1);
        assert_eq!(picked.width(), df.width());
        assert_eq!(
            picked.column("bonus").unwrap().f64().unwrap().get(0),
            Some(2.0)
        );
    }

    #[test]
    fn in_memory_records_get_a_canonical_frame() {
        let table = SalaryTable::from_records(vec![SalaryRecord {
            year: Some(2024),
            role: "Data Scientist".into(),
            usd: Some(99_999.5),
            ..Default::default()
        }])
        .unwrap();
        assert_eq!(table.columns().len(), 12);
        assert_eq!(table.cell(0, "usd"), "99999.5");
        assert_eq!(table.cell(0, "year"), "2024");
    }
}
