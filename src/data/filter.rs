//! Filter Engine Module
//! Sidebar dimensions, their selectable universes, and the filtered view.

use crate::data::{SalaryRecord, SalaryTable};
use polars::prelude::{DataFrame, PolarsResult};
use std::collections::BTreeSet;
use std::sync::Arc;

/// A sidebar filter dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dimension {
    Year,
    Seniority,
    ContractType,
    CompanySize,
}

impl Dimension {
    pub const ALL: [Dimension; 4] = [
        Dimension::Year,
        Dimension::Seniority,
        Dimension::ContractType,
        Dimension::CompanySize,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Dimension::Year => "Year",
            Dimension::Seniority => "Seniority",
            Dimension::ContractType => "Contract Type",
            Dimension::CompanySize => "Company Size",
        }
    }
}

/// Every distinct value per dimension, sorted ascending.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterOptions {
    pub years: Vec<i64>,
    pub seniority: Vec<String>,
    pub contract_types: Vec<String>,
    pub company_sizes: Vec<String>,
}

impl FilterOptions {
    pub fn from_records(records: &[SalaryRecord]) -> Self {
        let years: BTreeSet<i64> = records.iter().filter_map(|r| r.year).collect();
        let distinct = |field: fn(&SalaryRecord) -> &str| -> Vec<String> {
            records
                .iter()
                .map(|r| field(r).to_string())
                .collect::<BTreeSet<_>>()
                .into_iter()
                .collect()
        };

        Self {
            years: years.into_iter().collect(),
            seniority: distinct(|r| r.seniority.as_str()),
            contract_types: distinct(|r| r.contract_type.as_str()),
            company_sizes: distinct(|r| r.company_size.as_str()),
        }
    }

    /// Display labels for a dimension, in universe order.
    pub fn labels(&self, dim: Dimension) -> Vec<String> {
        match dim {
            Dimension::Year => self.years.iter().map(|y| y.to_string()).collect(),
            Dimension::Seniority => self.seniority.clone(),
            Dimension::ContractType => self.contract_types.clone(),
            Dimension::CompanySize => self.company_sizes.clone(),
        }
    }
}

/// Allowed values per dimension. Replaced wholesale on every interaction.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterSelection {
    pub years: BTreeSet<i64>,
    pub seniority: BTreeSet<String>,
    pub contract_types: BTreeSet<String>,
    pub company_sizes: BTreeSet<String>,
}

impl FilterSelection {
    /// Select the whole universe (no filtering).
    pub fn all(options: &FilterOptions) -> Self {
        Self {
            years: options.years.iter().copied().collect(),
            seniority: options.seniority.iter().cloned().collect(),
            contract_types: options.contract_types.iter().cloned().collect(),
            company_sizes: options.company_sizes.iter().cloned().collect(),
        }
    }

    pub fn contains(&self, dim: Dimension, label: &str) -> bool {
        match dim {
            Dimension::Year => label
                .parse::<i64>()
                .is_ok_and(|year| self.years.contains(&year)),
            Dimension::Seniority => self.seniority.contains(label),
            Dimension::ContractType => self.contract_types.contains(label),
            Dimension::CompanySize => self.company_sizes.contains(label),
        }
    }

    /// Copy of this selection with one value added or removed.
    pub fn with_value(&self, dim: Dimension, label: &str, selected: bool) -> Self {
        let mut next = self.clone();
        match dim {
            Dimension::Year => {
                if let Ok(year) = label.parse::<i64>() {
                    toggle(&mut next.years, year, selected);
                }
            }
            Dimension::Seniority => toggle(&mut next.seniority, label.to_string(), selected),
            Dimension::ContractType => {
                toggle(&mut next.contract_types, label.to_string(), selected)
            }
            Dimension::CompanySize => toggle(&mut next.company_sizes, label.to_string(), selected),
        }
        next
    }

    /// Copy of this selection with one dimension reset to its full universe.
    pub fn with_all(&self, dim: Dimension, options: &FilterOptions) -> Self {
        let full = Self::all(options);
        let mut next = self.clone();
        match dim {
            Dimension::Year => next.years = full.years,
            Dimension::Seniority => next.seniority = full.seniority,
            Dimension::ContractType => next.contract_types = full.contract_types,
            Dimension::CompanySize => next.company_sizes = full.company_sizes,
        }
        next
    }

    /// Copy of this selection with one dimension emptied.
    pub fn with_none(&self, dim: Dimension) -> Self {
        let mut next = self.clone();
        match dim {
            Dimension::Year => next.years.clear(),
            Dimension::Seniority => next.seniority.clear(),
            Dimension::ContractType => next.contract_types.clear(),
            Dimension::CompanySize => next.company_sizes.clear(),
        }
        next
    }

    pub fn selected_count(&self, dim: Dimension) -> usize {
        match dim {
            Dimension::Year => self.years.len(),
            Dimension::Seniority => self.seniority.len(),
            Dimension::ContractType => self.contract_types.len(),
            Dimension::CompanySize => self.company_sizes.len(),
        }
    }

    /// AND across dimensions, membership within each.
    pub fn matches(&self, record: &SalaryRecord) -> bool {
        record.year.is_some_and(|year| self.years.contains(&year))
            && self.seniority.contains(&record.seniority)
            && self.contract_types.contains(&record.contract_type)
            && self.company_sizes.contains(&record.company_size)
    }
}

fn toggle<T: Ord>(set: &mut BTreeSet<T>, value: T, selected: bool) {
    if selected {
        set.insert(value);
    } else {
        set.remove(&value);
    }
}

/// Records of a shared table that pass a selection.
#[derive(Debug, Clone)]
pub struct FilteredView {
    table: Arc<SalaryTable>,
    indices: Vec<usize>,
}

impl FilteredView {
    pub fn apply(table: &Arc<SalaryTable>, selection: &FilterSelection) -> Self {
        let indices: Vec<usize> = table
            .records()
            .iter()
            .enumerate()
            .filter(|(_, record)| selection.matches(record))
            .map(|(i, _)| i)
            .collect();

        tracing::debug!(selected = indices.len(), total = table.len(), "filter applied");
        Self {
            table: Arc::clone(table),
            indices,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &SalaryRecord> + '_ {
        let records = self.table.records();
        self.indices.iter().map(move |&i| &records[i])
    }

    /// Every column of the normalized table.
    pub fn columns(&self) -> Vec<&str> {
        self.table.columns()
    }

    /// Raw cell text at `row` of this view.
    pub fn cell(&self, row: usize, column: &str) -> String {
        self.indices
            .get(row)
            .map(|&i| self.table.cell(i, column))
            .unwrap_or_default()
    }

    /// The filtered rows with all of their columns.
    pub fn to_dataframe(&self) -> PolarsResult<DataFrame> {
        self.table.select_rows(&self.indices)
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}
