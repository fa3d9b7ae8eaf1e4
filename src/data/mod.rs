//! Data module - loading, normalization, records and filtering

mod filter;
mod loader;
mod normalizer;
mod record;

pub use filter::{Dimension, FilterOptions, FilterSelection, FilteredView};
pub use loader::DataLoader;
pub use normalizer::Normalizer;
pub use record::{SalaryRecord, SalaryTable};
