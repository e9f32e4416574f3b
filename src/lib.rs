//! `registry-prep` prepares tabular datasets, such as cancer-registry case listings, for
//! downstream analysis.
//!
//! It provides two independent operations over an in-memory [`types::DataSet`]:
//!
//! - [`processing::preprocess`]: median imputation of numeric columns, one-hot encoding of
//!   categorical columns (first category dropped), then standardization of every numeric
//!   column, indicator columns included.
//! - [`processing::filter_dataframe`]: keep rows whose primary site starts with a prefix
//!   (default `"C18."`) and whose year of diagnosis is a plain year after 2014 or the
//!   `"1975-2021"` label.
//!
//! Column types are fixed by a [`types::Schema`]: `Int64`/`Float64` columns are numeric,
//! `Utf8` columns are categorical and `Bool` columns pass through untouched. Missing cells are
//! [`types::Value::Null`]. No operation mutates its input.
//!
//! ## Quick example: load, filter, preprocess
//!
//! ```no_run
//! use registry_prep::ingestion::ingest_csv_from_path;
//! use registry_prep::processing::{filter_dataframe, preprocess, FilterConfig};
//! use registry_prep::types::{DataType, Field, Schema};
//!
//! # fn main() -> Result<(), registry_prep::PrepError> {
//! let schema = Schema::new(vec![
//!     Field::new("Primary Site - labeled", DataType::Utf8),
//!     Field::new("Year of diagnosis", DataType::Utf8),
//!     Field::new("Age", DataType::Int64),
//!     Field::new("Sex", DataType::Utf8),
//! ]);
//! let ds = ingest_csv_from_path("seer_export.csv", &schema)?;
//! let colon = filter_dataframe(&ds, &FilterConfig::default())?;
//! let features = preprocess(&colon);
//! println!("rows={} columns={}", features.row_count(), features.column_count());
//! # Ok(())
//! # }
//! ```
//!
//! Preprocessing logs a completion line through the [`log`] facade at `info` level; attach a
//! [`processing::PreprocessObserver`] via [`processing::PreprocessOptions`] for structured
//! notification.
//!
//! ## Modules
//!
//! - [`types`]: schema + in-memory dataset types
//! - [`processing`]: preprocessing, row filtering, column statistics
//! - [`ingestion`]: CSV load/save
//! - [`error`]: the crate's error type

pub mod error;
pub mod ingestion;
pub mod processing;
pub mod types;

pub use error::{PrepError, PrepResult};
