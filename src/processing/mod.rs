//! In-memory dataset transformations.
//!
//! The processing layer operates on [`crate::types::DataSet`] values, typically produced by
//! [`crate::ingestion::csv`]. Every operation borrows its input and returns a new dataset.
//!
//! Currently implemented:
//!
//! - [`preprocess()`]: median imputation, one-hot encoding and standardization
//! - [`filter_dataframe()`]: site-prefix / diagnosis-year row filtering
//! - [`column_stat()`]: per-column count/mean/median/std-dev
//!
//! ## Example: filter → preprocess
//!
//! ```rust
//! use registry_prep::processing::{filter_dataframe, preprocess, FilterConfig};
//! use registry_prep::types::{DataSet, DataType, Field, Schema, Value};
//!
//! let schema = Schema::new(vec![
//!     Field::new("Primary Site - labeled", DataType::Utf8),
//!     Field::new("Year of diagnosis", DataType::Utf8),
//!     Field::new("Age", DataType::Int64),
//! ]);
//! let ds = DataSet::new(
//!     schema,
//!     vec![
//!         vec![Value::Utf8("C18.0".into()), Value::Utf8("2016".into()), Value::Int64(61)],
//!         vec![Value::Utf8("C18.7".into()), Value::Utf8("1975-2021".into()), Value::Null],
//!         vec![Value::Utf8("C34.1".into()), Value::Utf8("2019".into()), Value::Int64(70)],
//!     ],
//! );
//!
//! let colon = filter_dataframe(&ds, &FilterConfig::default()).unwrap();
//! assert_eq!(colon.row_count(), 2);
//!
//! let model_input = preprocess(&colon);
//! assert_eq!(model_input.row_count(), 2);
//! ```

pub mod filter;
pub mod observability;
pub mod preprocess;
pub mod stats;

pub use filter::{filter_dataframe, FilterConfig};
pub use observability::{
    CompositeObserver, FileObserver, PreprocessObserver, PreprocessStats, StdErrObserver,
};
pub use preprocess::{
    encode_one_hot, impute_median, preprocess, preprocess_with_options, standardize,
    PreprocessOptions,
};
pub use stats::{column_stat, ColumnStat};
