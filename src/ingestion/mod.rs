//! Loading and saving datasets.
//!
//! Table construction is the caller's business; this module covers the common case of a
//! registry case listing exported as CSV:
//! - [`csv::ingest_csv_from_path`] / [`csv::ingest_csv_from_reader`]
//! - [`csv::write_csv_to_path`] / [`csv::write_csv_to_writer`]

pub mod csv;

pub use self::csv::{
    ingest_csv_from_path, ingest_csv_from_reader, write_csv_to_path, write_csv_to_writer,
};
