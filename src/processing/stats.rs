//! Per-column statistics for [`crate::types::DataSet`].

use crate::types::{ColumnKind, DataSet, Value};

/// Built-in statistics over a single column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnStat {
    /// Count all rows (including nulls).
    Count,
    /// Arithmetic mean of numeric values, ignoring nulls.
    Mean,
    /// Median of numeric values, ignoring nulls.
    Median,
    /// Population standard deviation (divisor `n`) of numeric values, ignoring nulls.
    StdDev,
}

/// Compute a [`ColumnStat`] over `column`.
///
/// - Returns `None` if `column` does not exist in the schema.
/// - For `Mean`/`Median`/`StdDev`, returns `Some(Value::Null)` if the column is not numeric or
///   has no non-null values; otherwise `Some(Value::Float64(..))`.
/// - For `Count`, always returns `Some(Value::Int64(row_count))`.
pub fn column_stat(dataset: &DataSet, column: &str, stat: ColumnStat) -> Option<Value> {
    let idx = dataset.schema.index_of(column)?;
    if dataset.schema.fields[idx].kind() != ColumnKind::Numeric && stat != ColumnStat::Count {
        return Some(Value::Null);
    }

    let out = match stat {
        ColumnStat::Count => return Some(Value::Int64(dataset.row_count() as i64)),
        ColumnStat::Mean => mean(&numeric_values(dataset, idx)),
        ColumnStat::Median => median(&numeric_values(dataset, idx)),
        ColumnStat::StdDev => {
            let values = numeric_values(dataset, idx);
            mean(&values).map(|m| std_dev(&values, m))
        }
    };
    Some(out.map(Value::Float64).unwrap_or(Value::Null))
}

/// Non-missing numeric values of column `idx` (nulls and NaN skipped), in row order.
pub(crate) fn numeric_values(dataset: &DataSet, idx: usize) -> Vec<f64> {
    dataset.column(idx).filter_map(Value::as_f64).collect()
}

pub(crate) fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Median; the mean of the two middle values for even-length input.
pub(crate) fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    } else {
        Some(sorted[mid])
    }
}

pub(crate) fn std_dev(values: &[f64], mean: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let var = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / values.len() as f64;
    var.sqrt()
}
