//! Median imputation, one-hot encoding and standardization.
//!
//! [`preprocess`] runs the three steps in a fixed order:
//!
//! 1. [`impute_median`]: nulls in numeric columns become the column median.
//! 2. [`encode_one_hot`]: categorical columns become `Int64` indicator columns, dropping the
//!    lexicographically first category of each column.
//! 3. [`standardize`]: every numeric column, indicator columns included, is mapped to zero
//!    mean and unit (population) standard deviation.
//!
//! Every step takes the dataset by reference and returns a new one; the input is never
//! modified.

use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

use log::{debug, info};

use crate::types::{ColumnKind, DataSet, DataType, Field, Schema, Value};

use super::observability::{PreprocessObserver, PreprocessStats};
use super::stats::{mean, median, numeric_values, std_dev};

/// Options controlling [`preprocess_with_options`].
///
/// Use [`Default`] for common cases.
#[derive(Clone, Default)]
pub struct PreprocessOptions {
    /// Optional observer notified when preprocessing completes.
    pub observer: Option<Arc<dyn PreprocessObserver>>,
}

impl fmt::Debug for PreprocessOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PreprocessOptions")
            .field("observer_set", &self.observer.is_some())
            .finish()
    }
}

/// Impute, encode and standardize `dataset` with default options.
///
/// The row count is preserved. Categorical columns are replaced by indicator columns, and
/// every numeric column of the result is `Float64`.
///
/// ```rust
/// use registry_prep::processing::preprocess;
/// use registry_prep::types::{DataSet, DataType, Field, Schema, Value};
///
/// let schema = Schema::new(vec![
///     Field::new("age", DataType::Float64),
///     Field::new("stage", DataType::Utf8),
/// ]);
/// let ds = DataSet::new(
///     schema,
///     vec![
///         vec![Value::Float64(40.0), Value::Utf8("A".to_string())],
///         vec![Value::Null, Value::Utf8("B".to_string())],
///         vec![Value::Float64(60.0), Value::Utf8("A".to_string())],
///     ],
/// );
///
/// let out = preprocess(&ds);
/// assert_eq!(out.row_count(), 3);
/// assert_eq!(out.schema.field_names().collect::<Vec<_>>(), vec!["age", "stage_B"]);
/// ```
pub fn preprocess(dataset: &DataSet) -> DataSet {
    preprocess_with_options(dataset, &PreprocessOptions::default())
}

/// Like [`preprocess`], reporting completion to `options.observer` if one is set.
pub fn preprocess_with_options(dataset: &DataSet, options: &PreprocessOptions) -> DataSet {
    let (imputed, imputed_cells) = impute_median_counted(dataset);
    let (encoded, indicator_columns) = encode_one_hot_counted(&imputed);
    let out = standardize(&encoded);

    let stats = PreprocessStats {
        rows: out.row_count(),
        input_columns: dataset.column_count(),
        output_columns: out.column_count(),
        imputed_cells,
        indicator_columns,
    };
    info!(
        "data preprocessing completed: rows={} columns={}->{}",
        stats.rows, stats.input_columns, stats.output_columns
    );
    if let Some(observer) = &options.observer {
        observer.on_preprocessed(&stats);
    }

    out
}

/// Replace nulls in every numeric column with the median of that column's non-null values.
///
/// An `Int64` column that contained nulls is promoted to `Float64`. A column with no
/// non-null values has no median and is left as is.
pub fn impute_median(dataset: &DataSet) -> DataSet {
    impute_median_counted(dataset).0
}

fn impute_median_counted(dataset: &DataSet) -> (DataSet, usize) {
    let mut out = dataset.clone();
    let mut imputed = 0;

    for idx in dataset.schema.indexes_of_kind(ColumnKind::Numeric) {
        if !dataset.column(idx).any(Value::is_null) {
            continue;
        }
        let Some(fill) = median(&numeric_values(dataset, idx)) else {
            debug!(
                "column '{}' has no values; median undefined",
                dataset.schema.fields[idx].name
            );
            continue;
        };

        out.schema.fields[idx].data_type = DataType::Float64;
        for row in &mut out.rows {
            let Some(cell) = row.get_mut(idx) else {
                continue;
            };
            match cell.as_f64() {
                Some(v) => *cell = Value::Float64(v),
                None if cell.is_null() => {
                    *cell = Value::Float64(fill);
                    imputed += 1;
                }
                None => {}
            }
        }
    }

    (out, imputed)
}

/// One-hot encode every categorical column, dropping each column's first category.
///
/// Categories are the distinct non-null values of the column, sorted lexicographically.
/// Indicator columns are named `"{column}_{category}"`, typed `Int64`, and appended after the
/// non-categorical columns (which keep their relative order). Null cells encode as all zeros.
pub fn encode_one_hot(dataset: &DataSet) -> DataSet {
    encode_one_hot_counted(dataset).0
}

fn encode_one_hot_counted(dataset: &DataSet) -> (DataSet, usize) {
    let cat_idxs = dataset.schema.indexes_of_kind(ColumnKind::Categorical);
    if cat_idxs.is_empty() {
        return (dataset.clone(), 0);
    }

    let keep_idxs: Vec<usize> = (0..dataset.column_count())
        .filter(|idx| !cat_idxs.contains(idx))
        .collect();

    // (source column, retained categories) in schema order.
    let encodings: Vec<(usize, Vec<String>)> = cat_idxs
        .iter()
        .map(|&idx| {
            let categories: BTreeSet<String> = dataset
                .column(idx)
                .filter_map(|v| v.as_text().map(|s| s.into_owned()))
                .collect();
            (idx, categories.into_iter().skip(1).collect())
        })
        .collect();

    let mut fields: Vec<Field> = keep_idxs
        .iter()
        .map(|&idx| dataset.schema.fields[idx].clone())
        .collect();
    let mut indicator_columns = 0;
    for (idx, categories) in &encodings {
        let name = &dataset.schema.fields[*idx].name;
        for category in categories {
            fields.push(Field::new(format!("{name}_{category}"), DataType::Int64));
            indicator_columns += 1;
        }
    }

    let rows = dataset
        .rows
        .iter()
        .map(|row| {
            let mut out: Vec<Value> = Vec::with_capacity(fields.len());
            out.extend(
                keep_idxs
                    .iter()
                    .map(|&idx| row.get(idx).cloned().unwrap_or(Value::Null)),
            );
            for (idx, categories) in &encodings {
                let text = row.get(*idx).and_then(Value::as_text);
                for category in categories {
                    let hit = text.as_deref() == Some(category.as_str());
                    out.push(Value::Int64(i64::from(hit)));
                }
            }
            out
        })
        .collect();

    debug!(
        "encoded {} categorical column(s) into {} indicator column(s)",
        cat_idxs.len(),
        indicator_columns
    );
    (DataSet::new(Schema::new(fields), rows), indicator_columns)
}

/// Standardize every numeric column to zero mean and unit population standard deviation.
///
/// Statistics come from the column's non-null values; nulls stay null. A column with zero
/// variance is centered only (scale `1.0`). All numeric columns become `Float64`.
pub fn standardize(dataset: &DataSet) -> DataSet {
    let mut out = dataset.clone();

    for idx in dataset.schema.indexes_of_kind(ColumnKind::Numeric) {
        out.schema.fields[idx].data_type = DataType::Float64;

        let values = numeric_values(dataset, idx);
        let Some(center) = mean(&values) else {
            continue;
        };
        let sd = std_dev(&values, center);
        let scale = if sd <= 10.0 * f64::EPSILON { 1.0 } else { sd };

        for row in &mut out.rows {
            if let Some(cell) = row.get_mut(idx) {
                if let Some(v) = cell.as_f64() {
                    *cell = Value::Float64((v - center) / scale);
                }
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;

    fn f(v: &Value) -> f64 {
        match v {
            Value::Float64(x) => *x,
            other => panic!("expected Float64, got {other:?}"),
        }
    }

    fn registry_sample() -> DataSet {
        let schema = Schema::new(vec![
            Field::new("age", DataType::Int64),
            Field::new("sex", DataType::Utf8),
            Field::new("tumor_size", DataType::Float64),
            Field::new("surgery", DataType::Bool),
        ]);
        let rows = vec![
            vec![
                Value::Int64(50),
                Value::Utf8("Female".to_string()),
                Value::Float64(12.0),
                Value::Bool(true),
            ],
            vec![
                Value::Null,
                Value::Utf8("Male".to_string()),
                Value::Float64(30.0),
                Value::Bool(false),
            ],
            vec![
                Value::Int64(70),
                Value::Utf8("Female".to_string()),
                Value::Null,
                Value::Bool(true),
            ],
            vec![
                Value::Int64(80),
                Value::Null,
                Value::Float64(18.0),
                Value::Bool(false),
            ],
        ];
        DataSet::new(schema, rows)
    }

    #[test]
    fn impute_fills_nulls_with_median_and_promotes_int() {
        let ds = registry_sample();
        let out = impute_median(&ds);

        assert_eq!(out.schema.fields[0].data_type, DataType::Float64);
        assert_eq!(
            out.column(0).cloned().collect::<Vec<_>>(),
            vec![
                Value::Float64(50.0),
                Value::Float64(70.0),
                Value::Float64(70.0),
                Value::Float64(80.0),
            ]
        );
        // Median of 12, 18, 30
        assert_eq!(out.rows[2][2], Value::Float64(18.0));
        // Categorical and bool columns untouched
        assert_eq!(out.rows[3][1], Value::Null);
        assert_eq!(out.rows[0][3], Value::Bool(true));
        // Input unchanged
        assert_eq!(ds.rows[1][0], Value::Null);
        assert_eq!(ds.schema.fields[0].data_type, DataType::Int64);
    }

    #[test]
    fn impute_uses_mean_of_middle_pair_for_even_count() {
        let schema = Schema::new(vec![Field::new("x", DataType::Float64)]);
        let ds = DataSet::new(
            schema,
            vec![
                vec![Value::Float64(1.0)],
                vec![Value::Float64(4.0)],
                vec![Value::Null],
                vec![Value::Float64(2.0)],
                vec![Value::Float64(10.0)],
            ],
        );
        let out = impute_median(&ds);
        assert_eq!(out.rows[2][0], Value::Float64(3.0));
    }

    #[test]
    fn nan_cells_count_as_missing() {
        let schema = Schema::new(vec![Field::new("tumor_size", DataType::Float64)]);
        let ds = DataSet::new(
            schema,
            vec![
                vec![Value::Float64(10.0)],
                vec![Value::Float64(f64::NAN)],
                vec![Value::Float64(30.0)],
            ],
        );

        let imputed = impute_median(&ds);
        assert_eq!(imputed.rows[1][0], Value::Float64(20.0));

        let out = preprocess(&ds);
        let z = 10.0 / (200.0f64 / 3.0).sqrt();
        assert!((f(&out.rows[0][0]) + z).abs() < 1e-12);
        assert!(f(&out.rows[1][0]).abs() < 1e-12);
        assert!((f(&out.rows[2][0]) - z).abs() < 1e-12);
    }

    #[test]
    fn impute_leaves_int_column_without_nulls_alone() {
        let schema = Schema::new(vec![Field::new("n", DataType::Int64)]);
        let ds = DataSet::new(schema, vec![vec![Value::Int64(1)], vec![Value::Int64(2)]]);
        assert_eq!(impute_median(&ds), ds);
    }

    #[test]
    fn all_missing_numeric_column_stays_missing() {
        let schema = Schema::new(vec![
            Field::new("empty", DataType::Float64),
            Field::new("x", DataType::Float64),
        ]);
        let ds = DataSet::new(
            schema,
            vec![
                vec![Value::Null, Value::Float64(1.0)],
                vec![Value::Null, Value::Float64(3.0)],
            ],
        );

        let imputed = impute_median(&ds);
        assert!(imputed.column(0).all(Value::is_null));

        let out = preprocess(&ds);
        assert!(out.column(0).all(Value::is_null));
        assert_eq!(out.schema.fields[0].data_type, DataType::Float64);
        assert_eq!(out.rows[0][1], Value::Float64(-1.0));
        assert_eq!(out.rows[1][1], Value::Float64(1.0));
    }

    #[test]
    fn encode_drops_first_category_and_appends_indicators() {
        let ds = impute_median(&registry_sample());
        let out = encode_one_hot(&ds);

        assert_eq!(
            out.schema.field_names().collect::<Vec<_>>(),
            vec!["age", "tumor_size", "surgery", "sex_Male"]
        );
        assert_eq!(out.schema.fields[3].data_type, DataType::Int64);
        assert_eq!(
            out.column(3).cloned().collect::<Vec<_>>(),
            vec![Value::Int64(0), Value::Int64(1), Value::Int64(0), Value::Int64(0)]
        );
    }

    #[test]
    fn encode_single_category_column_yields_no_indicators() {
        let schema = Schema::new(vec![
            Field::new("grade", DataType::Utf8),
            Field::new("x", DataType::Float64),
        ]);
        let ds = DataSet::new(
            schema,
            vec![
                vec![Value::Utf8("II".to_string()), Value::Float64(1.0)],
                vec![Value::Utf8("II".to_string()), Value::Float64(2.0)],
            ],
        );
        let out = encode_one_hot(&ds);
        assert_eq!(out.schema.field_names().collect::<Vec<_>>(), vec!["x"]);
        assert_eq!(out.rows, vec![vec![Value::Float64(1.0)], vec![Value::Float64(2.0)]]);
    }

    #[test]
    fn encode_groups_indicators_by_source_column() {
        let schema = Schema::new(vec![
            Field::new("race", DataType::Utf8),
            Field::new("stage", DataType::Utf8),
        ]);
        let ds = DataSet::new(
            schema,
            vec![
                vec![Value::Utf8("White".to_string()), Value::Utf8("Local".to_string())],
                vec![Value::Utf8("Black".to_string()), Value::Utf8("Distant".to_string())],
                vec![Value::Utf8("Other".to_string()), Value::Utf8("Regional".to_string())],
            ],
        );
        let out = encode_one_hot(&ds);
        assert_eq!(
            out.schema.field_names().collect::<Vec<_>>(),
            vec!["race_Other", "race_White", "stage_Local", "stage_Regional"]
        );
        assert_eq!(
            out.rows[1],
            vec![Value::Int64(0), Value::Int64(0), Value::Int64(0), Value::Int64(0)]
        );
    }

    #[test]
    fn standardize_zero_mean_unit_std() {
        let schema = Schema::new(vec![Field::new("x", DataType::Int64)]);
        let ds = DataSet::new(
            schema,
            vec![vec![Value::Int64(2)], vec![Value::Int64(4)], vec![Value::Int64(6)]],
        );
        let out = standardize(&ds);
        let sd = (8.0f64 / 3.0).sqrt();

        assert_eq!(out.schema.fields[0].data_type, DataType::Float64);
        assert!((f(&out.rows[0][0]) + 2.0 / sd).abs() < 1e-12);
        assert!(f(&out.rows[1][0]).abs() < 1e-12);
        assert!((f(&out.rows[2][0]) - 2.0 / sd).abs() < 1e-12);
    }

    #[test]
    fn standardize_constant_column_centers_only() {
        let schema = Schema::new(vec![Field::new("x", DataType::Float64)]);
        let ds = DataSet::new(schema, vec![vec![Value::Float64(7.0)]; 3]);
        let out = standardize(&ds);
        assert!(out.column(0).all(|v| v == &Value::Float64(0.0)));
    }

    #[test]
    fn indicator_columns_are_standardized_too() {
        let schema = Schema::new(vec![Field::new("grade", DataType::Utf8)]);
        let ds = DataSet::new(
            schema,
            vec![
                vec![Value::Utf8("A".to_string())],
                vec![Value::Utf8("B".to_string())],
                vec![Value::Utf8("A".to_string())],
            ],
        );

        let encoded = encode_one_hot(&ds);
        assert_eq!(
            encoded.column(0).cloned().collect::<Vec<_>>(),
            vec![Value::Int64(0), Value::Int64(1), Value::Int64(0)]
        );

        let out = preprocess(&ds);
        assert_eq!(out.schema.field_names().collect::<Vec<_>>(), vec!["grade_B"]);
        // mean 1/3, population std sqrt(2)/3
        let sd = 2f64.sqrt() / 3.0;
        assert!((f(&out.rows[0][0]) - (-1.0 / 3.0) / sd).abs() < 1e-12);
        assert!((f(&out.rows[1][0]) - (2.0 / 3.0) / sd).abs() < 1e-12);
    }

    #[test]
    fn preprocess_passes_through_bool_only_dataset() {
        let schema = Schema::new(vec![Field::new("flag", DataType::Bool)]);
        let ds = DataSet::new(schema, vec![vec![Value::Bool(true)], vec![Value::Bool(false)]]);
        assert_eq!(preprocess(&ds), ds);
    }

    #[test]
    fn preprocess_empty_dataset() {
        let schema = Schema::new(vec![
            Field::new("x", DataType::Float64),
            Field::new("c", DataType::Utf8),
        ]);
        let ds = DataSet::new(schema, Vec::new());
        let out = preprocess(&ds);
        assert_eq!(out.row_count(), 0);
        assert_eq!(out.schema.field_names().collect::<Vec<_>>(), vec!["x"]);
    }

    #[derive(Default)]
    struct Recording(Mutex<Vec<PreprocessStats>>);

    impl PreprocessObserver for Recording {
        fn on_preprocessed(&self, stats: &PreprocessStats) {
            self.0.lock().unwrap().push(*stats);
        }
    }

    #[test]
    fn observer_receives_completion_stats() {
        let obs = Arc::new(Recording::default());
        let opts = PreprocessOptions {
            observer: Some(obs.clone()),
        };

        let out = preprocess_with_options(&registry_sample(), &opts);

        let seen = obs.0.lock().unwrap().clone();
        assert_eq!(
            seen,
            vec![PreprocessStats {
                rows: 4,
                input_columns: 4,
                output_columns: out.column_count(),
                imputed_cells: 2,
                indicator_columns: 1,
            }]
        );
        assert_eq!(format!("{opts:?}"), "PreprocessOptions { observer_set: true }");
    }
}
