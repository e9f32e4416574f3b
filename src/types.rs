//! Core data model types.
//!
//! Every transformation in this crate operates on an in-memory [`DataSet`] whose column types
//! are fixed up front by a [`Schema`] (a list of typed [`Field`]s).

use std::borrow::Cow;

/// Logical data type for a schema field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataType {
    /// 64-bit signed integer.
    Int64,
    /// 64-bit floating point number.
    Float64,
    /// Boolean.
    Bool,
    /// UTF-8 string.
    Utf8,
}

/// How the preprocessor treats a column, derived from its [`DataType`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    /// Imputed and standardized (`Int64`, `Float64`).
    Numeric,
    /// One-hot encoded (`Utf8`).
    Categorical,
    /// Passed through unchanged (`Bool`).
    Other,
}

impl DataType {
    /// Classify this type for preprocessing.
    pub fn kind(&self) -> ColumnKind {
        match self {
            DataType::Int64 | DataType::Float64 => ColumnKind::Numeric,
            DataType::Utf8 => ColumnKind::Categorical,
            DataType::Bool => ColumnKind::Other,
        }
    }
}

/// A single named, typed field in a [`Schema`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    /// Field/column name.
    pub name: String,
    /// Field data type.
    pub data_type: DataType,
}

impl Field {
    /// Create a new field.
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            data_type,
        }
    }

    /// Shorthand for `self.data_type.kind()`.
    pub fn kind(&self) -> ColumnKind {
        self.data_type.kind()
    }
}

/// A list of fields describing the shape of a [`DataSet`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    /// Ordered list of fields.
    pub fields: Vec<Field>,
}

impl Schema {
    /// Create a new schema from fields.
    pub fn new(fields: Vec<Field>) -> Self {
        Self { fields }
    }

    /// Iterate field names in order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }

    /// Returns the index of a field by name, if present.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }

    /// Indexes of all fields of the given [`ColumnKind`], in schema order.
    pub fn indexes_of_kind(&self, kind: ColumnKind) -> Vec<usize> {
        self.fields
            .iter()
            .enumerate()
            .filter(|(_, f)| f.kind() == kind)
            .map(|(idx, _)| idx)
            .collect()
    }
}

/// A single typed value in a [`DataSet`].
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Missing/empty value. A `Float64(NaN)` is treated as missing too.
    Null,
    /// 64-bit signed integer.
    Int64(i64),
    /// 64-bit float.
    Float64(f64),
    /// Boolean.
    Bool(bool),
    /// UTF-8 string.
    Utf8(String),
}

impl Value {
    /// Returns `true` for missing values: [`Value::Null`] and `Float64(NaN)`.
    pub fn is_null(&self) -> bool {
        match self {
            Value::Null => true,
            Value::Float64(v) => v.is_nan(),
            _ => false,
        }
    }

    /// Numeric view of the value. `None` for missing and non-numeric values.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int64(v) => Some(*v as f64),
            Value::Float64(v) if !v.is_nan() => Some(*v),
            _ => None,
        }
    }

    /// Text rendering used for prefix/label matching. `None` for missing values.
    ///
    /// Strings are returned verbatim (no trimming or case folding). Integral floats keep a
    /// fractional digit (`2016.0`), so they never read as a plain digit string.
    pub fn as_text(&self) -> Option<Cow<'_, str>> {
        match self {
            Value::Null => None,
            Value::Float64(v) if v.is_nan() => None,
            Value::Utf8(s) => Some(Cow::Borrowed(s.as_str())),
            Value::Int64(v) => Some(Cow::Owned(v.to_string())),
            Value::Float64(v) => Some(Cow::Owned(float_text(*v))),
            Value::Bool(v) => Some(Cow::Owned(v.to_string())),
        }
    }
}

fn float_text(v: f64) -> String {
    if v.fract() == 0.0 && v.abs() < 1e16 {
        format!("{v:.1}")
    } else {
        v.to_string()
    }
}

static NULL: Value = Value::Null;

/// In-memory tabular dataset.
///
/// Rows are stored as `Vec<Vec<Value>>` in the same order as the [`Schema`] fields.
#[derive(Debug, Clone, PartialEq)]
pub struct DataSet {
    /// Schema describing row shape.
    pub schema: Schema,
    /// Row-major value storage.
    pub rows: Vec<Vec<Value>>,
}

impl DataSet {
    /// Create a dataset from schema and rows.
    pub fn new(schema: Schema, rows: Vec<Vec<Value>>) -> Self {
        Self { schema, rows }
    }

    /// Number of rows in the dataset.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns in the dataset.
    pub fn column_count(&self) -> usize {
        self.schema.fields.len()
    }

    /// Iterate the values of column `idx`, one per row. Short rows yield [`Value::Null`].
    pub fn column(&self, idx: usize) -> impl Iterator<Item = &Value> {
        self.rows
            .iter()
            .map(move |row| row.get(idx).unwrap_or(&NULL))
    }

    /// Create a new dataset containing only rows that match `predicate`.
    ///
    /// The returned dataset preserves the original schema and row order.
    pub fn filter_rows<F>(&self, mut predicate: F) -> Self
    where
        F: FnMut(&[Value]) -> bool,
    {
        let rows = self
            .rows
            .iter()
            .filter(|row| predicate(row.as_slice()))
            .cloned()
            .collect();
        Self {
            schema: self.schema.clone(),
            rows,
        }
    }
}
