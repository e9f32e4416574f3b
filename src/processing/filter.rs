//! Site-code / diagnosis-year row filtering for registry exports.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{PrepError, PrepResult};
use crate::types::{DataSet, Value};

/// Configuration for [`filter_dataframe`].
///
/// Every field has a default, so a partial JSON document such as
/// `{"site_prefix": "C50."}` deserializes into a complete config.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    /// Required prefix of the site value. Default: `"C18."`.
    pub site_prefix: String,
    /// Column holding the diagnosis year. Default: `"Year of diagnosis"`.
    pub year_column: String,
    /// Column holding the labeled primary site. Default: `"Primary Site - labeled"`.
    pub site_column: String,
    /// Plain-digit years must be strictly greater than this. Default: `2014`.
    pub min_year_exclusive: u64,
    /// Year label that is always accepted. Default: `"1975-2021"`.
    pub all_years_label: String,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            site_prefix: "C18.".to_string(),
            year_column: "Year of diagnosis".to_string(),
            site_column: "Primary Site - labeled".to_string(),
            min_year_exclusive: 2014,
            all_years_label: "1975-2021".to_string(),
        }
    }
}

impl FilterConfig {
    /// Parse a config from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    fn site_matches(&self, value: &Value) -> bool {
        value
            .as_text()
            .is_some_and(|s| s.starts_with(self.site_prefix.as_str()))
    }

    /// Only ASCII digits count as a plain year; other Unicode decimal digits (e.g. full-width
    /// `２０１６`) are rejected.
    fn year_matches(&self, value: &Value) -> bool {
        let Some(text) = value.as_text() else {
            return false;
        };
        if text == self.all_years_label.as_str() {
            return true;
        }
        if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
            return false;
        }
        // Digit strings that overflow u64 are larger than any threshold.
        text.parse::<u64>()
            .map_or(true, |year| year > self.min_year_exclusive)
    }
}

/// Keep rows whose site value starts with `config.site_prefix` and whose year value is either
/// a plain digit string greater than `config.min_year_exclusive` or exactly
/// `config.all_years_label`.
///
/// Values are compared as text without trimming or case folding; null cells never match.
/// Plain years must be ASCII digits, and float cells render with a fractional part
/// (`2016.0`), so they never count as plain years.
/// The schema and the relative row order are preserved.
///
/// # Errors
///
/// Returns [`PrepError::MissingColumns`] if either configured column is absent. No rows are
/// scanned in that case.
///
/// ```rust
/// use registry_prep::processing::{filter_dataframe, FilterConfig};
/// use registry_prep::types::{DataSet, DataType, Field, Schema, Value};
///
/// let schema = Schema::new(vec![
///     Field::new("Primary Site - labeled", DataType::Utf8),
///     Field::new("Year of diagnosis", DataType::Utf8),
/// ]);
/// let row = |site: &str, year: &str| vec![Value::Utf8(site.into()), Value::Utf8(year.into())];
/// let ds = DataSet::new(
///     schema,
///     vec![row("C18.1", "2016"), row("C16.0", "2020"), row("C18.9", "2010")],
/// );
///
/// let out = filter_dataframe(&ds, &FilterConfig::default())?;
/// assert_eq!(out.rows, vec![row("C18.1", "2016")]);
/// # Ok::<(), registry_prep::PrepError>(())
/// ```
pub fn filter_dataframe(dataset: &DataSet, config: &FilterConfig) -> PrepResult<DataSet> {
    let (Some(site_idx), Some(year_idx)) = (
        dataset.schema.index_of(&config.site_column),
        dataset.schema.index_of(&config.year_column),
    ) else {
        return Err(PrepError::MissingColumns {
            site_column: config.site_column.clone(),
            year_column: config.year_column.clone(),
        });
    };

    let out = dataset.filter_rows(|row| {
        row.get(site_idx).is_some_and(|v| config.site_matches(v))
            && row.get(year_idx).is_some_and(|v| config.year_matches(v))
    });

    debug!(
        "site/year filter kept {} of {} rows",
        out.row_count(),
        dataset.row_count()
    );
    Ok(out)
}
