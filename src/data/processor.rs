//! Data Processor Module
//! Pulls typed column values and display text out of Polars tables.

use polars::prelude::*;

/// Column extraction helpers shared by the chart builders.
pub struct DataProcessor;

impl DataProcessor {
    /// Column values as `f64`, with nulls and NaN mapped to `None`.
    pub fn numeric_column(df: &DataFrame, name: &str) -> PolarsResult<Vec<Option<f64>>> {
        let values = df.column(name)?.cast(&DataType::Float64)?;
        let values = values.f64()?;
        Ok(values
            .into_iter()
            .map(|v| v.filter(|v| !v.is_nan()))
            .collect())
    }

    /// Column values as trimmed strings, with nulls and blanks mapped to `None`.
    pub fn text_column(df: &DataFrame, name: &str) -> PolarsResult<Vec<Option<String>>> {
        let values = df.column(name)?.cast(&DataType::String)?;
        let values = values.str()?;
        Ok(values
            .into_iter()
            .map(|v| {
                v.map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
            })
            .collect())
    }

    /// Display text of a single cell; nulls render as an empty string.
    pub fn cell_text(value: &AnyValue) -> String {
        match value {
            AnyValue::Null => String::new(),
            AnyValue::String(s) => s.to_string(),
            AnyValue::StringOwned(s) => s.to_string(),
            AnyValue::Float64(v) if v.is_nan() => String::new(),
            AnyValue::Float32(v) if v.is_nan() => String::new(),
            other => other.to_string().trim_matches('"').to_string(),
        }
    }

    /// Distinct non-null values in first-appearance order.
    pub fn unique_in_order<T: PartialEq + Clone>(values: impl IntoIterator<Item = T>) -> Vec<T> {
        let mut seen: Vec<T> = Vec::new();
        for v in values {
            if !seen.contains(&v) {
                seen.push(v);
            }
        }
        seen
    }
}
