//! Range Filter Module
//! Inclusive numeric range predicates over a table column.

use polars::prelude::*;
use thiserror::Error;
use tracing::instrument;

#[derive(Error, Debug)]
pub enum FilterError {
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
}

/// Inclusive integer age range selected in the sidebar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AgeRange {
    pub lower: i64,
    pub upper: i64,
}

impl Default for AgeRange {
    fn default() -> Self {
        Self { lower: 0, upper: 0 }
    }
}

impl AgeRange {
    pub fn new(lower: i64, upper: i64) -> Self {
        Self { lower, upper }
    }

    /// Full range for optional observed bounds; an empty table gets `0..=0`.
    pub fn full(bounds: Option<AgeRange>) -> Self {
        bounds.unwrap_or_default()
    }

    pub fn contains(&self, value: f64) -> bool {
        self.lower as f64 <= value && value <= self.upper as f64
    }

    /// Keep both ends inside `bounds` and `lower <= upper`.
    ///
    /// When the ends cross, `upper` is pulled down to `lower`.
    pub fn clamped(self, bounds: AgeRange) -> Self {
        let lower = self.lower.clamp(bounds.lower, bounds.upper);
        let upper = self.upper.clamp(bounds.lower, bounds.upper).max(lower);
        Self { lower, upper }
    }
}

/// Session state: one independent age range per dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FilterState {
    pub cross_sectional: AgeRange,
    pub longitudinal: AgeRange,
}

/// Filters rows by an inclusive range on one column.
pub struct RangeFilter;

impl RangeFilter {
    /// Rows whose `column` value satisfies `lower <= value <= upper`.
    ///
    /// Nulls never match. Bounds that exclude every row produce an empty table.
    #[instrument(skip(df), fields(rows = df.height()))]
    pub fn filter(
        df: &DataFrame,
        column: &str,
        lower: f64,
        upper: f64,
    ) -> Result<DataFrame, FilterError> {
        let value = col(column).cast(DataType::Float64);
        let filtered = df
            .clone()
            .lazy()
            .filter(value.clone().gt_eq(lit(lower)).and(value.lt_eq(lit(upper))))
            .collect()?;

        tracing::debug!("Range filter kept {} of {} rows", filtered.height(), df.height());
        Ok(filtered)
    }

    /// Shorthand for filtering the age column by an [`AgeRange`].
    pub fn filter_age(df: &DataFrame, range: AgeRange) -> Result<DataFrame, FilterError> {
        Self::filter(
            df,
            crate::data::columns::AGE,
            range.lower as f64,
            range.upper as f64,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::columns;

    fn ages_table(ages: &[i64]) -> DataFrame {
        let ids: Vec<String> = (0..ages.len()).map(|i| format!("S{}", i + 1)).collect();
        DataFrame::new(vec![
            Column::new("ID".into(), ids),
            Column::new(columns::AGE.into(), ages.to_vec()),
        ])
        .unwrap()
    }

    fn ages_of(df: &DataFrame) -> Vec<i64> {
        df.column(columns::AGE)
            .unwrap()
            .i64()
            .unwrap()
            .into_iter()
            .flatten()
            .collect()
    }

    #[test]
    fn test_filter_selects_middle_row() {
        let df = ages_table(&[60, 70, 80]);
        let filtered = RangeFilter::filter(&df, columns::AGE, 65.0, 75.0).unwrap();
        assert_eq!(ages_of(&filtered), vec![70]);
    }

    #[test]
    fn test_filter_is_inclusive_on_both_ends() {
        let df = ages_table(&[60, 70, 80]);
        let filtered = RangeFilter::filter(&df, columns::AGE, 60.0, 70.0).unwrap();
        assert_eq!(ages_of(&filtered), vec![60, 70]);
    }

    #[test]
    fn test_full_range_returns_identical_table() {
        let df = ages_table(&[33, 60, 71, 71, 96]);
        let filtered = RangeFilter::filter_age(&df, AgeRange::new(33, 96)).unwrap();
        assert!(filtered.equals(&df));
    }

    #[test]
    fn test_range_outside_bounds_is_empty() {
        let df = ages_table(&[60, 70, 80]);

        let below = RangeFilter::filter(&df, columns::AGE, 10.0, 59.0).unwrap();
        assert_eq!(below.height(), 0);
        assert_eq!(below.width(), df.width());

        let above = RangeFilter::filter(&df, columns::AGE, 81.0, 120.0).unwrap();
        assert_eq!(above.height(), 0);
    }

    #[test]
    fn test_filter_is_sound_and_complete_for_every_range() {
        let ages = [18, 33, 45, 45, 60, 61, 72, 80, 96];
        let df = ages_table(&ages);

        for lower in 15..=100 {
            for upper in lower..=100 {
                let range = AgeRange::new(lower, upper);
                let filtered = RangeFilter::filter_age(&df, range).unwrap();
                let kept = ages_of(&filtered);
                let expected: Vec<i64> = ages
                    .iter()
                    .copied()
                    .filter(|&a| range.contains(a as f64))
                    .collect();
                assert_eq!(kept, expected, "range {:?}", range);
            }
        }
    }

    #[test]
    fn test_nulls_never_match() {
        let df = DataFrame::new(vec![Column::new(
            columns::AGE.into(),
            vec![Some(70i64), None, Some(72)],
        )])
        .unwrap();
        let filtered = RangeFilter::filter(&df, columns::AGE, 0.0, 200.0).unwrap();
        assert_eq!(filtered.height(), 2);
    }

    #[test]
    fn test_missing_column_is_an_error() {
        let df = ages_table(&[60]);
        assert!(RangeFilter::filter(&df, "Nope", 0.0, 100.0).is_err());
    }

    #[test]
    fn test_age_range_clamped() {
        let bounds = AgeRange::new(60, 90);
        assert_eq!(AgeRange::new(50, 100).clamped(bounds), bounds);
        assert_eq!(AgeRange::new(80, 70).clamped(bounds), AgeRange::new(80, 80));
        assert_eq!(AgeRange::new(65, 75).clamped(bounds), AgeRange::new(65, 75));
    }

    #[test]
    fn test_full_range_of_missing_bounds() {
        assert_eq!(AgeRange::full(None), AgeRange::new(0, 0));
        assert_eq!(
            AgeRange::full(Some(AgeRange::new(18, 96))),
            AgeRange::new(18, 96)
        );
    }
}
