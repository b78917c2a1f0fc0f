//! Chart Builder Module
//! Turns a filtered table into chart descriptors. Every builder is pure and
//! accepts empty tables, producing an empty chart rather than an error.

use crate::charts::model::{BoxGroup, Chart, ChartKind, Series, TableView};
use crate::data::{columns, DataProcessor, FilterError};
use crate::stats::StatsCalculator;
use polars::prelude::*;
use thiserror::Error;
use tracing::instrument;

#[derive(Error, Debug)]
pub enum ChartError {
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
    #[error("Filter error: {0}")]
    FilterError(#[from] FilterError),
}

pub const AGE_LABEL: &str = "Age";
pub const FREQUENCY_LABEL: &str = "Frequency";
pub const MMSE_LABEL: &str = "Mini-Mental State Examination (MMSE)";
pub const CDR_LABEL: &str = "Clinical Dementia Rating (CDR)";
pub const NWBV_LABEL: &str = "Normalized Whole-Brain Volume (nWBV)";
pub const VISIT_LABEL: &str = "Visit";

/// Builds chart descriptors from filtered tables.
pub struct ChartBuilder;

impl ChartBuilder {
    /// Histogram of ages with a density estimate scaled to bar counts.
    #[instrument(skip_all, fields(rows = df.height()))]
    pub fn age_distribution(df: &DataFrame) -> Result<Chart, ChartError> {
        let ages: Vec<f64> = DataProcessor::numeric_column(df, columns::AGE)?
            .into_iter()
            .flatten()
            .collect();

        let bins = StatsCalculator::histogram(&ages);
        let density = match bins.first() {
            Some(bin) => StatsCalculator::gaussian_kde(&ages, ages.len() as f64 * bin.width()),
            None => Vec::new(),
        };

        Ok(Chart::new(
            "age_distribution",
            "Age Distribution",
            AGE_LABEL,
            FREQUENCY_LABEL,
            ChartKind::Histogram { bins, density },
        ))
    }

    /// MMSE against CDR, one series per sex in first-appearance order.
    #[instrument(skip_all, fields(rows = df.height()))]
    pub fn mmse_vs_cdr(df: &DataFrame) -> Result<Chart, ChartError> {
        let mmse = DataProcessor::numeric_column(df, columns::MMSE)?;
        let cdr = DataProcessor::numeric_column(df, columns::CDR)?;
        let sex = DataProcessor::text_column(df, columns::SEX)?;

        let rows: Vec<(String, [f64; 2])> = sex
            .into_iter()
            .zip(mmse)
            .zip(cdr)
            .filter_map(|((s, m), c)| Some((s?, [m?, c?])))
            .collect();

        let categories = DataProcessor::unique_in_order(rows.iter().map(|(s, _)| s.clone()));
        let series = categories
            .into_iter()
            .map(|name| {
                let points = rows
                    .iter()
                    .filter(|(s, _)| *s == name)
                    .map(|(_, p)| *p)
                    .collect();
                Series { name, points }
            })
            .collect();

        Ok(Chart::new(
            "mmse_vs_cdr",
            "MMSE vs. CDR",
            MMSE_LABEL,
            CDR_LABEL,
            ChartKind::Scatter { series },
        ))
    }

    /// Normalized brain volume, one box per distinct CDR value in ascending order.
    #[instrument(skip_all, fields(rows = df.height()))]
    pub fn nwbv_by_cdr(df: &DataFrame) -> Result<Chart, ChartError> {
        let cdr = DataProcessor::numeric_column(df, columns::CDR)?;
        let nwbv = DataProcessor::numeric_column(df, columns::NWBV)?;

        let pairs: Vec<(f64, f64)> = cdr
            .into_iter()
            .zip(nwbv)
            .filter_map(|(c, v)| Some((c?, v?)))
            .collect();

        let mut levels: Vec<f64> = pairs.iter().map(|(c, _)| *c).collect();
        levels.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
        levels.dedup();

        let groups = levels
            .into_iter()
            .filter_map(|level| {
                let values: Vec<f64> = pairs
                    .iter()
                    .filter(|(c, _)| *c == level)
                    .map(|(_, v)| *v)
                    .collect();
                StatsCalculator::box_stats(&values).map(|stats| BoxGroup {
                    label: format!("{:.1}", level),
                    stats,
                })
            })
            .collect();

        Ok(Chart::new(
            "nwbv_by_cdr",
            "Normalized Brain Volume (nWBV) by Group",
            CDR_LABEL,
            NWBV_LABEL,
            ChartKind::BoxPlot { groups },
        ))
    }

    /// One MMSE line per subject, ordered by visit within each subject.
    #[instrument(skip_all, fields(rows = df.height()))]
    pub fn mmse_over_visits(df: &DataFrame) -> Result<Chart, ChartError> {
        let subjects = DataProcessor::text_column(df, columns::SUBJECT_ID)?;
        let visits = DataProcessor::numeric_column(df, columns::VISIT)?;
        let mmse = DataProcessor::numeric_column(df, columns::MMSE)?;

        let order = DataProcessor::unique_in_order(subjects.iter().flatten().cloned());
        let series = order
            .into_iter()
            .map(|name| {
                let mut points: Vec<[f64; 2]> = subjects
                    .iter()
                    .zip(visits.iter().zip(mmse.iter()))
                    .filter(|(s, _)| s.as_deref() == Some(name.as_str()))
                    .filter_map(|(_, (v, m))| Some([(*v)?, (*m)?]))
                    .collect();
                points.sort_by(|a, b| a[0].partial_cmp(&b[0]).unwrap_or(std::cmp::Ordering::Equal));
                Series { name, points }
            })
            .collect();

        Ok(Chart::new(
            "mmse_over_visits",
            "MMSE Over Time",
            VISIT_LABEL,
            MMSE_LABEL,
            ChartKind::Lines { series },
        ))
    }

    /// Pearson correlation between the clinical and volumetric columns.
    #[instrument(skip_all, fields(rows = df.height()))]
    pub fn correlation_heatmap(df: &DataFrame) -> Result<Chart, ChartError> {
        let data = columns::CORRELATION
            .iter()
            .map(|&name| Ok((name.to_string(), DataProcessor::numeric_column(df, name)?)))
            .collect::<Result<Vec<_>, PolarsError>>()?;

        let matrix = StatsCalculator::correlation_matrix(&data);

        Ok(Chart::new(
            "correlation_heatmap",
            "Correlation Map",
            "",
            "",
            ChartKind::Heatmap { matrix },
        ))
    }

    /// Every column and row of the table as display text.
    #[instrument(skip_all, fields(rows = df.height()))]
    pub fn raw_table(id: &'static str, title: &str, df: &DataFrame) -> Result<Chart, ChartError> {
        let columns: Vec<String> = df
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect();

        let rows = (0..df.height())
            .map(|i| {
                df.get_columns()
                    .iter()
                    .map(|col| col.get(i).map(|v| DataProcessor::cell_text(&v)))
                    .collect::<PolarsResult<Vec<String>>>()
            })
            .collect::<PolarsResult<Vec<_>>>()?;

        Ok(Chart::new(
            id,
            title,
            "",
            "",
            ChartKind::Table(TableView { columns, rows }),
        ))
    }

    /// Placeholder for a chart whose builder failed.
    pub fn unavailable(id: &'static str, title: &str, error: &ChartError) -> Chart {
        tracing::warn!("Chart '{}' unavailable: {}", id, error);
        Chart::new(
            id,
            title,
            "",
            "",
            ChartKind::Unavailable {
                reason: error.to_string(),
            },
        )
    }
}
