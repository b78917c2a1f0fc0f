//! CSV Data Loader Module
//! Reads the two OASIS tables with Polars and memoizes them for the process lifetime.

use crate::data::columns;
use crate::data::filter::AgeRange;
use polars::prelude::*;
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};
use thiserror::Error;
use tracing::instrument;

/// Default location of the cross-sectional table, relative to the working directory.
pub const CROSS_SECTIONAL_CSV: &str = "oasis_cross-sectional.csv";
/// Default location of the longitudinal table, relative to the working directory.
pub const LONGITUDINAL_CSV: &str = "oasis_longitudinal.csv";

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Failed to load CSV '{path}': {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: PolarsError,
    },
    #[error("CSV file not found: {0}")]
    NotFound(PathBuf),
}

/// Paths of the two input tables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataPaths {
    pub cross_sectional: PathBuf,
    pub longitudinal: PathBuf,
}

impl Default for DataPaths {
    fn default() -> Self {
        Self {
            cross_sectional: PathBuf::from(CROSS_SECTIONAL_CSV),
            longitudinal: PathBuf::from(LONGITUDINAL_CSV),
        }
    }
}

/// Both tables, read-only for the rest of the session.
#[derive(Debug, Clone)]
pub struct DashboardData {
    pub cross_sectional: DataFrame,
    pub longitudinal: DataFrame,
}

impl DashboardData {
    /// Observed age bounds of the cross-sectional table.
    pub fn cross_sectional_age_bounds(&self) -> Option<AgeRange> {
        age_bounds(&self.cross_sectional)
    }

    /// Observed age bounds of the longitudinal table.
    pub fn longitudinal_age_bounds(&self) -> Option<AgeRange> {
        age_bounds(&self.longitudinal)
    }
}

/// Observed integer min/max of the age column, ignoring nulls.
///
/// Returns `None` when the table is empty or has no usable age column.
pub fn age_bounds(df: &DataFrame) -> Option<AgeRange> {
    let ages = df
        .column(columns::AGE)
        .ok()?
        .cast(&DataType::Float64)
        .ok()?;
    let ages = ages.f64().ok()?;

    let (min, max) = ages
        .into_iter()
        .flatten()
        .filter(|v| !v.is_nan())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });

    if min.is_infinite() || max.is_infinite() {
        return None;
    }

    Some(AgeRange::new(min.floor() as i64, max.ceil() as i64))
}

/// Loads the dashboard tables once and hands out shared references afterwards.
pub struct DataLoader {
    paths: DataPaths,
    cache: OnceLock<Arc<DashboardData>>,
}

impl DataLoader {
    pub fn new(paths: DataPaths) -> Self {
        Self {
            paths,
            cache: OnceLock::new(),
        }
    }

    pub fn paths(&self) -> &DataPaths {
        &self.paths
    }

    /// Load both tables, reading from disk only on the first successful call.
    pub fn load(&self) -> Result<Arc<DashboardData>, LoaderError> {
        if let Some(data) = self.cache.get() {
            tracing::debug!("Serving dashboard data from cache");
            return Ok(Arc::clone(data));
        }

        let (cross_sectional, longitudinal) = rayon::join(
            || Self::load_csv(&self.paths.cross_sectional),
            || Self::load_csv(&self.paths.longitudinal),
        );

        let data = Arc::new(DashboardData {
            cross_sectional: cross_sectional?,
            longitudinal: longitudinal?,
        });

        // A racing caller may have filled the cache first; keep whichever landed.
        Ok(Arc::clone(self.cache.get_or_init(|| data)))
    }

    /// Read a single comma-separated file with a header row.
    #[instrument]
    pub fn load_csv(path: &Path) -> Result<DataFrame, LoaderError> {
        if !path.is_file() {
            return Err(LoaderError::NotFound(path.to_path_buf()));
        }

        let df = LazyCsvReader::new(path)
            .with_has_header(true)
            .with_infer_schema_length(Some(10000))
            .finish()
            .and_then(|lazy| lazy.collect())
            .map_err(|source| LoaderError::Csv {
                path: path.to_path_buf(),
                source,
            })?;

        tracing::info!(
            "Loaded {} rows, {} columns from {}",
            df.height(),
            df.width(),
            path.display()
        );

        Ok(df)
    }
}
