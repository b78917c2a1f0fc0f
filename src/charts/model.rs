//! Chart descriptors
//! Plain data handed from the builders to the plotter. Nothing here touches egui.

use crate::stats::{BoxStats, CorrelationMatrix, HistogramBin};

/// A named sequence of `[x, y]` points.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub name: String,
    pub points: Vec<[f64; 2]>,
}

/// One box of a box plot, labelled by its category.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxGroup {
    pub label: String,
    pub stats: BoxStats,
}

/// Verbatim text rendering of a table.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TableView {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl TableView {
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ChartKind {
    /// Count histogram with an overlaid density curve (already scaled to counts).
    Histogram {
        bins: Vec<HistogramBin>,
        density: Vec<[f64; 2]>,
    },
    Scatter {
        series: Vec<Series>,
    },
    BoxPlot {
        groups: Vec<BoxGroup>,
    },
    Lines {
        series: Vec<Series>,
    },
    Heatmap {
        matrix: CorrelationMatrix,
    },
    Table(TableView),
    /// The chart could not be built from this table; drawn as a placeholder.
    Unavailable {
        reason: String,
    },
}

/// A single chart region of the page.
#[derive(Debug, Clone, PartialEq)]
pub struct Chart {
    pub id: &'static str,
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub kind: ChartKind,
}

impl Chart {
    pub fn new(id: &'static str, title: &str, x_label: &str, y_label: &str, kind: ChartKind) -> Self {
        Self {
            id,
            title: title.to_string(),
            x_label: x_label.to_string(),
            y_label: y_label.to_string(),
            kind,
        }
    }

    /// True when there is nothing to draw.
    pub fn is_empty(&self) -> bool {
        match &self.kind {
            ChartKind::Histogram { bins, .. } => bins.is_empty(),
            ChartKind::Scatter { series } | ChartKind::Lines { series } => {
                series.iter().all(|s| s.points.is_empty())
            }
            ChartKind::BoxPlot { groups } => groups.is_empty(),
            ChartKind::Heatmap { matrix } => matrix.size() == 0,
            ChartKind::Table(table) => table.rows.is_empty(),
            ChartKind::Unavailable { .. } => true,
        }
    }
}

/// Everything rendered for one dataset under one age range.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionView {
    pub heading: String,
    pub charts: Vec<Chart>,
    pub table: Chart,
    pub row_count: usize,
}

/// The whole page, re-rendered section by section as filters change.
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    pub title: String,
    pub description: String,
    pub cross_sectional: SectionView,
    pub longitudinal: SectionView,
}
