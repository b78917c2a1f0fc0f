//! Page rendering
//! Filters each dataset by its age range and builds the charts for that section.

use crate::charts::builder::{ChartBuilder, ChartError};
use crate::charts::model::{Chart, Page, SectionView};
use crate::data::{AgeRange, DashboardData, FilterState, RangeFilter};
use polars::prelude::DataFrame;
use tracing::instrument;

pub const PAGE_TITLE: &str = "Alzheimer's and MRI Data Analysis";
pub const PAGE_DESCRIPTION: &str =
    "Explore cross-sectional and longitudinal MRI data related to Alzheimer's disease.";
pub const CROSS_SECTIONAL_HEADING: &str = "Cross-Sectional Analysis";
pub const LONGITUDINAL_HEADING: &str = "Longitudinal Analysis";

type Builder = fn(&DataFrame) -> Result<Chart, ChartError>;

const CROSS_SECTIONAL_CHARTS: [(&str, &str, Builder); 3] = [
    ("age_distribution", "Age Distribution", ChartBuilder::age_distribution),
    ("mmse_vs_cdr", "MMSE vs. CDR", ChartBuilder::mmse_vs_cdr),
    (
        "nwbv_by_cdr",
        "Normalized Brain Volume (nWBV) by Group",
        ChartBuilder::nwbv_by_cdr,
    ),
];

const LONGITUDINAL_CHARTS: [(&str, &str, Builder); 2] = [
    ("mmse_over_visits", "MMSE Over Time", ChartBuilder::mmse_over_visits),
    (
        "correlation_heatmap",
        "Correlation Map",
        ChartBuilder::correlation_heatmap,
    ),
];

/// Render both sections for the current filter state.
pub fn render_page(data: &DashboardData, state: &FilterState) -> Page {
    Page {
        title: PAGE_TITLE.to_string(),
        description: PAGE_DESCRIPTION.to_string(),
        cross_sectional: render_cross_sectional(&data.cross_sectional, state.cross_sectional),
        longitudinal: render_longitudinal(&data.longitudinal, state.longitudinal),
    }
}

/// Charts 1-3 plus the raw table for the cross-sectional subset.
pub fn render_cross_sectional(df: &DataFrame, range: AgeRange) -> SectionView {
    render_section(
        CROSS_SECTIONAL_HEADING,
        df,
        range,
        &CROSS_SECTIONAL_CHARTS,
        ("cross_sectional_table", "Cross-Sectional Data"),
    )
}

/// Charts 4-5 plus the raw table for the longitudinal subset.
pub fn render_longitudinal(df: &DataFrame, range: AgeRange) -> SectionView {
    render_section(
        LONGITUDINAL_HEADING,
        df,
        range,
        &LONGITUDINAL_CHARTS,
        ("longitudinal_table", "Longitudinal Data"),
    )
}

#[instrument(skip(df, charts, table), fields(rows = df.height()))]
fn render_section(
    heading: &str,
    df: &DataFrame,
    range: AgeRange,
    charts: &[(&'static str, &str, Builder)],
    table: (&'static str, &str),
) -> SectionView {
    let filtered = RangeFilter::filter_age(df, range).map_err(ChartError::from);

    let build = |id: &'static str, title: &str, builder: &dyn Fn(&DataFrame) -> Result<Chart, ChartError>| {
        match &filtered {
            Ok(subset) => builder(subset).unwrap_or_else(|e| ChartBuilder::unavailable(id, title, &e)),
            Err(e) => ChartBuilder::unavailable(id, title, e),
        }
    };

    let built: Vec<Chart> = charts
        .iter()
        .map(|(id, title, builder)| build(*id, *title, builder))
        .collect();

    let (table_id, table_title) = table;
    let table = build(table_id, table_title, &|subset: &DataFrame| {
        ChartBuilder::raw_table(table_id, table_title, subset)
    });

    let row_count = filtered.as_ref().map(DataFrame::height).unwrap_or(0);
    tracing::debug!(
        "Rendered '{}' for ages {}-{}: {} rows, {} charts",
        heading,
        range.lower,
        range.upper,
        row_count,
        built.len()
    );

    SectionView {
        heading: heading.to_string(),
        charts: built,
        table,
        row_count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::model::ChartKind;
    use crate::data::columns;
    use polars::prelude::*;

    fn data() -> DashboardData {
        let cross_sectional = DataFrame::new(vec![
            Column::new(columns::SEX.into(), vec!["F", "M", "F"]),
            Column::new(columns::AGE.into(), vec![60i64, 70, 80]),
            Column::new(columns::MMSE.into(), vec![29.0, 25.0, 21.0]),
            Column::new(columns::CDR.into(), vec![0.0, 0.5, 1.0]),
            Column::new(columns::NWBV.into(), vec![0.80, 0.75, 0.70]),
        ])
        .unwrap();
        let longitudinal = DataFrame::new(vec![
            Column::new(columns::SUBJECT_ID.into(), vec!["S1", "S1", "S1"]),
            Column::new(columns::VISIT.into(), vec![1i64, 2, 3]),
            Column::new(columns::AGE.into(), vec![70i64, 71, 73]),
            Column::new(columns::MMSE.into(), vec![30.0, 28.0, 27.0]),
            Column::new(columns::CDR.into(), vec![0.0, 0.0, 0.5]),
            Column::new(columns::NWBV.into(), vec![0.74, 0.73, 0.71]),
            Column::new(columns::ETIV.into(), vec![1500.0, 1498.0, 1490.0]),
        ])
        .unwrap();
        DashboardData {
            cross_sectional,
            longitudinal,
        }
    }

    fn full_state(data: &DashboardData) -> FilterState {
        FilterState {
            cross_sectional: AgeRange::full(data.cross_sectional_age_bounds()),
            longitudinal: AgeRange::full(data.longitudinal_age_bounds()),
        }
    }

    #[test]
    fn test_render_page_layout() {
        let data = data();
        let page = render_page(&data, &full_state(&data));

        assert_eq!(page.title, PAGE_TITLE);
        let ids: Vec<&str> = page.cross_sectional.charts.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec!["age_distribution", "mmse_vs_cdr", "nwbv_by_cdr"]);
        let ids: Vec<&str> = page.longitudinal.charts.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec!["mmse_over_visits", "correlation_heatmap"]);
        assert_eq!(page.cross_sectional.table.id, "cross_sectional_table");
        assert_eq!(page.longitudinal.table.id, "longitudinal_table");
        assert_eq!(page.cross_sectional.row_count, 3);
        assert_eq!(page.longitudinal.row_count, 3);
    }

    #[test]
    fn test_filter_range_selects_single_row() {
        let data = data();
        let section = render_cross_sectional(&data.cross_sectional, AgeRange::new(65, 75));

        assert_eq!(section.row_count, 1);
        let ChartKind::Table(table) = &section.table.kind else {
            panic!("expected table");
        };
        assert_eq!(table.rows.len(), 1);
        assert_eq!(table.rows[0][1], "70");
    }

    #[test]
    fn test_longitudinal_series_for_subject() {
        let data = data();
        let section = render_longitudinal(&data.longitudinal, AgeRange::new(70, 73));

        let ChartKind::Lines { series } = &section.charts[0].kind else {
            panic!("expected lines");
        };
        assert_eq!(series[0].name, "S1");
        assert_eq!(series[0].points, vec![[1.0, 30.0], [2.0, 28.0], [3.0, 27.0]]);
    }

    #[test]
    fn test_empty_subset_renders_empty_charts() {
        let data = data();
        let section = render_cross_sectional(&data.cross_sectional, AgeRange::new(10, 20));

        assert_eq!(section.row_count, 0);
        assert!(section.charts.iter().all(Chart::is_empty));
        assert!(section
            .charts
            .iter()
            .all(|c| !matches!(c.kind, ChartKind::Unavailable { .. })));
        assert!(section.table.is_empty());
    }

    #[test]
    fn test_missing_columns_render_placeholders() {
        let mut data = data();
        data.longitudinal = data.longitudinal.drop(columns::VISIT).unwrap();

        let section = render_longitudinal(&data.longitudinal, AgeRange::new(0, 200));
        assert!(matches!(
            section.charts[0].kind,
            ChartKind::Unavailable { .. }
        ));
        assert!(matches!(section.charts[1].kind, ChartKind::Heatmap { .. }));
        assert!(matches!(section.table.kind, ChartKind::Table(_)));
    }

    #[test]
    fn test_missing_age_column_renders_every_chart_as_placeholder() {
        let mut data = data();
        data.cross_sectional = data.cross_sectional.drop(columns::AGE).unwrap();

        let section = render_cross_sectional(&data.cross_sectional, AgeRange::default());
        assert_eq!(section.row_count, 0);
        assert!(section
            .charts
            .iter()
            .chain(std::iter::once(&section.table))
            .all(|c| matches!(c.kind, ChartKind::Unavailable { .. })));
    }
}
