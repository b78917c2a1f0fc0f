//! Chart Plotter Module
//! Draws chart descriptors as interactive egui_plot visualizations.

use crate::charts::model::{BoxGroup, Chart, ChartKind, Series, TableView};
use crate::stats::{CorrelationMatrix, HistogramBin};
use egui::{Color32, RichText, ScrollArea};
use egui_plot::{
    Bar, BarChart, BoxElem, BoxPlot, BoxSpread, Legend, Line, MarkerShape, Plot, PlotPoint,
    PlotPoints, Points, Polygon, Text,
};

/// Color palette for categories
pub const PALETTE: [Color32; 10] = [
    Color32::from_rgb(52, 152, 219),  // Blue
    Color32::from_rgb(231, 76, 60),   // Red
    Color32::from_rgb(46, 204, 113),  // Green
    Color32::from_rgb(155, 89, 182),  // Purple
    Color32::from_rgb(243, 156, 18),  // Orange
    Color32::from_rgb(26, 188, 156),  // Teal
    Color32::from_rgb(233, 30, 99),   // Pink
    Color32::from_rgb(0, 188, 212),   // Cyan
    Color32::from_rgb(121, 85, 72),   // Brown
    Color32::from_rgb(96, 125, 139),  // Blue Grey
];

const HIST_COLOR: Color32 = Color32::from_rgb(52, 152, 219);
const KDE_COLOR: Color32 = Color32::from_rgb(31, 97, 141);
const NAN_COLOR: Color32 = Color32::from_rgb(200, 200, 200);

// Diverging blue-white-red map endpoints
const COOL: [f32; 3] = [59.0, 76.0, 192.0];
const NEUTRAL: [f32; 3] = [221.0, 221.0, 221.0];
const WARM: [f32; 3] = [180.0, 4.0, 38.0];

/// Series beyond this count are drawn without a legend.
const LEGEND_LIMIT: usize = 20;
const PLOT_HEIGHT: f32 = 320.0;
const TABLE_HEIGHT: f32 = 300.0;

/// Draws charts using egui_plot.
pub struct ChartPlotter;

impl ChartPlotter {
    /// Get color for the n-th category.
    pub fn get_group_color(group_index: usize) -> Color32 {
        PALETTE[group_index % PALETTE.len()]
    }

    /// Diverging color for a correlation value in [-1, 1].
    pub fn correlation_color(value: f64) -> Color32 {
        if value.is_nan() {
            return NAN_COLOR;
        }

        let t = value.clamp(-1.0, 1.0) as f32;
        let (from, to, frac) = if t < 0.0 {
            (COOL, NEUTRAL, t + 1.0)
        } else {
            (NEUTRAL, WARM, t)
        };
        let mix = |i: usize| (from[i] + (to[i] - from[i]) * frac).round() as u8;
        Color32::from_rgb(mix(0), mix(1), mix(2))
    }

    /// Annotation text for a correlation cell.
    pub fn format_correlation(value: f64) -> String {
        if value.is_nan() {
            "nan".to_string()
        } else {
            format!("{:.2}", value)
        }
    }

    /// Draw any chart with its title.
    pub fn draw_chart(ui: &mut egui::Ui, chart: &Chart) {
        ui.label(RichText::new(&chart.title).size(16.0).strong());
        if chart.is_empty() && !matches!(chart.kind, ChartKind::Unavailable { .. }) {
            ui.label(
                RichText::new("No rows in the selected age range")
                    .size(11.0)
                    .color(Color32::GRAY),
            );
        }
        ui.add_space(4.0);

        match &chart.kind {
            ChartKind::Histogram { bins, density } => {
                Self::draw_histogram(ui, chart, bins, density)
            }
            ChartKind::Scatter { series } => Self::draw_scatter(ui, chart, series),
            ChartKind::BoxPlot { groups } => Self::draw_boxplot(ui, chart, groups),
            ChartKind::Lines { series } => Self::draw_lines(ui, chart, series),
            ChartKind::Heatmap { matrix } => Self::draw_heatmap(ui, chart, matrix),
            ChartKind::Table(table) => Self::draw_table(ui, chart.id, table),
            ChartKind::Unavailable { reason } => {
                ui.label(
                    RichText::new(format!("⚠ Chart unavailable: {}", reason))
                        .color(Color32::from_rgb(220, 53, 69)),
                );
            }
        }
    }

    fn base_plot(chart: &Chart) -> Plot {
        Plot::new(chart.id)
            .height(PLOT_HEIGHT)
            .allow_scroll(false)
            .x_axis_label(chart.x_label.clone())
            .y_axis_label(chart.y_label.clone())
    }

    /// Count bars with the density curve on top.
    fn draw_histogram(ui: &mut egui::Ui, chart: &Chart, bins: &[HistogramBin], density: &[[f64; 2]]) {
        let bars: Vec<Bar> = bins
            .iter()
            .map(|bin| {
                Bar::new(bin.center(), bin.count as f64)
                    .width(bin.width())
                    .fill(HIST_COLOR.gamma_multiply(0.6))
                    .stroke(egui::Stroke::new(1.0, HIST_COLOR))
            })
            .collect();

        Self::base_plot(chart).include_y(0.0).show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).color(HIST_COLOR).name("Count"));

            if !density.is_empty() {
                plot_ui.line(
                    Line::new(PlotPoints::from(density.to_vec()))
                        .color(KDE_COLOR)
                        .width(2.0)
                        .name("Density"),
                );
            }
        });
    }

    fn draw_scatter(ui: &mut egui::Ui, chart: &Chart, series: &[Series]) {
        Self::base_plot(chart)
            .legend(Legend::default())
            .show(ui, |plot_ui| {
                for (i, s) in series.iter().enumerate() {
                    plot_ui.points(
                        Points::new(PlotPoints::from(s.points.clone()))
                            .shape(MarkerShape::Circle)
                            .radius(4.0)
                            .color(Self::get_group_color(i))
                            .name(&s.name),
                    );
                }
            });
    }

    /// One box per group with whiskers and outlier points.
    fn draw_boxplot(ui: &mut egui::Ui, chart: &Chart, groups: &[BoxGroup]) {
        let x_labels: Vec<String> = groups.iter().map(|g| g.label.clone()).collect();

        Self::base_plot(chart)
            .x_axis_formatter(move |mark, _range| {
                let idx = mark.value.round();
                if (mark.value - idx).abs() < 1e-6 && idx >= 0.0 {
                    x_labels.get(idx as usize).cloned().unwrap_or_default()
                } else {
                    String::new()
                }
            })
            .show(ui, |plot_ui| {
                for (i, group) in groups.iter().enumerate() {
                    let color = Self::get_group_color(i);
                    let s = &group.stats;

                    let box_elem = BoxElem::new(
                        i as f64,
                        BoxSpread::new(s.whisker_low, s.q1, s.median, s.q3, s.whisker_high),
                    )
                    .box_width(0.5)
                    .fill(color.gamma_multiply(0.3))
                    .stroke(egui::Stroke::new(1.5, color));

                    plot_ui.box_plot(BoxPlot::new(vec![box_elem]).name(&group.label));

                    if !s.outliers.is_empty() {
                        let points: PlotPoints =
                            s.outliers.iter().map(|&y| [i as f64, y]).collect();
                        plot_ui.points(
                            Points::new(points)
                                .shape(MarkerShape::Diamond)
                                .radius(3.0)
                                .color(color),
                        );
                    }
                }
            });
    }

    fn draw_lines(ui: &mut egui::Ui, chart: &Chart, series: &[Series]) {
        let mut plot = Self::base_plot(chart);
        if series.len() <= LEGEND_LIMIT {
            plot = plot.legend(Legend::default());
        }

        plot.show(ui, |plot_ui| {
            for (i, s) in series.iter().enumerate() {
                if s.points.is_empty() {
                    continue;
                }
                let color = Self::get_group_color(i);
                plot_ui.line(
                    Line::new(PlotPoints::from(s.points.clone()))
                        .color(color)
                        .width(1.5)
                        .name(&s.name),
                );
                plot_ui.points(
                    Points::new(PlotPoints::from(s.points.clone()))
                        .radius(2.5)
                        .color(color)
                        .name(&s.name),
                );
            }
        });
    }

    /// Annotated correlation grid; row 0 is drawn at the top.
    fn draw_heatmap(ui: &mut egui::Ui, chart: &Chart, matrix: &CorrelationMatrix) {
        let k = matrix.size();
        let x_labels = matrix.labels.clone();
        let y_labels: Vec<String> = matrix.labels.iter().rev().cloned().collect();
        let label_at = |labels: &[String], value: f64| {
            let idx = value.round();
            if (value - idx).abs() < 1e-6 && idx >= 0.0 {
                labels.get(idx as usize).cloned().unwrap_or_default()
            } else {
                String::new()
            }
        };

        Self::base_plot(chart)
            .data_aspect(1.0)
            .show_grid(false)
            .allow_drag(false)
            .allow_zoom(false)
            .include_x(-0.5)
            .include_x(k as f64 - 0.5)
            .include_y(-0.5)
            .include_y(k as f64 - 0.5)
            .x_axis_formatter(move |mark, _range| label_at(&x_labels, mark.value))
            .y_axis_formatter(move |mark, _range| label_at(&y_labels, mark.value))
            .show(ui, |plot_ui| {
                for row in 0..k {
                    for col in 0..k {
                        let value = matrix.get(row, col);
                        let x = col as f64;
                        let y = (k - 1 - row) as f64;
                        let cell = vec![
                            [x - 0.5, y - 0.5],
                            [x + 0.5, y - 0.5],
                            [x + 0.5, y + 0.5],
                            [x - 0.5, y + 0.5],
                        ];
                        plot_ui.polygon(
                            Polygon::new(PlotPoints::from(cell))
                                .fill_color(Self::correlation_color(value))
                                .stroke(egui::Stroke::new(0.5, Color32::WHITE)),
                        );

                        let text_color = if value.abs() > 0.6 {
                            Color32::WHITE
                        } else {
                            Color32::BLACK
                        };
                        plot_ui.text(Text::new(
                            PlotPoint::new(x, y),
                            RichText::new(Self::format_correlation(value))
                                .size(12.0)
                                .color(text_color),
                        ));
                    }
                }
            });
    }

    /// Draw a raw data table
    pub fn draw_table(ui: &mut egui::Ui, id: &str, table: &TableView) {
        ui.label(
            RichText::new(format!("{} rows × {} columns", table.row_count(), table.columns.len()))
                .size(11.0)
                .color(Color32::GRAY),
        );

        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                ScrollArea::both()
                    .id_salt(id)
                    .max_height(TABLE_HEIGHT)
                    .auto_shrink([false, true])
                    .show(ui, |ui| {
                        egui::Grid::new(ui.make_persistent_id(format!("table_{}", id)))
                            .striped(true)
                            .min_col_width(40.0)
                            .spacing([12.0, 4.0])
                            .show(ui, |ui| {
                                ui.label(RichText::new("#").strong().size(11.0));
                                for column in &table.columns {
                                    ui.label(RichText::new(column).strong().size(11.0));
                                }
                                ui.end_row();

                                for (i, row) in table.rows.iter().enumerate() {
                                    ui.label(
                                        RichText::new(i.to_string())
                                            .size(11.0)
                                            .color(Color32::GRAY),
                                    );
                                    for cell in row {
                                        ui.label(RichText::new(cell).size(11.0));
                                    }
                                    ui.end_row();
                                }
                            });
                    });
            });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_correlation_color_endpoints() {
        assert_eq!(ChartPlotter::correlation_color(-1.0), Color32::from_rgb(59, 76, 192));
        assert_eq!(ChartPlotter::correlation_color(0.0), Color32::from_rgb(221, 221, 221));
        assert_eq!(ChartPlotter::correlation_color(1.0), Color32::from_rgb(180, 4, 38));
        assert_eq!(ChartPlotter::correlation_color(f64::NAN), NAN_COLOR);
        // Out-of-range values are clamped
        assert_eq!(
            ChartPlotter::correlation_color(3.0),
            ChartPlotter::correlation_color(1.0)
        );
    }

    #[test]
    fn test_format_correlation() {
        assert_eq!(ChartPlotter::format_correlation(1.0), "1.00");
        assert_eq!(ChartPlotter::format_correlation(-0.6849), "-0.68");
        assert_eq!(ChartPlotter::format_correlation(f64::NAN), "nan");
    }

    #[test]
    fn test_group_colors_cycle() {
        assert_eq!(ChartPlotter::get_group_color(0), PALETTE[0]);
        assert_eq!(ChartPlotter::get_group_color(PALETTE.len() + 1), PALETTE[1]);
    }
}
