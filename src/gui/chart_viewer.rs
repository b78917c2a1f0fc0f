//! Chart Viewer Widget
//! Main scrollable area: page title, chart cards per section, and the raw tables.
//! Cards wrap into as many columns as the available width allows.

use crate::charts::{Chart, ChartKind, ChartPlotter, Page, SectionView};
use egui::{Color32, RichText, ScrollArea};

/// Chart card configuration
const CHART_SPACING: f32 = 15.0;
const CHART_WIDTH: f32 = 620.0; // Fixed width for each chart card

/// Scrollable page display with a responsive multi-column chart layout.
#[derive(Default)]
pub struct ChartViewer {
    pub page: Option<Page>,
}

impl ChartViewer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_page(&mut self, page: Page) {
        self.page = Some(page);
    }

    /// Replace only the cross-sectional section.
    pub fn set_cross_sectional(&mut self, section: SectionView) {
        if let Some(page) = &mut self.page {
            page.cross_sectional = section;
        }
    }

    /// Replace only the longitudinal section.
    pub fn set_longitudinal(&mut self, section: SectionView) {
        if let Some(page) = &mut self.page {
            page.longitudinal = section;
        }
    }

    /// Draw the whole page
    pub fn show(&self, ui: &mut egui::Ui) {
        let Some(page) = &self.page else {
            ui.centered_and_justified(|ui| {
                ui.label(RichText::new("No Data").size(20.0));
            });
            return;
        };

        ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.label(RichText::new(&page.title).size(28.0).strong());
                ui.label(RichText::new(&page.description).size(13.0).color(Color32::GRAY));
                ui.add_space(CHART_SPACING);

                Self::draw_section(ui, &page.cross_sectional);
                Self::draw_section(ui, &page.longitudinal);

                ui.separator();
                ui.label(RichText::new("Filtered Data").size(22.0).strong());
                ui.add_space(8.0);
                let table_width = (ui.available_width() - 30.0).max(CHART_WIDTH);
                for section in [&page.cross_sectional, &page.longitudinal] {
                    Self::draw_card(ui, &section.table, table_width);
                    ui.add_space(CHART_SPACING);
                }
            });
    }

    fn draw_section(ui: &mut egui::Ui, section: &SectionView) {
        ui.separator();
        ui.label(RichText::new(&section.heading).size(22.0).strong());
        ui.add_space(8.0);

        // Calculate how many columns fit in available width
        let avail_width = ui.available_width();
        let card_total_width = CHART_WIDTH + CHART_SPACING;
        let num_columns = ((avail_width / card_total_width).floor() as usize).max(1);

        for row in section.charts.chunks(num_columns) {
            ui.horizontal(|ui| {
                for chart in row {
                    Self::draw_card(ui, chart, CHART_WIDTH - 20.0);
                    ui.add_space(CHART_SPACING);
                }
            });
            ui.add_space(CHART_SPACING);
        }
    }

    /// Draw a single chart card with fixed width
    fn draw_card(ui: &mut egui::Ui, chart: &Chart, width: f32) {
        let border_color = if matches!(chart.kind, ChartKind::Unavailable { .. }) {
            Color32::from_rgb(220, 53, 69) // Red for charts that failed to build
        } else {
            ui.visuals().widgets.noninteractive.bg_stroke.color
        };

        egui::Frame::none()
            .rounding(8.0)
            .stroke(egui::Stroke::new(1.0, border_color))
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .inner_margin(12.0)
            .show(ui, |ui| {
                ui.set_width(width);
                ui.vertical(|ui| {
                    ChartPlotter::draw_chart(ui, chart);
                });
            });
    }
}
