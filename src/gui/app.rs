//! Dashboard Main Application
//! Main window with the filter sidebar and the chart page.

use crate::charts::{render_cross_sectional, render_longitudinal, render_page};
use crate::data::DashboardData;
use crate::gui::{ChartViewer, ControlPanel, ControlPanelAction};
use egui::SidePanel;
use std::sync::Arc;

/// Main application window.
pub struct DashboardApp {
    data: Arc<DashboardData>,
    control_panel: ControlPanel,
    chart_viewer: ChartViewer,
}

impl DashboardApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, data: Arc<DashboardData>) -> Self {
        Self::from_data(data)
    }

    /// Build the app and render the initial page over the full age ranges.
    pub fn from_data(data: Arc<DashboardData>) -> Self {
        let control_panel = ControlPanel::new(
            data.cross_sectional_age_bounds(),
            data.longitudinal_age_bounds(),
        );

        let mut app = Self {
            data,
            control_panel,
            chart_viewer: ChartViewer::new(),
        };
        app.render_all();
        app
    }

    fn render_all(&mut self) {
        let page = render_page(&self.data, &self.control_panel.state);
        self.chart_viewer.set_page(page);
        self.update_row_counts();
    }

    fn update_row_counts(&mut self) {
        if let Some(page) = &self.chart_viewer.page {
            self.control_panel
                .set_row_counts(page.cross_sectional.row_count, page.longitudinal.row_count);
        }
    }

    /// Re-render only the sections whose range changed.
    fn handle_action(&mut self, action: ControlPanelAction) {
        let state = self.control_panel.state;
        match action {
            ControlPanelAction::CrossSectionalRangeChanged => {
                tracing::debug!("Cross-sectional range changed: {:?}", state.cross_sectional);
                let section = render_cross_sectional(&self.data.cross_sectional, state.cross_sectional);
                self.chart_viewer.set_cross_sectional(section);
                self.update_row_counts();
            }
            ControlPanelAction::LongitudinalRangeChanged => {
                tracing::debug!("Longitudinal range changed: {:?}", state.longitudinal);
                let section = render_longitudinal(&self.data.longitudinal, state.longitudinal);
                self.chart_viewer.set_longitudinal(section);
                self.update_row_counts();
            }
            ControlPanelAction::ResetRanges => {
                tracing::info!("Resetting filters to full age ranges");
                self.control_panel.reset();
                self.render_all();
            }
            ControlPanelAction::None => {}
        }
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Left panel - Filters
        SidePanel::left("control_panel")
            .min_width(280.0)
            .max_width(340.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    let action = self.control_panel.show(ui);
                    self.handle_action(action);
                });
            });

        // Central panel - Charts and tables
        egui::CentralPanel::default().show(ctx, |ui| {
            self.chart_viewer.show(ui);
        });
    }
}
