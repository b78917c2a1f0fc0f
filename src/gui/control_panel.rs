//! Control Panel Widget
//! Left side panel with one age-range control per dataset.

use crate::data::{AgeRange, FilterState};
use egui::{Color32, RichText};

/// Left side control panel holding the session filter state.
pub struct ControlPanel {
    pub state: FilterState,
    /// Observed bounds; `None` for a table without usable ages.
    pub cross_sectional_bounds: Option<AgeRange>,
    pub longitudinal_bounds: Option<AgeRange>,
    pub cross_sectional_rows: usize,
    pub longitudinal_rows: usize,
}

impl ControlPanel {
    /// Start with each range covering its dataset's full observed bounds.
    pub fn new(
        cross_sectional_bounds: Option<AgeRange>,
        longitudinal_bounds: Option<AgeRange>,
    ) -> Self {
        Self {
            state: FilterState {
                cross_sectional: AgeRange::full(cross_sectional_bounds),
                longitudinal: AgeRange::full(longitudinal_bounds),
            },
            cross_sectional_bounds,
            longitudinal_bounds,
            cross_sectional_rows: 0,
            longitudinal_rows: 0,
        }
    }

    /// Restore both ranges to the full observed bounds.
    pub fn reset(&mut self) {
        self.state.cross_sectional = AgeRange::full(self.cross_sectional_bounds);
        self.state.longitudinal = AgeRange::full(self.longitudinal_bounds);
    }

    pub fn set_row_counts(&mut self, cross_sectional: usize, longitudinal: usize) {
        self.cross_sectional_rows = cross_sectional;
        self.longitudinal_rows = longitudinal;
    }

    /// Draw the control panel
    pub fn show(&mut self, ui: &mut egui::Ui) -> ControlPanelAction {
        let mut action = ControlPanelAction::None;

        ui.add_space(5.0);
        ui.label(
            RichText::new("Filters")
                .size(22.0)
                .color(Color32::from_rgb(100, 149, 237)),
        );
        ui.label(
            RichText::new("Select the filters to explore the data.")
                .size(11.0)
                .color(Color32::GRAY),
        );
        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        // ===== Cross-sectional =====
        ui.label(RichText::new("Cross-Sectional Data").size(14.0).strong());
        ui.add_space(5.0);
        if Self::range_control(
            ui,
            "Age Range (Cross-Sectional)",
            &mut self.state.cross_sectional,
            self.cross_sectional_bounds,
            self.cross_sectional_rows,
        ) {
            action = ControlPanelAction::CrossSectionalRangeChanged;
        }

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Longitudinal =====
        ui.label(RichText::new("Longitudinal Data").size(14.0).strong());
        ui.add_space(5.0);
        if Self::range_control(
            ui,
            "Age Range (Longitudinal)",
            &mut self.state.longitudinal,
            self.longitudinal_bounds,
            self.longitudinal_rows,
        ) {
            action = ControlPanelAction::LongitudinalRangeChanged;
        }

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        ui.vertical_centered(|ui| {
            let button = egui::Button::new(RichText::new("↺ Reset Filters").size(14.0))
                .min_size(egui::vec2(150.0, 30.0));
            if ui.add(button).clicked() {
                action = ControlPanelAction::ResetRanges;
            }
        });

        action
    }

    /// Lower/upper sliders over the observed bounds. Returns true when the range changed.
    fn range_control(
        ui: &mut egui::Ui,
        label: &str,
        range: &mut AgeRange,
        bounds: Option<AgeRange>,
        rows: usize,
    ) -> bool {
        let Some(bounds) = bounds else {
            ui.label(RichText::new("No age data available").color(Color32::GRAY));
            return false;
        };

        let before = *range;
        ui.label(label);

        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                ui.add(
                    egui::Slider::new(&mut range.lower, bounds.lower..=bounds.upper).text("Min"),
                );
                ui.add(
                    egui::Slider::new(&mut range.upper, bounds.lower..=bounds.upper).text("Max"),
                );
            });

        // Dragging min past max pushes max along with it
        if range.lower > range.upper {
            range.upper = range.lower;
        }
        *range = range.clamped(bounds);

        ui.add_space(3.0);
        ui.label(
            RichText::new(format!("{}-{} years, {} rows", range.lower, range.upper, rows))
                .size(11.0)
                .color(Color32::GRAY),
        );

        *range != before
    }
}

/// Actions triggered by control panel
#[derive(Debug, Clone, PartialEq)]
pub enum ControlPanelAction {
    None,
    CrossSectionalRangeChanged,
    LongitudinalRangeChanged,
    ResetRanges,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state_covers_full_bounds() {
        let panel = ControlPanel::new(Some(AgeRange::new(18, 96)), Some(AgeRange::new(60, 98)));
        assert_eq!(panel.state.cross_sectional, AgeRange::new(18, 96));
        assert_eq!(panel.state.longitudinal, AgeRange::new(60, 98));
    }

    #[test]
    fn test_reset_restores_both_ranges() {
        let mut panel =
            ControlPanel::new(Some(AgeRange::new(18, 96)), Some(AgeRange::new(60, 98)));
        panel.state.cross_sectional = AgeRange::new(40, 50);
        panel.state.longitudinal = AgeRange::new(70, 71);

        panel.reset();
        assert_eq!(panel.state.cross_sectional, AgeRange::new(18, 96));
        assert_eq!(panel.state.longitudinal, AgeRange::new(60, 98));
    }

    #[test]
    fn test_missing_bounds_fall_back_to_zero_range() {
        let panel = ControlPanel::new(None, Some(AgeRange::new(60, 98)));
        assert_eq!(panel.state.cross_sectional, AgeRange::new(0, 0));
    }
}
