//! Charts module - Chart descriptors, builders and rendering

mod builder;
mod model;
mod page;
mod plotter;

pub use model::{Chart, ChartKind, Page, SectionView};
pub use page::{render_cross_sectional, render_longitudinal, render_page};
pub use plotter::ChartPlotter;
