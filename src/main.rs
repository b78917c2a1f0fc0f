//! Alzheimer's MRI Dashboard
//!
//! Loads the OASIS cross-sectional and longitudinal tables once and shows
//! age-filtered descriptive charts in a single window.

mod charts;
mod cli;
mod data;
mod gui;
mod stats;

use anyhow::Context;
use clap::Parser;
use eframe::egui;
use tracing::subscriber::set_global_default;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::prelude::*;
use tracing_subscriber::registry::Registry;
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;
use crate::data::DataLoader;
use crate::gui::DashboardApp;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up logging
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_level()));
    let subscriber = Registry::default()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_span_events(FmtSpan::CLOSE));
    set_global_default(subscriber).context("Setting default subscriber failed")?;

    // Both tables are read once, before the window opens
    let loader = DataLoader::new(cli.data_paths());
    let data = loader.load().inspect_err(|e| tracing::error!("{}", e)).with_context(|| {
        format!(
            "Could not load dashboard data ({}, {})",
            loader.paths().cross_sectional.display(),
            loader.paths().longitudinal.display()
        )
    })?;

    // Configure native options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 900.0])
            .with_min_inner_size([1000.0, 700.0])
            .with_title("Alzheimer's and MRI Dashboard"),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "Alzheimer's and MRI Dashboard",
        options,
        Box::new(move |cc| Ok(Box::new(DashboardApp::new(cc, data)))),
    )
    .map_err(|e| anyhow::anyhow!("Dashboard window failed: {}", e))
}
