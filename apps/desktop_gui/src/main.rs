use std::path::PathBuf;

mod controller;
mod ui;

use anyhow::Context;
use atlas_core::{load_settings, AtlasSettings};
use clap::Parser;
use crossbeam_channel::bounded;
use eframe::egui;
use shared::{Dataset, LoadReport};
use tracing_subscriber::EnvFilter;

use crate::controller::events::{StatusLine, UiEvent};
use crate::ui::AtlasApp;

#[derive(Debug, Parser)]
#[command(name = "civic-atlas", about = "Map and list of civic infrastructure projects")]
struct Args {
    /// Project dataset (.json or .toml). Defaults to the bundled Charleston demo.
    #[arg(long)]
    dataset: Option<PathBuf>,
    /// Open with only this city selected.
    #[arg(long)]
    city: Option<String>,
}

fn load_dataset(args: &Args, settings: &AtlasSettings) -> anyhow::Result<(Dataset, Option<StatusLine>)> {
    let Some(path) = args.dataset.as_ref().or(settings.dataset_path.as_ref()) else {
        tracing::info!("no dataset configured; using the Charleston demo");
        return Ok((Dataset::charleston_demo(), None));
    };

    let (dataset, report) = Dataset::load(path)
        .with_context(|| format!("failed to load dataset {}", path.display()))?;
    tracing::info!(
        path = %path.display(),
        loaded = report.loaded,
        skipped = report.skipped.len(),
        "dataset loaded"
    );
    Ok((dataset, load_notice(&report)))
}

fn load_notice(report: &LoadReport) -> Option<StatusLine> {
    if report.is_clean() {
        return None;
    }
    let mut parts = Vec::new();
    if !report.skipped.is_empty() {
        parts.push(format!("{} skipped without usable coordinates", report.skipped.len()));
    }
    if report.dropped_links > 0 {
        parts.push(format!("{} invalid links dropped", report.dropped_links));
    }
    if report.unparsed_dates > 0 {
        parts.push(format!("{} dates not in YYYY-MM-DD form", report.unparsed_dates));
    }
    Some(StatusLine::info(format!(
        "Loaded {} projects ({})",
        report.loaded,
        parts.join(", ")
    )))
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let settings = load_settings().context("failed to read settings")?;
    let (dataset, notice) = load_dataset(&args, &settings)?;

    let (ui_tx, ui_rx) = bounded::<UiEvent>(256);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Civic Atlas")
            .with_inner_size([1280.0, 800.0])
            .with_min_inner_size([860.0, 560.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Civic Atlas",
        options,
        Box::new(move |cc| {
            let mut controls = AtlasApp::restore_controls(cc.storage, &dataset);
            if let Some(city) = args.city {
                if !dataset.cities().contains(&city.as_str()) {
                    tracing::warn!(%city, "requested city has no projects");
                }
                controls.city = city;
            }
            Ok(Box::new(
                AtlasApp::new(dataset, &settings, controls, ui_tx, ui_rx).with_notice(notice),
            ))
        }),
    )
    .map_err(|err| anyhow::anyhow!("viewer exited with an error: {err}"))
}
