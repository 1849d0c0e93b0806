use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use atlas_core::{
    load_settings, present::list_html, FilterState, HeadlessSurface, ProjectCard,
    RenderOrchestrator, RenderSummary,
};
use clap::{Parser, Subcommand, ValueEnum};
use shared::{Category, Dataset, LoadReport, Status};
use tracing_subscriber::EnvFilter;

/// Used when `RUST_LOG` is unset; logs go to stderr, output to stdout.
const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Parser, Debug)]
#[command(name = "atlas", about = "Inspect civic project datasets without the map window")]
struct Cli {
    /// Dataset file (.json or .toml). Falls back to settings, then the Charleston demo.
    #[arg(long, global = true)]
    dataset: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run one render pass and print the resulting project list.
    List {
        #[arg(long, default_value = "")]
        city: String,
        /// Repeatable. Omit to allow every status.
        #[arg(long = "status")]
        statuses: Vec<String>,
        /// Repeatable. Omit to allow every category.
        #[arg(long = "category")]
        categories: Vec<String>,
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Validate a dataset and report skipped records, bad links, and bad dates.
    Check,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
    Html,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .init();

    let cli = Cli::parse();
    let settings = load_settings().context("failed to read settings")?;
    let dataset_path = cli.dataset.or(settings.dataset_path.clone());

    match cli.command {
        Command::List {
            city,
            statuses,
            categories,
            format,
        } => {
            let dataset = match &dataset_path {
                Some(path) => load(path)?.0,
                None => Dataset::charleston_demo(),
            };
            let filter = build_filter(city, &statuses, &categories);
            let initial_zoom = settings.initial_zoom;
            let mut surface = HeadlessSurface::new(settings.initial_center, initial_zoom);
            let mut cards: Vec<ProjectCard> = Vec::new();
            let mut orchestrator: RenderOrchestrator<HeadlessSurface> =
                RenderOrchestrator::new(dataset, settings.viewport_controller());
            let summary = orchestrator
                .start(&filter, &mut surface, &mut cards)
                .context("render pass failed")?;

            match format {
                OutputFormat::Text => print!("{}", text_listing(&cards, &summary)),
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&cards)?),
                OutputFormat::Html => println!("{}", list_html(&cards)),
            }
        }
        Command::Check => {
            let path = dataset_path.context("check needs --dataset or a configured dataset_path")?;
            let (dataset, report) = load(&path)?;
            print!("{}", check_report(&path, &dataset, &report));
            if !report.is_clean() {
                std::process::exit(2);
            }
        }
    }

    Ok(())
}

fn load(path: &Path) -> Result<(Dataset, LoadReport)> {
    Dataset::load(path).with_context(|| format!("failed to load dataset {}", path.display()))
}

/// Empty status or category lists mean "no restriction" on the command line.
fn build_filter(city: String, statuses: &[String], categories: &[String]) -> FilterState {
    let mut filter = FilterState::select_all().with_city(city);
    if !statuses.is_empty() {
        filter = filter.with_status(statuses.iter().map(|s| Status::from(s.as_str())));
    }
    if !categories.is_empty() {
        filter = filter.with_category(categories.iter().map(|c| Category::from(c.as_str())));
    }
    filter
}

fn text_listing(cards: &[ProjectCard], summary: &RenderSummary) -> String {
    let mut out = String::new();
    for card in cards {
        out.push_str(&format!(
            "{:<14} {:<10} {:<10} {:<28} {:>16}  {}\n",
            card.id, card.category, card.status, card.name, card.budget, card.dates
        ));
    }
    out.push_str(&format!("{} project(s) visible\n", summary.visible));
    match summary.framed {
        Some(bounds) => out.push_str(&format!(
            "viewport: ({:.5}, {:.5}) to ({:.5}, {:.5})\n",
            bounds.south_west.lat, bounds.south_west.lng, bounds.north_east.lat, bounds.north_east.lng
        )),
        None => out.push_str("viewport: unchanged\n"),
    }
    out
}

fn check_report(path: &Path, dataset: &Dataset, report: &LoadReport) -> String {
    let mut out = format!("{}: {} project(s) loaded\n", path.display(), report.loaded);
    out.push_str(&format!("cities: {}\n", dataset.cities().join(", ")));
    for skipped in &report.skipped {
        out.push_str(&format!("skipped {}: {}\n", skipped.id, skipped.reason.label()));
    }
    if report.dropped_links > 0 {
        out.push_str(&format!("dropped {} invalid link(s)\n", report.dropped_links));
    }
    if report.unparsed_dates > 0 {
        out.push_str(&format!("{} date(s) not in YYYY-MM-DD form\n", report.unparsed_dates));
    }
    if report.is_clean() {
        out.push_str("ok\n");
    }
    out
}
