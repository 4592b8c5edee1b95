//! Race map generator.
//!
//! Scrapes the tracking sheet, places each runner on the course by their
//! reported mileage and writes an interactive map.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;
use url::Url;

use racemap::course::load_course;
use racemap::map::{MapDocument, DEFAULT_ZOOM};
use racemap::roster::Roster;
use racemap::route::RouteIndex;
use racemap::tracking::{participants_from_table, TrackingSheetFetcher, DEFAULT_SHEET_URL};

#[derive(Parser, Debug)]
#[command(name = "generate")]
#[command(about = "Render runner positions on the race course as an HTML map")]
struct Args {
    /// Tracking sheet page
    #[arg(long, default_value = DEFAULT_SHEET_URL)]
    url: Url,

    /// Course KMZ archive
    #[arg(long, default_value = "GVRAT Course.kml.kmz")]
    course: PathBuf,

    /// Output HTML file
    #[arg(short, long, default_value = "docs/index.html")]
    output: PathBuf,

    /// Country code to keep from the sheet
    #[arg(long, default_value = "CZ")]
    country: String,

    /// Optional TOML roster replacing the built-in one
    #[arg(long)]
    roster: Option<PathBuf>,

    /// Initial zoom level
    #[arg(long, default_value_t = DEFAULT_ZOOM)]
    zoom: u8,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let args = Args::parse();

    info!("Race map generator");
    info!("Course: {}", args.course.display());

    // Scrape results
    let fetcher = TrackingSheetFetcher::new()?;
    let tables = fetcher.fetch_tables(&args.url).await?;
    let mut participants = participants_from_table(&tables, &args.country)
        .context("Unexpected tracking sheet layout")?;

    let roster = match &args.roster {
        Some(path) => Roster::load_from_file(path)?,
        None => Roster::default(),
    };
    roster.apply(&mut participants);

    // Place runners on the course
    let course = load_course(&args.course)?;
    let index = RouteIndex::from_track(course.track.clone())?;
    index.locate(&mut participants)?;

    let map = MapDocument::for_race(&course, &participants, args.zoom)
        .with_title(&format!("Race map ({})", args.country));
    map.write_to(&args.output)?;

    println!("Done");
    Ok(())
}
