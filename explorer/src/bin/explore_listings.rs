//! Fetch listings for a category and viewport and print the marker script.
//!
//! Runs the same pipeline the map screen runs: a category transition, then an
//! optional bounds transition delivered through the map surface bridge. The
//! resulting `updateMarkers(...)` script is written to stdout.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::ffi::OsString;
use std::sync::Arc;

use clap::Parser;
use color_eyre::eyre::{Context, Result, eyre};
use explorer::config::ExplorerSettings;
use explorer::domain::category::DEFAULT_CATEGORY;
use explorer::domain::{PhotoGallery, PipelineOutcome, ViewportConfig, ViewportController};
use explorer::inbound::map_surface::{MapSurfaceBridge, SurfaceMessage};
use explorer::outbound::appwrite::{AppwriteConnection, AppwriteListingSource, AppwritePhotoStore};
use geo_bounds::MapBounds;
use ortho_config::OrthoConfig;
use tokio::runtime::Builder;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

const BIN_NAME: &str = "explore-listings";

/// `explore-listings` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "explore-listings",
    about = "Fetch listings for a category and viewport and print the map marker script",
    version
)]
struct CliArgs {
    /// Category label to browse.
    #[arg(long, value_name = "label", default_value = DEFAULT_CATEGORY)]
    category: String,
    /// Viewport as `south,west,north,east`.
    #[arg(
        long,
        value_name = "south,west,north,east",
        value_parser = parse_bounds
    )]
    bounds: Option<MapBounds>,
    /// Also print preview URLs for each marker's photos.
    #[arg(long)]
    photos: bool,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let args = CliArgs::parse();
    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .wrap_err("failed to build explorer runtime")?;
    runtime.block_on(run(args))
}

async fn run(args: CliArgs) -> Result<()> {
    // Settings come from the environment and config files only; the command
    // line belongs to clap.
    let settings = ExplorerSettings::load_from_iter([OsString::from(BIN_NAME)])
        .map_err(|error| eyre!("failed to load explorer settings: {error}"))?;

    let connection =
        Arc::new(AppwriteConnection::new(&settings).wrap_err("failed to build HTTP client")?);
    let source = Arc::new(AppwriteListingSource::new(Arc::clone(&connection), &settings));
    let controller = Arc::new(ViewportController::new(
        source,
        ViewportConfig {
            page_size: settings.page_size(),
        },
    ));
    let bridge = MapSurfaceBridge::new(Arc::clone(&controller));

    let outcome = controller
        .category_changed(&args.category)
        .await
        .wrap_err("invalid category")?;
    ensure_applied(outcome)?;

    let command = match args.bounds {
        Some(bounds) => bridge
            .dispatch(SurfaceMessage::BoundsChanged(bounds))
            .await
            .ok_or_else(|| eyre!("listing fetch for the requested bounds failed"))?,
        None => bridge.render_markers(),
    };
    println!(
        "{}",
        command
            .to_script()
            .wrap_err("failed to render marker script")?
    );

    if args.photos {
        let gallery = PhotoGallery::new(Arc::new(AppwritePhotoStore::new(connection, &settings)));
        for marker in controller.snapshot().markers {
            for url in gallery.photos_for_marker(&marker.id).await {
                println!("{}\t{url}", marker.id);
            }
        }
    }
    Ok(())
}

fn ensure_applied(outcome: PipelineOutcome) -> Result<()> {
    match outcome {
        PipelineOutcome::Applied { .. } => Ok(()),
        PipelineOutcome::Failed { error, .. } => {
            Err(eyre!(error).wrap_err("listing fetch failed"))
        }
        PipelineOutcome::Superseded { generation, latest } => Err(eyre!(
            "listing fetch {generation} superseded by {latest}"
        )),
    }
}

fn parse_bounds(raw: &str) -> Result<MapBounds, String> {
    let values = raw
        .split(',')
        .map(str::trim)
        .map(str::parse::<f64>)
        .collect::<Result<Vec<_>, _>>()
        .map_err(|error| format!("failed to parse bounds value: {error}"))?;
    let &[south, west, north, east] = values.as_slice() else {
        return Err("bounds must contain exactly four comma-separated numeric values".to_owned());
    };
    MapBounds::new(north, south, east, west).map_err(|error| error.to_string())
}
