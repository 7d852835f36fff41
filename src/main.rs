//! album-dl binary: download a day's photos and videos from the portal.

use album_dl::types::DATE_FORMAT;
use album_dl::{Config, MediaItem, PortalClient, runner};
use chrono::NaiveDate;
use clap::Parser;
use std::time::Instant;
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;

/// Download photos and videos for a given date from the parent portal
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
struct Args {
    /// Date in YYYY-MM-DD format to download photos and videos for
    #[arg(long)]
    date: Option<String>,

    /// Enable debug logging
    #[arg(long)]
    debug: bool,
}

/// Resolve the run date from the `--date` flag
///
/// An omitted flag uses today's date; an unparsable value also falls back to
/// today (with a warning) rather than erroring, matching long-standing
/// behavior scripts may rely on.
fn resolve_date(arg: Option<&str>) -> NaiveDate {
    match arg {
        Some(raw) => match NaiveDate::parse_from_str(raw, DATE_FORMAT) {
            Ok(date) => date,
            Err(e) => {
                warn!(date = raw, error = %e, "unparsable --date, falling back to today");
                chrono::Local::now().date_naive()
            }
        },
        None => chrono::Local::now().date_naive(),
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let args = Args::parse();
    let timer = Instant::now();

    let default_level = if args.debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    info!(version = env!("CARGO_PKG_VERSION"), "starting");
    if args.debug {
        debug!("debug logging enabled");
    }

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "invalid configuration");
            std::process::exit(1);
        }
    };

    let date = resolve_date(args.date.as_deref());
    match args.date {
        Some(_) => info!(date = %date, "using provided date for download"),
        None => info!(date = %date, "no date provided, using today's date"),
    }

    let client = match PortalClient::new(&config) {
        Ok(client) => client,
        Err(e) => {
            error!(error = %e, "failed to set up HTTP client");
            std::process::exit(1);
        }
    };

    // Dated media directory, created up front. A failure here is logged but
    // not fatal; per-item create errors will surface it again.
    let day_dir = config.media_root.join(date.format(DATE_FORMAT).to_string());
    if let Err(e) = tokio::fs::create_dir_all(&day_dir).await {
        error!(path = %day_dir.display(), error = %e, "failed to create media directory");
    }

    let photos = match client.list_photos(date).await {
        Ok(photos) => photos,
        Err(e) => {
            error!(error = %e, "failed to fetch photo listing");
            std::process::exit(1);
        }
    };

    let videos = match client.list_videos(date).await {
        Ok(videos) => videos,
        Err(e) => {
            error!(error = %e, "failed to fetch video listing");
            std::process::exit(1);
        }
    };

    debug!(photos = photos.len(), videos = videos.len(), "listings fetched");

    let items: Vec<MediaItem> = photos
        .into_iter()
        .map(MediaItem::from)
        .chain(videos.into_iter().map(MediaItem::from))
        .collect();

    let results = runner::run(client.http(), &items, &config.media_root, date).await;

    info!(
        downloaded = results.photos_downloaded,
        skipped = results.photos_skipped,
        failed = results.photos_failed,
        "photos done"
    );
    info!(
        downloaded = results.videos_downloaded,
        skipped = results.videos_skipped,
        failed = results.videos_failed,
        "videos done"
    );
    info!(elapsed = ?timer.elapsed(), "done");
}
