//! # album-dl
//!
//! Library behind the `album-dl` binary: fetches the day's photo and video
//! listings from a parent-portal HTTP API and downloads each item into
//! `<media_root>/<YYYY-MM-DD>/<id>.<ext>`, skipping files that already exist.
//!
//! The pipeline is deliberately sequential and stateless between items:
//! existence guard, then fetch, then sink, one item at a time. Re-running for
//! the same date only performs existence checks for items already on disk.
//!
//! ## Quick Start
//!
//! ```no_run
//! use album_dl::{Config, PortalClient, MediaItem, runner};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> album_dl::Result<()> {
//!     let config = Config::from_env()?;
//!     let client = PortalClient::new(&config)?;
//!     let date = chrono::Local::now().date_naive();
//!
//!     let items: Vec<MediaItem> = client
//!         .list_photos(date)
//!         .await?
//!         .into_iter()
//!         .map(MediaItem::from)
//!         .collect();
//!
//!     let results = runner::run(client.http(), &items, &config.media_root, date).await;
//!     println!("downloaded {} photos", results.photos_downloaded);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

/// Configuration from the process environment
pub mod config;
/// Per-item download pipeline (guard, fetch, sink)
pub mod downloader;
/// Error types
pub mod error;
/// Portal listing client
pub mod portal;
/// Sequential run driver and tallying
pub mod runner;
/// Core media types
pub mod types;

// Re-export commonly used types
pub use config::Config;
pub use downloader::{Outcome, download};
pub use error::{CopyError, DownloadError, Error, Result};
pub use portal::PortalClient;
pub use types::{MediaItem, MediaKind, Photo, Results, Video};
