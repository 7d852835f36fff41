//! Per-item download pipeline
//!
//! One media item flows through three stages: the existence guard (skip work
//! already done), the fetcher (unauthenticated GET on the media URL), and the
//! file sink (stream the body to the destination path). [`download`] composes
//! the three and reports a single [`Outcome`].
//!
//! The pipeline holds no shared mutable state, so invocations are independent
//! per item; the current run driver simply calls it sequentially.

use crate::error::{CopyError, DownloadError};
use crate::types::MediaItem;
use chrono::NaiveDate;
use futures::StreamExt;
use std::path::Path;
use tokio::io::AsyncWriteExt;
use tracing::debug;

/// Result of processing one media item
#[derive(Debug)]
pub enum Outcome {
    /// The item was fetched and written to its destination path
    Downloaded,
    /// The destination file already existed; no network I/O was performed
    Skipped,
    /// The download failed; any partially written file is left in place
    Failed(DownloadError),
}

/// Download one media item to `<media_root>/<date>/<id>.<ext>`
///
/// Runs the existence guard first: if the destination file is already
/// present the function returns [`Outcome::Skipped`] without touching the
/// network, which makes repeat runs for the same date idempotent.
pub async fn download(
    http: &reqwest::Client,
    item: &MediaItem,
    media_root: &Path,
    date: NaiveDate,
) -> Outcome {
    let path = item.filename(media_root, date);

    if already_present(&path).await {
        return Outcome::Skipped;
    }

    let response = match fetch(http, item.download_url()).await {
        Ok(response) => response,
        Err(e) => return Outcome::Failed(e),
    };

    match sink(&path, response).await {
        Ok(()) => Outcome::Downloaded,
        Err(e) => Outcome::Failed(e),
    }
}

/// Existence guard: true if the destination file is already on disk
///
/// An ambiguous stat result (e.g., a permission error on the parent
/// directory) is logged and treated as "not present": only a positively
/// confirmed file suppresses the download.
async fn already_present(path: &Path) -> bool {
    match tokio::fs::try_exists(path).await {
        Ok(exists) => exists,
        Err(e) => {
            debug!(path = %path.display(), error = %e, "existence check inconclusive, proceeding");
            false
        }
    }
}

/// Fetcher: GET the media URL and return the response on HTTP 200
///
/// No authentication header is sent; media URLs are pre-signed by the
/// portal. No retry happens at this layer.
async fn fetch(http: &reqwest::Client, url: &str) -> Result<reqwest::Response, DownloadError> {
    let response = http.get(url).send().await.map_err(|e| DownloadError::Transport {
        url: url.to_string(),
        source: e,
    })?;

    let status = response.status();
    if status != reqwest::StatusCode::OK {
        return Err(DownloadError::RemoteStatus {
            url: url.to_string(),
            status,
        });
    }

    Ok(response)
}

/// File sink: create the destination file and stream the response into it
///
/// The file handle and the response stream are dropped on every exit path.
/// A mid-stream failure leaves the partial file on disk; no cleanup is
/// attempted.
async fn sink(path: &Path, response: reqwest::Response) -> Result<(), DownloadError> {
    let mut file = tokio::fs::File::create(path).await.map_err(|e| DownloadError::Create {
        path: path.to_path_buf(),
        source: e,
    })?;

    let mut stream = response.bytes_stream();
    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(|e| DownloadError::Copy {
            path: path.to_path_buf(),
            source: CopyError::Read(e),
        })?;
        file.write_all(&chunk).await.map_err(|e| DownloadError::Copy {
            path: path.to_path_buf(),
            source: CopyError::Write(e),
        })?;
    }

    file.flush().await.map_err(|e| DownloadError::Copy {
        path: path.to_path_buf(),
        source: CopyError::Write(e),
    })?;

    Ok(())
}
