//! Error types for album-dl
//!
//! Two layers of errors exist, mirroring the two failure scopes of a run:
//! - [`Error`] - run-fatal conditions (configuration, listing endpoints).
//!   Any of these aborts the process before or instead of downloading.
//! - [`DownloadError`] - per-item download failures. These are caught at the
//!   run-driver boundary, logged, counted, and never abort the run.

use reqwest::StatusCode;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for album-dl operations
pub type Result<T> = std::result::Result<T, Error>;

/// Run-fatal error type
///
/// Every variant here terminates the run: without configuration or listings
/// there are no items to process.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error with context about which setting is missing or invalid
    #[error("configuration error: {message}")]
    Config {
        /// Human-readable error message describing the configuration issue
        message: String,
        /// The configuration key that caused the error (e.g., "API_BASE_URL")
        key: Option<String>,
    },

    /// A listing request could not be sent or failed at the transport level
    #[error("listing request to {endpoint} failed: {source}")]
    ListingFetch {
        /// The listing endpoint that was being fetched (e.g., "photos")
        endpoint: &'static str,
        /// The underlying transport error
        #[source]
        source: reqwest::Error,
    },

    /// A listing request completed with a non-success HTTP status
    #[error("listing request to {endpoint} returned {status}")]
    ListingStatus {
        /// The listing endpoint that was being fetched (e.g., "videos")
        endpoint: &'static str,
        /// The HTTP status the server returned
        status: StatusCode,
    },

    /// A listing response body could not be decoded into media items
    #[error("failed to decode {endpoint} listing: {source}")]
    ListingDecode {
        /// The listing endpoint whose body failed to decode
        endpoint: &'static str,
        /// The underlying JSON decode error
        #[source]
        source: serde_json::Error,
    },

    /// I/O error outside the per-item pipeline (e.g., media directory creation)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Per-item download failure
///
/// Produced by the download pipeline and carried inside
/// [`Outcome::Failed`](crate::downloader::Outcome::Failed). Never fatal:
/// the run driver logs it and moves on to the next item.
#[derive(Debug, Error)]
pub enum DownloadError {
    /// The media URL answered with a non-200 status; no bytes were consumed
    #[error("download of {url} failed with status {status}")]
    RemoteStatus {
        /// The media download URL
        url: String,
        /// The HTTP status the server returned
        status: StatusCode,
    },

    /// The media URL could not be reached (DNS, connection refused, timeout)
    #[error("transport error fetching {url}: {source}")]
    Transport {
        /// The media download URL
        url: String,
        /// The underlying transport error
        #[source]
        source: reqwest::Error,
    },

    /// The destination file could not be created
    #[error("failed to create {}: {source}", path.display())]
    Create {
        /// The destination path that could not be created
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Copying bytes into the destination file failed mid-stream
    ///
    /// A partially written file is left on disk; no cleanup is attempted.
    #[error("copy to {} failed: {source}", path.display())]
    Copy {
        /// The destination path being written when the copy failed
        path: PathBuf,
        /// Which side of the copy failed
        #[source]
        source: CopyError,
    },
}

/// The failing side of a stream-to-file copy
#[derive(Debug, Error)]
pub enum CopyError {
    /// Reading the next chunk from the HTTP response failed
    #[error("reading response body: {0}")]
    Read(#[source] reqwest::Error),

    /// Writing a chunk to the destination file failed (e.g., disk full)
    #[error("writing to file: {0}")]
    Write(#[source] std::io::Error),
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn config_error_display_includes_message() {
        let err = Error::Config {
            message: "API_BASE_URL environment variable is not set".into(),
            key: Some("API_BASE_URL".into()),
        };
        assert_eq!(
            err.to_string(),
            "configuration error: API_BASE_URL environment variable is not set"
        );
    }

    #[test]
    fn listing_status_display_names_endpoint_and_status() {
        let err = Error::ListingStatus {
            endpoint: "photos",
            status: StatusCode::UNAUTHORIZED,
        };
        let msg = err.to_string();
        assert!(msg.contains("photos"), "message should name the endpoint: {msg}");
        assert!(msg.contains("401"), "message should carry the status: {msg}");
    }

    #[test]
    fn remote_status_display_names_url() {
        let err = DownloadError::RemoteStatus {
            url: "http://portal.example/p1.bin".into(),
            status: StatusCode::INTERNAL_SERVER_ERROR,
        };
        let msg = err.to_string();
        assert!(msg.contains("http://portal.example/p1.bin"), "{msg}");
        assert!(msg.contains("500"), "{msg}");
    }

    #[test]
    fn copy_error_chain_exposes_io_source() {
        let io = std::io::Error::other("disk full");
        let err = DownloadError::Copy {
            path: PathBuf::from("media/2024-05-01/p1.jpg"),
            source: CopyError::Write(io),
        };
        let msg = err.to_string();
        assert!(msg.contains("media/2024-05-01/p1.jpg"), "{msg}");

        // The io::Error must stay reachable through the source chain.
        let source = std::error::Error::source(&err).expect("copy error has a source");
        assert!(source.to_string().contains("writing to file"));
    }
}
