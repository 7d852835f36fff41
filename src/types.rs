//! Core types for album-dl

use chrono::NaiveDate;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Date format used in directory names and API date filters
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// The two media kinds the portal serves
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MediaKind {
    /// A still photo, saved as `.jpg`
    Photo,
    /// A video, saved as `.mp4`
    Video,
}

impl MediaKind {
    /// File extension for this kind, without the leading dot
    pub fn extension(&self) -> &'static str {
        match self {
            MediaKind::Photo => "jpg",
            MediaKind::Video => "mp4",
        }
    }
}

impl std::fmt::Display for MediaKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MediaKind::Photo => write!(f, "photo"),
            MediaKind::Video => write!(f, "video"),
        }
    }
}

/// A photo record from the photos listing endpoint
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct Photo {
    /// Unique identifier assigned by the portal
    pub id: String,
    /// URL of the full-size image
    pub main_url: String,
}

/// A video record from the videos listing endpoint
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct Video {
    /// Unique identifier assigned by the portal
    pub id: String,
    /// URL of the video file
    #[serde(rename = "video_file_url")]
    pub video_url: String,
}

/// Response body of the photos listing endpoint
#[derive(Debug, Deserialize)]
pub struct PhotosResponse {
    /// Photos within the requested date window
    #[serde(default)]
    pub photos: Vec<Photo>,
}

/// Response body of the videos listing endpoint
#[derive(Debug, Deserialize)]
pub struct VideosResponse {
    /// Videos within the requested date window
    #[serde(default)]
    pub videos: Vec<Video>,
}

/// A downloadable media item
///
/// Closed sum over the two kinds the portal serves. Every variant exposes the
/// same capability set: an identifier, a download URL, and a deterministic
/// destination filename. New kinds are rare enough that a trait object would
/// buy nothing over a plain enum.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MediaItem {
    /// A photo item
    Photo(Photo),
    /// A video item
    Video(Video),
}

impl MediaItem {
    /// Unique identifier of the underlying record
    pub fn id(&self) -> &str {
        match self {
            MediaItem::Photo(p) => &p.id,
            MediaItem::Video(v) => &v.id,
        }
    }

    /// URL the item's bytes are fetched from
    pub fn download_url(&self) -> &str {
        match self {
            MediaItem::Photo(p) => &p.main_url,
            MediaItem::Video(v) => &v.video_url,
        }
    }

    /// Which kind of media this is
    pub fn kind(&self) -> MediaKind {
        match self {
            MediaItem::Photo(_) => MediaKind::Photo,
            MediaItem::Video(_) => MediaKind::Video,
        }
    }

    /// Destination path for this item: `<media_root>/<YYYY-MM-DD>/<id>.<ext>`
    ///
    /// Pure function of (media root, date, id, kind); distinct ids never
    /// collide within one run, and re-running for the same date targets the
    /// same paths, which is what makes the skip-if-exists check idempotent.
    pub fn filename(&self, media_root: &Path, date: NaiveDate) -> PathBuf {
        media_root
            .join(date.format(DATE_FORMAT).to_string())
            .join(format!("{}.{}", self.id(), self.kind().extension()))
    }
}

impl From<Photo> for MediaItem {
    fn from(p: Photo) -> Self {
        MediaItem::Photo(p)
    }
}

impl From<Video> for MediaItem {
    fn from(v: Video) -> Self {
        MediaItem::Video(v)
    }
}

/// Per-run tally of download outcomes, split by media kind
///
/// Mutated only by the run driver; lives for one process execution and is
/// reported once at the end of the run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Results {
    /// Photos fetched and written to disk
    pub photos_downloaded: usize,
    /// Photos whose destination file already existed
    pub photos_skipped: usize,
    /// Photos whose download failed
    pub photos_failed: usize,
    /// Videos fetched and written to disk
    pub videos_downloaded: usize,
    /// Videos whose destination file already existed
    pub videos_skipped: usize,
    /// Videos whose download failed
    pub videos_failed: usize,
}
