//! Portal listing client
//!
//! Thin client for the two authenticated listing endpoints. Listing failures
//! are fatal to the run (no items can be known without them), which is why
//! every error path here maps to the top-level [`Error`] rather than the
//! per-item [`DownloadError`](crate::error::DownloadError).

use crate::config::Config;
use crate::error::{Error, Result};
use crate::types::{DATE_FORMAT, Photo, PhotosResponse, Video, VideosResponse};
use chrono::NaiveDate;
use reqwest::StatusCode;
use url::Url;

/// Client for the portal's photo and video listing endpoints
#[derive(Clone, Debug)]
pub struct PortalClient {
    http: reqwest::Client,
    api_base: Url,
    auth_token: String,
}

impl PortalClient {
    /// Build a client from the run configuration
    ///
    /// No request timeout is configured; a stalled portal blocks the run
    /// rather than failing it.
    pub fn new(config: &Config) -> Result<Self> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| Error::Io(std::io::Error::other(format!(
                "failed to create HTTP client: {e}"
            ))))?;

        Ok(Self {
            http,
            api_base: config.api_base.clone(),
            auth_token: config.auth_token.clone(),
        })
    }

    /// The underlying HTTP client, shared with the download pipeline
    ///
    /// Downloads reuse the connection pool but never the bearer token; auth
    /// is attached per-request by the listing methods only.
    pub fn http(&self) -> &reqwest::Client {
        &self.http
    }

    /// List photos taken on the given date
    ///
    /// # Errors
    ///
    /// Returns [`Error::ListingFetch`], [`Error::ListingStatus`], or
    /// [`Error::ListingDecode`]; all are fatal to the run.
    pub async fn list_photos(&self, date: NaiveDate) -> Result<Vec<Photo>> {
        let body = self.fetch_listing("photos", "web/parent/photos/", "photo", date).await?;
        let decoded: PhotosResponse = serde_json::from_slice(&body)
            .map_err(|e| Error::ListingDecode { endpoint: "photos", source: e })?;
        Ok(decoded.photos)
    }

    /// List videos taken on the given date
    ///
    /// # Errors
    ///
    /// Same failure modes as [`list_photos`](Self::list_photos).
    pub async fn list_videos(&self, date: NaiveDate) -> Result<Vec<Video>> {
        let body = self.fetch_listing("videos", "web/parent/videos/", "video", date).await?;
        let decoded: VideosResponse = serde_json::from_slice(&body)
            .map_err(|e| Error::ListingDecode { endpoint: "videos", source: e })?;
        Ok(decoded.videos)
    }

    /// Issue one authenticated listing request and return the raw body
    ///
    /// The date filter covers the whole selected day (00:00 to 23:59) and
    /// only page 1 is ever requested.
    async fn fetch_listing(
        &self,
        endpoint: &'static str,
        path: &str,
        filter_kind: &str,
        date: NaiveDate,
    ) -> Result<Vec<u8>> {
        let url = self.api_base.join(path).map_err(|e| Error::Config {
            message: format!("cannot build {endpoint} listing URL: {e}"),
            key: None,
        })?;

        let day = date.format(DATE_FORMAT).to_string();
        let query = [
            ("page".to_string(), "1".to_string()),
            (format!("filters[{filter_kind}][datetime_from]"), format!("{day} 00:00")),
            (format!("filters[{filter_kind}][datetime_to]"), format!("{day} 23:59")),
        ];

        let response = self
            .http
            .get(url)
            .bearer_auth(&self.auth_token)
            .query(&query)
            .send()
            .await
            .map_err(|e| Error::ListingFetch { endpoint, source: e })?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(Error::ListingStatus { endpoint, status });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| Error::ListingFetch { endpoint, source: e })?;
        Ok(body.to_vec())
    }
}
