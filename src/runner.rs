//! Sequential run driver
//!
//! Walks the media list one item at a time, invokes the download pipeline,
//! and tallies outcomes per kind. A failed item is logged and counted but
//! never halts the run; that isolation is the only failure policy here.

use crate::downloader::{Outcome, download};
use crate::types::{MediaItem, MediaKind, Results};
use chrono::NaiveDate;
use std::path::Path;
use tracing::{debug, error};

/// Process every media item in order and return the run tally
///
/// Counting note: the predecessor of this tool incremented the per-kind
/// "downloaded" counter even for failed items. Here a failed item goes to
/// the per-kind failed counter instead, and "downloaded" means the file
/// actually landed on disk.
pub async fn run(
    http: &reqwest::Client,
    items: &[MediaItem],
    media_root: &Path,
    date: NaiveDate,
) -> Results {
    let mut results = Results::default();

    for item in items {
        let filename = item.filename(media_root, date);
        match download(http, item, media_root, date).await {
            Outcome::Downloaded => {
                match item.kind() {
                    MediaKind::Photo => results.photos_downloaded += 1,
                    MediaKind::Video => results.videos_downloaded += 1,
                }
            }
            Outcome::Skipped => {
                match item.kind() {
                    MediaKind::Photo => results.photos_skipped += 1,
                    MediaKind::Video => results.videos_skipped += 1,
                }
                debug!(filename = %filename.display(), "file already exists, skipping download");
            }
            Outcome::Failed(e) => {
                match item.kind() {
                    MediaKind::Photo => results.photos_failed += 1,
                    MediaKind::Video => results.videos_failed += 1,
                }
                error!(id = %item.id(), error = %e, "download failed");
            }
        }
        debug!(filename = %filename.display(), "finished processing media");
    }

    results
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::types::{Photo, Video};
    use wiremock::matchers::{method, path as url_path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()
    }

    fn photo(server_uri: &str, id: &str) -> MediaItem {
        MediaItem::Photo(Photo {
            id: id.into(),
            main_url: format!("{server_uri}/media/{id}.bin"),
        })
    }

    fn video(server_uri: &str, id: &str) -> MediaItem {
        MediaItem::Video(Video {
            id: id.into(),
            video_url: format!("{server_uri}/media/{id}.bin"),
        })
    }

    async fn mount_media(server: &MockServer, id: &str, status: u16) {
        Mock::given(method("GET"))
            .and(url_path(format!("/media/{id}.bin")))
            .respond_with(ResponseTemplate::new(status).set_body_bytes(id.as_bytes().to_vec()))
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn mixed_run_splits_tally_by_kind_and_outcome() {
        let server = MockServer::start().await;
        for id in ["p1", "p2", "v1"] {
            mount_media(&server, id, 200).await;
        }

        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path().join("media");
        tokio::fs::create_dir_all(root.join("2024-05-01")).await.unwrap();

        // p2's destination pre-exists, so it must be skipped.
        tokio::fs::write(root.join("2024-05-01/p2.jpg"), b"already here").await.unwrap();

        let items = vec![
            photo(&server.uri(), "p1"),
            photo(&server.uri(), "p2"),
            video(&server.uri(), "v1"),
        ];
        let results = run(&reqwest::Client::new(), &items, &root, test_date()).await;

        assert_eq!(results.photos_downloaded, 1);
        assert_eq!(results.photos_skipped, 1);
        assert_eq!(results.videos_downloaded, 1);
        assert_eq!(results.videos_skipped, 0);
        assert_eq!(results.photos_failed + results.videos_failed, 0);
    }

    #[tokio::test]
    async fn failed_item_does_not_abort_the_run() {
        let server = MockServer::start().await;
        mount_media(&server, "p1", 500).await;
        mount_media(&server, "p2", 200).await;

        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path().join("media");
        tokio::fs::create_dir_all(root.join("2024-05-01")).await.unwrap();

        let items = vec![photo(&server.uri(), "p1"), photo(&server.uri(), "p2")];
        let results = run(&reqwest::Client::new(), &items, &root, test_date()).await;

        // p2 was processed despite p1's failure.
        assert!(root.join("2024-05-01/p2.jpg").exists());
        assert_eq!(results.photos_downloaded, 1);
        assert_eq!(results.photos_failed, 1);
    }

    #[tokio::test]
    async fn failed_item_is_not_counted_as_downloaded() {
        // The predecessor counted failures as downloads; this pins the fix.
        let server = MockServer::start().await;
        mount_media(&server, "v1", 404).await;

        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path().join("media");
        tokio::fs::create_dir_all(root.join("2024-05-01")).await.unwrap();

        let items = vec![video(&server.uri(), "v1")];
        let results = run(&reqwest::Client::new(), &items, &root, test_date()).await;

        assert_eq!(results.videos_downloaded, 0);
        assert_eq!(results.videos_failed, 1);
        assert_eq!(results.videos_skipped, 0);
    }

    #[tokio::test]
    async fn empty_item_list_yields_zeroed_tally() {
        let tmp = tempfile::tempdir().unwrap();
        let results = run(&reqwest::Client::new(), &[], tmp.path(), test_date()).await;
        assert_eq!(results, Results::default());
    }
}
