//! JSON Catalog Loader
//!
//! Downloads a remote JSON catalog document and normalizes it into the
//! [`Track`](crate::models::Track) list the rest of the core operates on.
//!
//! ## Document shape
//!
//! The document is either a bare JSON array of song records or an object
//! wrapping one under a `music` key:
//!
//! ```json
//! {
//!   "music": [
//!     {
//!       "id": "wake_up_01",
//!       "title": "Intro (The Way Of Waking Up)",
//!       "album": "Wake Up",
//!       "artist": "The Kyoto Connection",
//!       "genre": "Electronic",
//!       "source": "Intro_The_Way_Of_Waking_Up.mp3",
//!       "image": "art.jpg",
//!       "trackNumber": 1,
//!       "totalTrackCount": 13,
//!       "duration": 90
//!     }
//!   ]
//! }
//! ```
//!
//! `source` and `image` may be relative to the catalog document's own
//! location; normalization resolves them to absolute URLs. `duration` is in
//! whole seconds and becomes milliseconds on the [`Track`](crate::models::Track).

use crate::error::{CatalogError, Result};
use crate::models::{DownloadStatus, Track};
use bridge_http::{HttpClient, HttpRequest};
use core_runtime::CatalogConfig;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

/// Default timeout for the catalog fetch when constructed without a config.
const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// One raw song record as it appears in the catalog JSON.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSong {
    #[serde(default)]
    id: String,
    title: String,
    #[serde(default)]
    album: String,
    #[serde(default)]
    artist: String,
    #[serde(default)]
    album_artist: String,
    #[serde(default)]
    genre: String,
    #[serde(default)]
    composer: String,
    source: String,
    image: String,
    #[serde(default)]
    track_number: u32,
    #[serde(default)]
    disc_number: u32,
    #[serde(default)]
    total_track_count: u32,
    /// Duration in whole seconds
    #[serde(default)]
    duration: i64,
}

/// The two accepted top-level document shapes.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum CatalogDocument {
    Wrapped { music: Vec<RawSong> },
    Bare(Vec<RawSong>),
}

impl CatalogDocument {
    fn into_songs(self) -> Vec<RawSong> {
        match self {
            CatalogDocument::Wrapped { music } => music,
            CatalogDocument::Bare(songs) => songs,
        }
    }
}

/// Downloads and normalizes a remote JSON catalog.
///
/// The loader performs a single HTTP GET per [`load`](Self::load) call and
/// has no caching or retry behavior; a failed load produces an error and no
/// partial catalog.
pub struct JsonCatalogLoader {
    http: Arc<dyn HttpClient>,
    catalog_url: Url,
    fetch_timeout: Duration,
}

impl JsonCatalogLoader {
    /// Creates a loader for the given catalog location.
    pub fn new(http: Arc<dyn HttpClient>, catalog_url: Url) -> Self {
        Self {
            http,
            catalog_url,
            fetch_timeout: DEFAULT_FETCH_TIMEOUT,
        }
    }

    /// Creates a loader from a composition-root configuration.
    pub fn from_config(config: &CatalogConfig) -> Self {
        Self {
            http: Arc::clone(&config.http_client),
            catalog_url: config.catalog_url.clone(),
            fetch_timeout: config.request_timeout,
        }
    }

    /// The catalog document location this loader fetches from.
    pub fn catalog_url(&self) -> &Url {
        &self.catalog_url
    }

    /// Fetches and normalizes the catalog.
    ///
    /// Returns the full track list in source JSON order, or the first error
    /// encountered. Any failure invalidates the whole load; there is no
    /// partially populated result.
    pub async fn load(&self) -> Result<Vec<Track>> {
        debug!(url = %self.catalog_url, "Fetching catalog");

        let request = HttpRequest::get(self.catalog_url.as_str())
            .header("Accept", "application/json")
            .timeout(self.fetch_timeout);

        let response = self.http.execute(request).await?;

        if !response.is_success() {
            warn!(status = response.status, url = %self.catalog_url, "Catalog fetch failed");
            return Err(CatalogError::Status {
                status: response.status,
            });
        }

        let document: CatalogDocument = serde_json::from_slice(&response.body)
            .map_err(|e| CatalogError::Parse(format!("Failed to parse catalog JSON: {}", e)))?;

        let songs = document.into_songs();
        debug!(songs = songs.len(), "Parsed catalog document");

        let mut tracks = Vec::with_capacity(songs.len());
        for song in songs {
            tracks.push(self.normalize(song)?);
        }

        info!(tracks = tracks.len(), url = %self.catalog_url, "Catalog loaded");
        Ok(tracks)
    }

    /// Converts one raw song record into a normalized [`Track`].
    fn normalize(&self, song: RawSong) -> Result<Track> {
        if song.id.is_empty() && song.title.is_empty() {
            return Err(CatalogError::Parse(
                "Song record has neither id nor title".to_string(),
            ));
        }

        let id = if song.id.is_empty() {
            Track::derive_id(&song.title)
        } else {
            song.id
        };

        let media_uri = self.resolve(&song.source)?;
        let artwork_uri = self.resolve(&song.image)?;

        Ok(Track {
            id,
            display_title: song.title.clone(),
            display_subtitle: song.artist.clone(),
            display_description: song.album.clone(),
            title: song.title,
            artist: song.artist,
            album: song.album,
            album_artist: song.album_artist,
            genre: song.genre,
            composer: song.composer,
            track_number: song.track_number,
            disc_number: song.disc_number,
            total_track_count: song.total_track_count,
            duration_ms: song.duration.saturating_mul(1000),
            media_uri,
            artwork_uri,
            download_status: DownloadStatus::NotDownloaded,
            is_browsable: false,
            is_playable: true,
        })
    }

    /// Resolves a possibly-relative URI against the catalog document.
    ///
    /// Values that parse as absolute URLs pass through untouched; relative
    /// values resolve against the document's own location, so `art.jpg` next
    /// to `https://host/path/catalog.json` becomes
    /// `https://host/path/art.jpg`.
    fn resolve(&self, value: &str) -> Result<Url> {
        match Url::parse(value) {
            Ok(url) => Ok(url),
            Err(url::ParseError::RelativeUrlWithoutBase) => {
                Ok(self.catalog_url.join(value)?)
            }
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use bridge_http::{HttpError, HttpResponse};
    use std::collections::HashMap;

    const CATALOG_URL: &str = "https://storage.example.com/music/catalog.json";

    struct StubHttpClient {
        status: u16,
        body: &'static str,
    }

    #[async_trait]
    impl HttpClient for StubHttpClient {
        async fn execute(&self, _request: HttpRequest) -> bridge_http::Result<HttpResponse> {
            Ok(HttpResponse {
                status: self.status,
                headers: HashMap::new(),
                body: bytes::Bytes::from_static(self.body.as_bytes()),
            })
        }
    }

    struct FailingHttpClient;

    #[async_trait]
    impl HttpClient for FailingHttpClient {
        async fn execute(&self, _request: HttpRequest) -> bridge_http::Result<HttpResponse> {
            Err(HttpError::Timeout)
        }
    }

    fn loader_with(status: u16, body: &'static str) -> JsonCatalogLoader {
        JsonCatalogLoader::new(
            Arc::new(StubHttpClient { status, body }),
            Url::parse(CATALOG_URL).unwrap(),
        )
    }

    const WRAPPED: &str = r#"{
        "music": [
            {
                "title": "Intro",
                "album": "Wake Up",
                "artist": "The Kyoto Connection",
                "genre": "Electronic",
                "source": "Intro.mp3",
                "image": "art.jpg",
                "trackNumber": 1,
                "totalTrackCount": 13,
                "duration": 90
            },
            {
                "id": "song_two",
                "title": "The Way",
                "album": "Wake Up",
                "artist": "The Kyoto Connection",
                "source": "https://cdn.example.com/the_way.mp3",
                "image": "https://cdn.example.com/art.jpg",
                "trackNumber": 2,
                "duration": 200
            }
        ]
    }"#;

    #[tokio::test]
    async fn test_load_wrapped_document() {
        let tracks = loader_with(200, WRAPPED).load().await.unwrap();

        assert_eq!(tracks.len(), 2);
        assert_eq!(tracks[0].id, "intro");
        assert_eq!(tracks[0].duration_ms, 90_000);
        assert_eq!(tracks[0].track_number, 1);
        assert_eq!(tracks[1].id, "song_two");
        assert_eq!(tracks[1].display_subtitle, "The Kyoto Connection");
    }

    #[tokio::test]
    async fn test_load_bare_array_document() {
        let body = r#"[
            {"title": "Solo", "source": "solo.mp3", "image": "solo.jpg", "duration": 10}
        ]"#;
        let tracks = loader_with(200, body).load().await.unwrap();
        assert_eq!(tracks.len(), 1);
        assert_eq!(tracks[0].id, "solo");
    }

    #[tokio::test]
    async fn test_relative_uris_resolve_against_document_directory() {
        let tracks = loader_with(200, WRAPPED).load().await.unwrap();

        assert_eq!(
            tracks[0].media_uri.as_str(),
            "https://storage.example.com/music/Intro.mp3"
        );
        assert_eq!(
            tracks[0].artwork_uri.as_str(),
            "https://storage.example.com/music/art.jpg"
        );
    }

    #[tokio::test]
    async fn test_absolute_uris_left_untouched() {
        let tracks = loader_with(200, WRAPPED).load().await.unwrap();

        assert_eq!(
            tracks[1].media_uri.as_str(),
            "https://cdn.example.com/the_way.mp3"
        );
        assert_eq!(
            tracks[1].artwork_uri.as_str(),
            "https://cdn.example.com/art.jpg"
        );
    }

    #[tokio::test]
    async fn test_scheme_prefixed_relative_path_still_resolves() {
        // A value like "https-backup/a.mp3" has no scheme; it must resolve
        // as a relative path rather than pass through as absolute.
        let body = r#"[
            {"title": "Backup", "source": "https-backup/a.mp3", "image": "b.jpg", "duration": 1}
        ]"#;
        let tracks = loader_with(200, body).load().await.unwrap();
        assert_eq!(
            tracks[0].media_uri.as_str(),
            "https://storage.example.com/music/https-backup/a.mp3"
        );
    }

    #[tokio::test]
    async fn test_http_error_status() {
        let err = loader_with(404, "").load().await.unwrap_err();
        assert!(matches!(err, CatalogError::Status { status: 404 }));
    }

    #[tokio::test]
    async fn test_network_failure() {
        let loader = JsonCatalogLoader::new(
            Arc::new(FailingHttpClient),
            Url::parse(CATALOG_URL).unwrap(),
        );
        let err = loader.load().await.unwrap_err();
        assert!(matches!(err, CatalogError::Network(_)));
    }

    #[tokio::test]
    async fn test_malformed_json() {
        let err = loader_with(200, "{not json").load().await.unwrap_err();
        assert!(matches!(err, CatalogError::Parse(_)));
    }

    #[tokio::test]
    async fn test_missing_title_is_parse_error() {
        let body = r#"[{"source": "a.mp3", "image": "a.jpg", "duration": 1}]"#;
        let err = loader_with(200, body).load().await.unwrap_err();
        assert!(matches!(err, CatalogError::Parse(_)));
    }

    #[tokio::test]
    async fn test_missing_source_is_parse_error() {
        let body = r#"[{"title": "No Source", "image": "a.jpg", "duration": 1}]"#;
        let err = loader_with(200, body).load().await.unwrap_err();
        assert!(matches!(err, CatalogError::Parse(_)));
    }

    #[tokio::test]
    async fn test_explicit_id_wins_over_derivation() {
        let body = r#"[
            {"id": "keep_me", "title": "Ignored For Id", "source": "a.mp3", "image": "a.jpg", "duration": 1}
        ]"#;
        let tracks = loader_with(200, body).load().await.unwrap();
        assert_eq!(tracks[0].id, "keep_me");
    }

    #[tokio::test]
    async fn test_order_preserved() {
        let body = r#"[
            {"title": "Zeta", "source": "z.mp3", "image": "z.jpg", "duration": 1},
            {"title": "Alpha", "source": "a.mp3", "image": "a.jpg", "duration": 1}
        ]"#;
        let tracks = loader_with(200, body).load().await.unwrap();
        assert_eq!(tracks[0].title, "Zeta");
        assert_eq!(tracks[1].title, "Alpha");
    }
}
