//! Domain models for the music catalog
//!
//! Tracks and containers are created once during a catalog load and are
//! immutable thereafter. All metadata lives in named, typed fields rather
//! than a string-keyed extras map.

use serde::{Deserialize, Serialize};
use url::Url;

/// Download state of a track's audio content.
///
/// Informational only; nothing in this core performs the download.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DownloadStatus {
    #[default]
    NotDownloaded,
    Downloading,
    Downloaded,
}

/// One playable item of the catalog with complete normalized metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    /// Stable unique identifier within the catalog
    pub id: String,
    /// Track title
    pub title: String,
    /// Track artist
    pub artist: String,
    /// Album name
    pub album: String,
    /// Album artist (for compilations)
    pub album_artist: String,
    /// Music genre
    pub genre: String,
    /// Composer
    pub composer: String,
    /// Track position on album
    pub track_number: u32,
    /// Disc number for multi-disc albums
    pub disc_number: u32,
    /// Total number of tracks on the album
    pub total_track_count: u32,
    /// Duration in milliseconds
    pub duration_ms: i64,
    /// Absolute URI of the audio content
    pub media_uri: Url,
    /// Absolute URI of the cover image
    pub artwork_uri: Url,
    /// Download state of the audio content
    pub download_status: DownloadStatus,
    /// Whether this item can be browsed into (always false for tracks)
    pub is_browsable: bool,
    /// Whether this item can be played (always true for tracks)
    pub is_playable: bool,
    /// Presentation copy of the title
    pub display_title: String,
    /// Presentation copy of the artist
    pub display_subtitle: String,
    /// Presentation copy of the album
    pub display_description: String,
}

impl Track {
    /// Derives a stable id from a title.
    ///
    /// The title is lower-cased, whitespace becomes `_`, and every other
    /// character outside `[a-z0-9_]` is dropped. The output alphabet is a
    /// fixed point of the transformation, so deriving twice from the same
    /// input yields the same id.
    pub fn derive_id(title: &str) -> String {
        title
            .to_lowercase()
            .chars()
            .filter_map(|c| {
                if c.is_whitespace() {
                    Some('_')
                } else if c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' {
                    Some(c)
                } else {
                    None
                }
            })
            .collect()
    }
}

/// A named browsable node of the hierarchy (root, category, or album).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Container {
    /// Container identifier, unique within the tree
    pub id: String,
    /// Display title
    pub title: String,
    /// Subtitle, the first-seen artist for album containers
    pub artist: String,
    /// Cover image, if the container has one
    pub artwork_uri: Option<Url>,
}

/// One entry in a container's child list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum BrowseNode {
    Container(Container),
    Track(Track),
}

impl BrowseNode {
    pub fn id(&self) -> &str {
        match self {
            BrowseNode::Container(c) => &c.id,
            BrowseNode::Track(t) => &t.id,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            BrowseNode::Container(c) => &c.title,
            BrowseNode::Track(t) => &t.title,
        }
    }

    pub fn is_browsable(&self) -> bool {
        matches!(self, BrowseNode::Container(_))
    }

    pub fn is_playable(&self) -> bool {
        matches!(self, BrowseNode::Track(_))
    }
}

/// Computes the container id for an album name.
///
/// URL-safe encoding keeps the id stable and free of path-delimiter
/// surprises while remaining reversible for debugging.
pub fn album_container_id(album: &str) -> String {
    urlencoding::encode(album).into_owned()
}
