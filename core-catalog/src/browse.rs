//! Browse Tree
//!
//! Builds the navigable hierarchy over a loaded catalog:
//!
//! ```text
//! / (root)
//! ├── __RECOMMENDED__        first track of every album
//! └── __ALBUMS__
//!     ├── <album container>  in first-seen order
//!     │   ├── track          in catalog order
//!     │   └── ...
//!     └── ...
//! ```
//!
//! Construction is synchronous and total: any valid track list yields a
//! complete tree, and an empty list yields a root with two empty categories.
//! The tree is rebuilt from scratch whenever the catalog is reloaded; nodes
//! are never mutated in place.

use crate::models::{album_container_id, BrowseNode, Container, Track};
use std::collections::HashMap;
use tracing::debug;

/// Container id of the browse root.
pub const CATALOG_BROWSE_ROOT: &str = "/";

/// Container id of the fixed "Albums" category.
pub const CATALOG_ALBUMS_ROOT: &str = "__ALBUMS__";

/// Container id of the fixed "Recommended" category.
pub const CATALOG_RECOMMENDED_ROOT: &str = "__RECOMMENDED__";

/// Mapping from container id to its ordered child list.
///
/// Children of any container preserve first-seen/catalog order; no
/// re-sorting is performed.
pub struct BrowseTree {
    children: HashMap<String, Vec<BrowseNode>>,
}

impl BrowseTree {
    /// Builds the full hierarchy from a completed track list.
    pub fn new(tracks: &[Track]) -> Self {
        let mut children: HashMap<String, Vec<BrowseNode>> = HashMap::new();

        let recommended = Container {
            id: CATALOG_RECOMMENDED_ROOT.to_string(),
            title: "Recommended".to_string(),
            artist: String::new(),
            artwork_uri: None,
        };
        let albums = Container {
            id: CATALOG_ALBUMS_ROOT.to_string(),
            title: "Albums".to_string(),
            artist: String::new(),
            artwork_uri: None,
        };

        children.insert(
            CATALOG_BROWSE_ROOT.to_string(),
            vec![
                BrowseNode::Container(recommended),
                BrowseNode::Container(albums),
            ],
        );
        children.insert(CATALOG_RECOMMENDED_ROOT.to_string(), Vec::new());
        children.insert(CATALOG_ALBUMS_ROOT.to_string(), Vec::new());

        for track in tracks {
            let album_id = album_container_id(&track.album);

            // Lazily create the album container the first time any track of
            // that album is encountered; albums appear under __ALBUMS__ in
            // first-seen order. Tracks with an empty album name all collapse
            // into the empty-string container.
            if !children.contains_key(&album_id) {
                let container = Container {
                    id: album_id.clone(),
                    title: track.album.clone(),
                    artist: track.artist.clone(),
                    artwork_uri: Some(track.artwork_uri.clone()),
                };
                children
                    .entry(CATALOG_ALBUMS_ROOT.to_string())
                    .or_default()
                    .push(BrowseNode::Container(container));
                children.insert(album_id.clone(), Vec::new());
            }

            children
                .entry(album_id)
                .or_default()
                .push(BrowseNode::Track(track.clone()));

            if track.track_number == 1 {
                children
                    .entry(CATALOG_RECOMMENDED_ROOT.to_string())
                    .or_default()
                    .push(BrowseNode::Track(track.clone()));
            }
        }

        debug!(
            containers = children.len(),
            tracks = tracks.len(),
            "Browse tree built"
        );

        Self { children }
    }

    /// Returns the ordered children of a container id.
    ///
    /// `None` means the id is a leaf or unknown, which callers surface as an
    /// empty browse screen rather than an error.
    pub fn get(&self, container_id: &str) -> Option<&[BrowseNode]> {
        self.children.get(container_id).map(Vec::as_slice)
    }
}
