//! Music Source
//!
//! The readiness-gated owner of the catalog. A [`CatalogMusicSource`] runs
//! exactly one load, publishes the resulting track list as an immutable
//! snapshot, and arbitrates access for consumers that arrive before or after
//! loading completes.
//!
//! ## Readiness contract
//!
//! - A callback registered before the load resolves is recorded and invoked
//!   later, exactly once, with `true` on success or `false` on failure.
//!   Pre-resolution callbacks fire in registration order.
//! - A callback registered after resolution is invoked synchronously and
//!   immediately with the recorded outcome.
//! - No callback ever fires twice for a given source instance, and the state
//!   machine never leaves a terminal state.
//!
//! ## Search
//!
//! Free-text search runs three prioritized substring tiers over the catalog
//! (artist/album-artist, then album, then title), short-circuiting on the
//! first non-empty tier. Callers that know which field the user meant can
//! pass [`SearchHints`] for exact field-focused matching first.

use crate::browse::BrowseTree;
use crate::error::{CatalogError, Result};
use crate::loader::JsonCatalogLoader;
use crate::models::Track;
use async_trait::async_trait;
use core_runtime::CatalogConfig;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, error, info};

/// Readiness state of a music source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogState {
    /// No load has been requested yet
    Created,
    /// A load is in flight
    Initializing,
    /// The catalog is loaded and immutable (terminal)
    Initialized,
    /// The load failed and the catalog is empty (terminal)
    Error,
}

impl CatalogState {
    /// Whether this state is terminal.
    pub fn is_resolved(self) -> bool {
        matches!(self, CatalogState::Initialized | CatalogState::Error)
    }
}

/// Callback invoked exactly once with the load outcome.
pub type ReadyCallback = Box<dyn FnOnce(bool) + Send>;

/// Typed search hints replacing the original untyped extras bundle.
///
/// When a field is set, search first attempts an exact (case-insensitive)
/// match on that field, most specific hint first, before falling back to the
/// unstructured substring tiers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchHints {
    pub genre: Option<String>,
    pub artist: Option<String>,
    pub album: Option<String>,
    pub title: Option<String>,
}

impl SearchHints {
    /// Hints with no focused field; search uses the substring tiers only.
    pub fn none() -> Self {
        Self::default()
    }

    fn is_empty(&self) -> bool {
        self.genre.is_none()
            && self.artist.is_none()
            && self.album.is_none()
            && self.title.is_none()
    }
}

/// A readiness-gated provider of catalog metadata.
#[async_trait]
pub trait MusicSource: Send + Sync {
    /// Loads the catalog. Runs the fetch at most once per instance; repeat
    /// calls after success are no-ops and repeat calls after failure report
    /// the failed state without refetching.
    ///
    /// The readiness contract does not depend on this return value — a
    /// failure also resolves all pending [`when_ready`](Self::when_ready)
    /// callbacks with `false` and leaves the catalog empty.
    async fn load(&self) -> Result<()>;

    /// Registers interest in catalog readiness.
    ///
    /// Returns `false` when the outcome is not yet known (the callback was
    /// recorded and fires later), `true` when it already is (the callback
    /// was invoked synchronously before returning).
    fn when_ready(&self, callback: ReadyCallback) -> bool;

    /// A snapshot of the loaded catalog, in catalog order. Empty before the
    /// load resolves and after a failed load.
    fn tracks(&self) -> Arc<Vec<Track>>;

    /// Free-text search over the catalog snapshot; see the module docs for
    /// the tier semantics. Matches come back in catalog order.
    fn search(&self, query: &str, hints: &SearchHints) -> Vec<Track>;

    /// Future-style readiness surface over [`when_ready`](Self::when_ready).
    ///
    /// Resolves with the same boolean the callback form delivers.
    async fn ready(&self) -> bool {
        let (tx, rx) = tokio::sync::oneshot::channel();
        self.when_ready(Box::new(move |ok| {
            let _ = tx.send(ok);
        }));
        rx.await.unwrap_or(false)
    }
}

struct SourceInner {
    state: CatalogState,
    catalog: Arc<Vec<Track>>,
    waiters: Vec<ReadyCallback>,
}

/// Default [`MusicSource`] backed by a [`JsonCatalogLoader`].
///
/// All state reads, state writes, and callback bookkeeping happen under one
/// mutex; callbacks themselves are invoked outside it so a callback may
/// re-enter `when_ready` without deadlocking.
pub struct CatalogMusicSource {
    loader: JsonCatalogLoader,
    inner: Mutex<SourceInner>,
}

impl CatalogMusicSource {
    pub fn new(loader: JsonCatalogLoader) -> Self {
        Self {
            loader,
            inner: Mutex::new(SourceInner {
                state: CatalogState::Created,
                catalog: Arc::new(Vec::new()),
                waiters: Vec::new(),
            }),
        }
    }

    /// Constructs a source from a composition-root configuration.
    pub fn from_config(config: &CatalogConfig) -> Self {
        Self::new(JsonCatalogLoader::from_config(config))
    }

    /// Current readiness state.
    pub fn state(&self) -> CatalogState {
        self.lock().state
    }

    /// Builds a fresh browse hierarchy over the current catalog snapshot.
    ///
    /// Before resolution and after a failed load this yields a root with two
    /// empty categories.
    pub fn browse_tree(&self) -> BrowseTree {
        BrowseTree::new(&self.tracks())
    }

    fn lock(&self) -> MutexGuard<'_, SourceInner> {
        // A panicked callback must not wedge every later caller.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl MusicSource for CatalogMusicSource {
    async fn load(&self) -> Result<()> {
        {
            let mut inner = self.lock();
            match inner.state {
                CatalogState::Initialized => return Ok(()),
                CatalogState::Error => {
                    return Err(CatalogError::State("catalog load already failed"));
                }
                CatalogState::Initializing => {
                    return Err(CatalogError::State("catalog load already in progress"));
                }
                CatalogState::Created => inner.state = CatalogState::Initializing,
            }
        }

        let result = self.loader.load().await;

        let (outcome, waiters) = {
            let mut inner = self.lock();
            let outcome = match &result {
                Ok(tracks) => {
                    info!(tracks = tracks.len(), "Music source initialized");
                    true
                }
                Err(e) => {
                    error!(error = %e, url = %self.loader.catalog_url(), "Music source failed to initialize");
                    false
                }
            };
            inner.catalog = match &result {
                Ok(tracks) => Arc::new(tracks.clone()),
                Err(_) => Arc::new(Vec::new()),
            };
            inner.state = if outcome {
                CatalogState::Initialized
            } else {
                CatalogState::Error
            };
            (outcome, std::mem::take(&mut inner.waiters))
        };

        debug!(waiters = waiters.len(), outcome, "Resolving readiness callbacks");
        for callback in waiters {
            callback(outcome);
        }

        result.map(|_| ())
    }

    fn when_ready(&self, callback: ReadyCallback) -> bool {
        let mut inner = self.lock();
        match inner.state {
            CatalogState::Created | CatalogState::Initializing => {
                inner.waiters.push(callback);
                false
            }
            CatalogState::Initialized => {
                drop(inner);
                callback(true);
                true
            }
            CatalogState::Error => {
                drop(inner);
                callback(false);
                true
            }
        }
    }

    fn tracks(&self) -> Arc<Vec<Track>> {
        Arc::clone(&self.lock().catalog)
    }

    fn search(&self, query: &str, hints: &SearchHints) -> Vec<Track> {
        let catalog = self.tracks();
        search_catalog(&catalog, query, hints)
    }
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

fn eq_ci(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

fn artist_matches(track: &Track, artist: &str) -> bool {
    eq_ci(&track.artist, artist) || eq_ci(&track.album_artist, artist)
}

/// Tiered search over a catalog snapshot.
///
/// Field-focused hints first; if they produce nothing (or no hint is set),
/// fall through to the unstructured tiers: artist/album-artist, then album,
/// then title, short-circuiting on the first non-empty result. A blank query
/// is not special-cased — the empty substring matches every track in the
/// first tier.
fn search_catalog(catalog: &[Track], query: &str, hints: &SearchHints) -> Vec<Track> {
    if !hints.is_empty() {
        let focused = search_focused(catalog, hints);
        if !focused.is_empty() {
            debug!(query, matches = focused.len(), "Focused search matched");
            return focused;
        }
    }

    let by_artist: Vec<Track> = catalog
        .iter()
        .filter(|t| contains_ci(&t.artist, query) || contains_ci(&t.album_artist, query))
        .cloned()
        .collect();
    if !by_artist.is_empty() {
        return by_artist;
    }

    let by_album: Vec<Track> = catalog
        .iter()
        .filter(|t| contains_ci(&t.album, query))
        .cloned()
        .collect();
    if !by_album.is_empty() {
        return by_album;
    }

    catalog
        .iter()
        .filter(|t| contains_ci(&t.title, query))
        .cloned()
        .collect()
}

fn search_focused(catalog: &[Track], hints: &SearchHints) -> Vec<Track> {
    if let Some(title) = &hints.title {
        return catalog
            .iter()
            .filter(|t| {
                eq_ci(&t.title, title)
                    && hints.artist.as_deref().map_or(true, |a| artist_matches(t, a))
                    && hints.album.as_deref().map_or(true, |al| eq_ci(&t.album, al))
            })
            .cloned()
            .collect();
    }
    if let Some(album) = &hints.album {
        return catalog
            .iter()
            .filter(|t| {
                eq_ci(&t.album, album)
                    && hints.artist.as_deref().map_or(true, |a| artist_matches(t, a))
            })
            .cloned()
            .collect();
    }
    if let Some(artist) = &hints.artist {
        return catalog
            .iter()
            .filter(|t| artist_matches(t, artist))
            .cloned()
            .collect();
    }
    if let Some(genre) = &hints.genre {
        return catalog
            .iter()
            .filter(|t| eq_ci(&t.genre, genre))
            .cloned()
            .collect();
    }
    Vec::new()
}
