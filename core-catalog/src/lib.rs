//! # Catalog Core Module
//!
//! Owns the normalized music catalog and provides the browse hierarchy and
//! search over it.
//!
//! ## Overview
//!
//! This module manages:
//! - Downloading and normalizing a remote JSON catalog ([`JsonCatalogLoader`])
//! - The immutable [`Track`] metadata model
//! - The browsable root → categories → albums → tracks hierarchy
//!   ([`BrowseTree`])
//! - Asynchronous readiness arbitration and prioritized free-text search
//!   ([`MusicSource`] / [`CatalogMusicSource`])
//!
//! ## Data flow
//!
//! ```text
//! remote JSON ──> JsonCatalogLoader ──> Vec<Track> ──┬──> BrowseTree
//!                                                    └──> search()
//! ```
//!
//! The catalog is loaded exactly once per source instance and never mutated
//! afterwards; consumers that arrive before the load completes register with
//! [`MusicSource::when_ready`] and are notified exactly once with the final
//! outcome.

pub mod browse;
pub mod error;
pub mod loader;
pub mod models;
pub mod source;

pub use browse::{BrowseTree, CATALOG_ALBUMS_ROOT, CATALOG_BROWSE_ROOT, CATALOG_RECOMMENDED_ROOT};
pub use error::{CatalogError, Result};
pub use loader::JsonCatalogLoader;
pub use models::{album_container_id, BrowseNode, Container, DownloadStatus, Track};
pub use source::{CatalogMusicSource, CatalogState, MusicSource, ReadyCallback, SearchHints};
