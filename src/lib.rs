//! Workspace facade crate.
//!
//! This crate exists so host applications can depend on `catalog-workspace`
//! and reach the individual workspace crates (`core-catalog`, `core-runtime`,
//! `bridge-http`) through one dependency without wiring each crate
//! individually.

pub use bridge_http;
pub use core_catalog;
pub use core_runtime;
