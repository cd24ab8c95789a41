//! # Core Runtime Module
//!
//! Provides foundational runtime infrastructure for the music catalog core:
//! - Logging and tracing infrastructure
//! - Composition-root configuration
//!
//! ## Overview
//!
//! This crate contains the runtime utilities the catalog core depends on. It
//! establishes the logging conventions and holds the explicitly constructed
//! configuration that hosts build at their composition root — there is no
//! ambient global state anywhere in the core.

pub mod config;
pub mod error;
pub mod logging;

pub use config::{CatalogConfig, CatalogConfigBuilder};
pub use error::{Error, Result};
pub use logging::{init_logging, LogFormat, LoggingConfig};
