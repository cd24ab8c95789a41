//! # Catalog Configuration Module
//!
//! Provides configuration management for the music catalog core.
//!
//! ## Overview
//!
//! The configuration system uses a builder pattern to construct a
//! `CatalogConfig` instance holding everything the core needs: the remote
//! catalog location and the injected HTTP bridge. It enforces fail-fast
//! validation so a misconfigured host learns about the problem at startup,
//! not on the first browse request.
//!
//! ## Required Settings
//!
//! - `catalog_url` - Absolute HTTP(S) URL of the remote catalog document
//!
//! ## Optional Dependencies (with desktop defaults)
//!
//! - `HttpClient` - HTTP operations (desktop default: reqwest)
//!
//! ## Usage
//!
//! ```no_run
//! use core_runtime::config::CatalogConfig;
//!
//! let config = CatalogConfig::builder()
//!     .catalog_url("https://storage.example.com/music/catalog.json")
//!     .build()
//!     .expect("Failed to build config");
//! ```
//!
//! ### Configuration with a Custom HTTP Bridge
//!
//! ```ignore
//! use core_runtime::config::CatalogConfig;
//! use std::sync::Arc;
//!
//! let config = CatalogConfig::builder()
//!     .catalog_url("https://storage.example.com/music/catalog.json")
//!     .http_client(Arc::new(MyHttpClient))
//!     .request_timeout_secs(10)
//!     .build()
//!     .expect("Failed to build config");
//! ```

use crate::error::{Error, Result};
use bridge_http::{HttpClient, ReqwestHttpClient};
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// Default timeout for catalog fetches.
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Configuration for the music catalog core.
///
/// Holds all dependencies and settings required to construct a catalog
/// source. Use [`CatalogConfigBuilder`] to construct instances.
#[derive(Clone)]
pub struct CatalogConfig {
    /// Absolute URL of the remote catalog document
    pub catalog_url: Url,

    /// HTTP client used to fetch the catalog
    pub http_client: Arc<dyn HttpClient>,

    /// Timeout applied to the catalog fetch
    pub request_timeout: Duration,
}

impl std::fmt::Debug for CatalogConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogConfig")
            .field("catalog_url", &self.catalog_url.as_str())
            .field("http_client", &"HttpClient { ... }")
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

impl CatalogConfig {
    /// Creates a new builder for constructing a `CatalogConfig`.
    pub fn builder() -> CatalogConfigBuilder {
        CatalogConfigBuilder::default()
    }

    /// Validates the configuration and returns an error if invalid.
    ///
    /// This checks:
    /// - The catalog URL uses an HTTP(S) scheme
    /// - The request timeout is positive and not absurd
    pub fn validate(&self) -> Result<()> {
        match self.catalog_url.scheme() {
            "http" | "https" => {}
            other => {
                return Err(Error::Config(format!(
                    "Catalog URL must use http or https, got '{}'",
                    other
                )));
            }
        }

        if self.request_timeout.is_zero() {
            return Err(Error::Config(
                "Request timeout must be greater than zero".to_string(),
            ));
        }

        if self.request_timeout > Duration::from_secs(600) {
            return Err(Error::Config(
                "Request timeout exceeds maximum of 600 seconds".to_string(),
            ));
        }

        Ok(())
    }
}

/// Builder for [`CatalogConfig`].
#[derive(Default)]
pub struct CatalogConfigBuilder {
    catalog_url: Option<String>,
    http_client: Option<Arc<dyn HttpClient>>,
    request_timeout: Option<Duration>,
}

impl CatalogConfigBuilder {
    /// Sets the remote catalog URL (required).
    pub fn catalog_url(mut self, url: impl Into<String>) -> Self {
        self.catalog_url = Some(url.into());
        self
    }

    /// Injects a custom HTTP client bridge.
    ///
    /// When not provided, the reqwest-based desktop client is used.
    pub fn http_client(mut self, client: Arc<dyn HttpClient>) -> Self {
        self.http_client = Some(client);
        self
    }

    /// Sets the catalog fetch timeout in seconds.
    pub fn request_timeout_secs(mut self, secs: u64) -> Self {
        self.request_timeout = Some(Duration::from_secs(secs));
        self
    }

    /// Builds and validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` when the catalog URL is missing or does not
    /// parse as an absolute URL, and when validation of the assembled
    /// configuration fails.
    pub fn build(self) -> Result<CatalogConfig> {
        let raw_url = self.catalog_url.ok_or_else(|| {
            Error::Config(
                "Catalog URL is required. \
                 Call .catalog_url(\"https://...\") on the builder."
                    .to_string(),
            )
        })?;

        let catalog_url = Url::parse(&raw_url)
            .map_err(|e| Error::Config(format!("Invalid catalog URL '{}': {}", raw_url, e)))?;

        let request_timeout = self
            .request_timeout
            .unwrap_or(Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS));

        let http_client = match self.http_client {
            Some(client) => client,
            None => Arc::new(ReqwestHttpClient::with_timeout(request_timeout)),
        };

        let config = CatalogConfig {
            catalog_url,
            http_client,
            request_timeout,
        };
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use bridge_http::{HttpRequest, HttpResponse};

    struct NoopHttpClient;

    #[async_trait]
    impl HttpClient for NoopHttpClient {
        async fn execute(&self, _request: HttpRequest) -> bridge_http::Result<HttpResponse> {
            Ok(HttpResponse {
                status: 204,
                headers: Default::default(),
                body: bytes::Bytes::new(),
            })
        }
    }

    #[test]
    fn test_build_with_defaults() {
        let config = CatalogConfig::builder()
            .catalog_url("https://storage.example.com/music/catalog.json")
            .build()
            .unwrap();

        assert_eq!(config.catalog_url.path(), "/music/catalog.json");
        assert_eq!(config.request_timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_build_with_injected_client() {
        let config = CatalogConfig::builder()
            .catalog_url("https://storage.example.com/catalog.json")
            .http_client(Arc::new(NoopHttpClient))
            .request_timeout_secs(10)
            .build()
            .unwrap();

        assert_eq!(config.request_timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_missing_catalog_url_fails() {
        let err = CatalogConfig::builder().build().unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_invalid_catalog_url_fails() {
        let err = CatalogConfig::builder()
            .catalog_url("not a url")
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_non_http_scheme_fails() {
        let err = CatalogConfig::builder()
            .catalog_url("ftp://storage.example.com/catalog.json")
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_zero_timeout_fails() {
        let err = CatalogConfig::builder()
            .catalog_url("https://storage.example.com/catalog.json")
            .request_timeout_secs(0)
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_debug_does_not_dump_client() {
        let config = CatalogConfig::builder()
            .catalog_url("https://storage.example.com/catalog.json")
            .http_client(Arc::new(NoopHttpClient))
            .build()
            .unwrap();

        let rendered = format!("{:?}", config);
        assert!(rendered.contains("HttpClient { ... }"));
    }
}
