//! # HTTP Bridge
//!
//! Platform abstraction for the one network operation the catalog core
//! performs: fetching a remote document over HTTP.
//!
//! ## Overview
//!
//! The core never talks to a concrete HTTP stack directly. It depends on the
//! [`HttpClient`](client::HttpClient) trait, and hosts inject whichever
//! implementation fits their platform. A desktop-ready
//! [`ReqwestHttpClient`](reqwest_client::ReqwestHttpClient) ships in this
//! crate; tests inject in-memory stubs.
//!
//! ## Error Handling
//!
//! All implementations surface failures as [`HttpError`](error::HttpError).
//! Transport problems (connection refused, timeout) are errors; a response
//! with a non-2xx status is *not* — callers inspect
//! [`HttpResponse::is_success`](client::HttpResponse::is_success) and decide.

pub mod client;
pub mod error;
pub mod reqwest_client;

pub use client::{HttpClient, HttpMethod, HttpRequest, HttpResponse};
pub use error::{HttpError, Result};
pub use reqwest_client::ReqwestHttpClient;
