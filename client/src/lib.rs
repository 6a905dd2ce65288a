//! Async host for `shortener-core`.
//!
//! # Overview
//! `ApiClient` pairs the IO-free `ShortenerClient` with a reqwest transport:
//! each operation builds a request, executes it, and parses the response.
//! Configuration is an explicit `ClientConfig` value, never a global.
//!
//! # Logging
//! Requests and responses are logged with `tracing` at `debug`; failures at
//! `warn` (API errors) or `error` (transport). Installing a subscriber is
//! left to the application.

mod api;
pub mod config;
mod transport;

pub use api::ApiClient;
pub use config::{ClientConfig, ConfigError};
pub use shortener_core::{
    is_valid_code, validate_url, ClientError, PagedUrlList, ShortenedUrl, UrlRecord,
};
