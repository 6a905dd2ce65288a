//! IO-free client core for the URL-shortener API.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern). The async host lives in the
//! `shortener-client` crate; tests drive the core with a blocking client.
//!
//! # Design
//! - `ShortenerClient` is stateless; it holds only `base_url`.
//! - Each operation is split into `build_*` (produces request) and
//!   `parse_*` (consumes response), so the I/O boundary is explicit.
//! - Every failure is a `ClientError`, whose `Display` is the message shown
//!   to users.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod error;
pub mod http;
pub mod types;
pub mod validate;

pub use client::{ShortenerClient, DEFAULT_PAGE, DEFAULT_PAGE_SIZE};
pub use error::ClientError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use types::{code_from_short_url, PagedUrlList, ShortenRequest, ShortenedUrl, UrlRecord};
pub use validate::{is_valid_code, validate_url};
