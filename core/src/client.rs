//! Stateless request builder and response parser for the shortener API.
//!
//! # Design
//! `ShortenerClient` holds only a `base_url` and carries no mutable state
//! between calls. Each operation is split into a `build_*` method that
//! produces an `HttpRequest` and a `parse_*` method that consumes an
//! `HttpResponse`. The host executes the HTTP round-trip in between.
//!
//! Parsing is two-layered: the HTTP status is checked first, then the body's
//! `success` flag, because the backend may answer 200 with `success: false`.

use serde::de::DeserializeOwned;
use serde_json::Value;
use url::Url;

use crate::error::{ClientError, SERVER_ERROR_MESSAGE};
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{
    ListPayload, LookupPayload, PagedUrlList, ShortenPayload, ShortenRequest, ShortenedUrl,
    UrlRecord,
};

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_PAGE_SIZE: u32 = 10;

const SHORTEN_FAILED: &str = "Failed to shorten URL";
const URL_NOT_FOUND: &str = "URL not found";
const LIST_FAILED: &str = "Failed to fetch URLs";
const DELETE_FAILED: &str = "Failed to delete URL";

/// Synchronous, stateless client for the shortener API.
#[derive(Debug, Clone)]
pub struct ShortenerClient {
    base_url: String,
}

impl ShortenerClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn build_shorten_url(&self, original_url: &str) -> Result<HttpRequest, ClientError> {
        let input = ShortenRequest {
            url: original_url.to_string(),
        };
        let body = serde_json::to_string(&input).map_err(|e| ClientError::RequestSetup(e.to_string()))?;
        Ok(HttpRequest {
            method: HttpMethod::Post,
            path: self.endpoint(&["api", "Url", "shorten"], &[])?,
            headers: json_headers(),
            body: Some(body),
        })
    }

    pub fn build_get_url_by_code(&self, code: &str) -> Result<HttpRequest, ClientError> {
        self.build_lookup(code)
    }

    /// `page` and `limit` are sent as `page` and `pageSize`.
    pub fn build_get_all_urls(&self, page: u32, limit: u32) -> Result<HttpRequest, ClientError> {
        let query = [("page", page.to_string()), ("pageSize", limit.to_string())];
        Ok(HttpRequest {
            method: HttpMethod::Get,
            path: self.endpoint(&["api", "Url", "list"], &query)?,
            headers: json_headers(),
            body: None,
        })
    }

    pub fn build_delete_url(&self, code: &str) -> Result<HttpRequest, ClientError> {
        Ok(HttpRequest {
            method: HttpMethod::Delete,
            path: self.endpoint(&["api", "Url", code], &[])?,
            headers: json_headers(),
            body: None,
        })
    }

    /// Stats are served by the lookup endpoint.
    pub fn build_get_url_stats(&self, code: &str) -> Result<HttpRequest, ClientError> {
        self.build_lookup(code)
    }

    pub fn parse_shorten_url(&self, response: HttpResponse) -> Result<ShortenedUrl, ClientError> {
        let body = open_envelope(&response, SHORTEN_FAILED)?;
        let payload: ShortenPayload = decode(response.status, body)?;
        Ok(payload.into_shortened())
    }

    pub fn parse_get_url_by_code(&self, code: &str, response: HttpResponse) -> Result<UrlRecord, ClientError> {
        let body = open_envelope(&response, URL_NOT_FOUND)?;
        let payload: LookupPayload = decode(response.status, body)?;
        Ok(payload.into_record(code))
    }

    /// `page` is the page that was requested; it becomes `current_page` when
    /// the backend omits one.
    pub fn parse_get_all_urls(&self, page: u32, response: HttpResponse) -> Result<PagedUrlList, ClientError> {
        let body = open_envelope(&response, LIST_FAILED)?;
        let payload: ListPayload = decode(response.status, body)?;
        Ok(payload.into_page(page))
    }

    /// Returns the response body as-is.
    pub fn parse_delete_url(&self, response: HttpResponse) -> Result<Value, ClientError> {
        open_envelope(&response, DELETE_FAILED)
    }

    pub fn parse_get_url_stats(&self, code: &str, response: HttpResponse) -> Result<UrlRecord, ClientError> {
        self.parse_get_url_by_code(code, response)
    }

    fn build_lookup(&self, code: &str) -> Result<HttpRequest, ClientError> {
        Ok(HttpRequest {
            method: HttpMethod::Get,
            path: self.endpoint(&[code], &[])?,
            headers: json_headers(),
            body: None,
        })
    }

    /// Append percent-encoded path segments and query pairs to the base URL.
    fn endpoint(&self, segments: &[&str], query: &[(&str, String)]) -> Result<String, ClientError> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| ClientError::RequestSetup(format!("invalid base URL {:?}: {e}", self.base_url)))?;
        url.path_segments_mut()
            .map_err(|()| ClientError::RequestSetup(format!("base URL {:?} cannot have a path", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        if !query.is_empty() {
            url.query_pairs_mut()
                .extend_pairs(query.iter().map(|(k, v)| (*k, v.as_str())));
        }
        Ok(url.into())
    }
}

fn json_headers() -> Vec<(String, String)> {
    vec![
        ("content-type".to_string(), "application/json".to_string()),
        ("accept".to_string(), "application/json".to_string()),
    ]
}

/// Map non-2xx statuses to `ClientError::Api`, preferring the body's
/// `error`, then `message`.
fn check_status(response: &HttpResponse) -> Result<(), ClientError> {
    if response.is_success() {
        return Ok(());
    }
    let body = read_body(&response.body);
    let message = string_field(&body, "error")
        .or_else(|| string_field(&body, "message"))
        .unwrap_or(SERVER_ERROR_MESSAGE);
    Err(ClientError::api(response.status, message))
}

/// Check status and the `success` flag, returning the whole body on success.
///
/// Only a JSON `true` counts as success. Truthy stand-ins such as `1` or
/// `"true"`, which a loosely typed caller would accept, fail here with the
/// fallback message.
fn open_envelope(response: &HttpResponse, fallback: &str) -> Result<Value, ClientError> {
    check_status(response)?;
    let body = read_body(&response.body);
    if body.get("success") != Some(&Value::Bool(true)) {
        let message = string_field(&body, "error").unwrap_or(fallback);
        return Err(ClientError::api(response.status, message));
    }
    Ok(body)
}

fn decode<T: DeserializeOwned>(status: u16, body: Value) -> Result<T, ClientError> {
    serde_json::from_value(body).map_err(|e| ClientError::api(status, format!("Invalid response from server: {e}")))
}

/// Non-JSON bodies read as an empty object.
fn read_body(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::Object(Default::default()))
}

fn string_field<'a>(body: &'a Value, key: &str) -> Option<&'a str> {
    body.get(key)?.as_str().filter(|s| !s.is_empty())
}
