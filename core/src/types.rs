//! Wire DTOs and the records handed back to callers.
//!
//! # Design
//! Every backend body is an envelope `{success, error?, ...payload}`. The
//! envelope flag is checked by the parser before the payload is decoded into
//! one of the `*Payload` structs below, whose optional fields spell out which
//! parts of the backend response may be missing. Defaulting happens in one
//! place per payload (`into_*`), so records never carry `Option` where the
//! caller expects a value.
//!
//! The backend treats `0` the same as an absent count, so the pagination
//! defaults below apply to both.

use serde::{Deserialize, Serialize};

/// Body of `POST /api/Url/shorten`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShortenRequest {
    pub url: String,
}

/// A freshly shortened URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortenedUrl {
    pub short_url: String,
    pub code: String,
    pub original_url: String,
}

/// A stored short URL as reported by the backend at the time of the call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UrlRecord {
    pub code: String,
    pub original_url: String,
    pub short_url: String,
    pub clicks: u64,
    pub created_at: Option<String>,
}

/// One page of `UrlRecord`s.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PagedUrlList {
    pub urls: Vec<UrlRecord>,
    pub total_pages: u32,
    pub current_page: u32,
    pub total_count: u64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ShortenPayload {
    pub short_url: String,
    pub original_url: Option<String>,
}

impl ShortenPayload {
    pub(crate) fn into_shortened(self) -> ShortenedUrl {
        let code = code_from_short_url(&self.short_url).to_string();
        ShortenedUrl {
            short_url: self.short_url,
            code,
            original_url: self.original_url.unwrap_or_default(),
        }
    }
}

/// Payload of `GET /{code}`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct LookupPayload {
    pub original_url: Option<String>,
    pub short_url: Option<String>,
    pub clicks: Option<u64>,
    pub created_at: Option<String>,
}

impl LookupPayload {
    pub(crate) fn into_record(self, code: &str) -> UrlRecord {
        UrlRecord {
            code: code.to_string(),
            original_url: self.original_url.unwrap_or_default(),
            short_url: self.short_url.unwrap_or_default(),
            clicks: self.clicks.unwrap_or(0),
            created_at: self.created_at,
        }
    }
}

/// Element of the list payload. Older backends send `code`, newer ones only
/// `shortUrl`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UrlItem {
    pub code: Option<String>,
    pub short_url: Option<String>,
    pub original_url: Option<String>,
    pub clicks: Option<u64>,
    pub created_at: Option<String>,
}

impl UrlItem {
    pub(crate) fn into_record(self) -> UrlRecord {
        let code = match self.short_url.as_deref() {
            Some(short_url) if !short_url.is_empty() => code_from_short_url(short_url).to_string(),
            _ => self.code.unwrap_or_default(),
        };
        UrlRecord {
            code,
            original_url: self.original_url.unwrap_or_default(),
            short_url: self.short_url.unwrap_or_default(),
            clicks: self.clicks.unwrap_or(0),
            created_at: self.created_at,
        }
    }
}

/// Payload of `GET /api/Url/list`. The array arrives as `urls` or `items`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ListPayload {
    pub urls: Option<Vec<UrlItem>>,
    pub items: Option<Vec<UrlItem>>,
    pub total_pages: Option<u32>,
    pub current_page: Option<u32>,
    pub total_count: Option<u64>,
}

impl ListPayload {
    pub(crate) fn into_page(self, requested_page: u32) -> PagedUrlList {
        let urls: Vec<UrlRecord> = self
            .urls
            .or(self.items)
            .unwrap_or_default()
            .into_iter()
            .map(UrlItem::into_record)
            .collect();
        let total_count = non_zero(self.total_count).unwrap_or(urls.len() as u64);
        PagedUrlList {
            total_pages: non_zero(self.total_pages).unwrap_or(1),
            current_page: non_zero(self.current_page).unwrap_or(requested_page),
            total_count,
            urls,
        }
    }
}

/// The code is the last `/`-delimited segment of a short URL.
pub fn code_from_short_url(short_url: &str) -> &str {
    short_url.rsplit('/').next().unwrap_or(short_url)
}

fn non_zero<T: Default + PartialEq>(value: Option<T>) -> Option<T> {
    value.filter(|v| *v != T::default())
}
