//! The async shortener operations.

use serde_json::Value;
use shortener_core::{
    ClientError, PagedUrlList, ShortenedUrl, ShortenerClient, UrlRecord, DEFAULT_PAGE, DEFAULT_PAGE_SIZE,
};

use crate::config::ClientConfig;
use crate::transport::{log_failure, Transport};

/// Async client for the shortener backend.
///
/// Cheap to clone; clones share one connection pool. Calls are independent
/// and may run concurrently in any order.
#[derive(Debug, Clone)]
pub struct ApiClient {
    core: ShortenerClient,
    transport: Transport,
}

impl ApiClient {
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ClientError::RequestSetup(e.to_string()))
            .inspect_err(log_failure)?;
        tracing::info!(base_url = %config.base_url, timeout_ms = config.timeout.as_millis() as u64, "API client configured");
        Ok(Self {
            core: ShortenerClient::new(&config.base_url),
            transport: Transport::new(http),
        })
    }

    pub fn base_url(&self) -> &str {
        self.core.base_url()
    }

    pub async fn shorten_url(&self, original_url: &str) -> Result<ShortenedUrl, ClientError> {
        let request = self.core.build_shorten_url(original_url).inspect_err(log_failure)?;
        let response = self.transport.execute(request).await?;
        self.core.parse_shorten_url(response).inspect_err(log_failure)
    }

    pub async fn get_url_by_code(&self, code: &str) -> Result<UrlRecord, ClientError> {
        let request = self.core.build_get_url_by_code(code).inspect_err(log_failure)?;
        let response = self.transport.execute(request).await?;
        self.core.parse_get_url_by_code(code, response).inspect_err(log_failure)
    }

    /// `None` selects page 1 and a page size of 10.
    pub async fn get_all_urls(&self, page: Option<u32>, limit: Option<u32>) -> Result<PagedUrlList, ClientError> {
        let page = page.unwrap_or(DEFAULT_PAGE);
        let limit = limit.unwrap_or(DEFAULT_PAGE_SIZE);
        let request = self.core.build_get_all_urls(page, limit).inspect_err(log_failure)?;
        let response = self.transport.execute(request).await?;
        self.core.parse_get_all_urls(page, response).inspect_err(log_failure)
    }

    /// Returns the backend's response body unchanged.
    pub async fn delete_url(&self, code: &str) -> Result<Value, ClientError> {
        let request = self.core.build_delete_url(code).inspect_err(log_failure)?;
        let response = self.transport.execute(request).await?;
        self.core.parse_delete_url(response).inspect_err(log_failure)
    }

    pub async fn get_url_stats(&self, code: &str) -> Result<UrlRecord, ClientError> {
        let request = self.core.build_get_url_stats(code).inspect_err(log_failure)?;
        let response = self.transport.execute(request).await?;
        self.core.parse_get_url_stats(code, response).inspect_err(log_failure)
    }
}
