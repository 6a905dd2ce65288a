//! Executes core `HttpRequest`s with reqwest.
//!
//! Every request and response passes through here, so this is where the
//! request/response logging lives and where reqwest errors are folded into
//! `ClientError`. Non-2xx statuses are not errors at this layer; they come
//! back as data for the core parser.

use reqwest::Method;
use shortener_core::{ClientError, HttpMethod, HttpRequest, HttpResponse};

#[derive(Debug, Clone)]
pub(crate) struct Transport {
    http: reqwest::Client,
}

impl Transport {
    pub(crate) fn new(http: reqwest::Client) -> Self {
        Self { http }
    }

    pub(crate) async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ClientError> {
        tracing::debug!(method = request.method.as_str(), url = %request.path, "API request");

        let mut builder = self.http.request(method(request.method), &request.path);
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await.map_err(transport_error)?;
        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| Some((name.as_str().to_string(), value.to_str().ok()?.to_string())))
            .collect();
        let body = response.text().await.map_err(transport_error)?;

        tracing::debug!(status, body = %body, "API response");
        Ok(HttpResponse { status, headers, body })
    }
}

fn method(method: HttpMethod) -> Method {
    match method {
        HttpMethod::Get => Method::GET,
        HttpMethod::Post => Method::POST,
        HttpMethod::Delete => Method::DELETE,
    }
}

/// Builder errors mean nothing went on the wire; anything else (refused,
/// timed out, reset mid-body) means no usable response arrived.
fn transport_error(err: reqwest::Error) -> ClientError {
    let err = if err.is_builder() {
        ClientError::RequestSetup(err.to_string())
    } else {
        ClientError::Connection(err.to_string())
    };
    log_failure(&err);
    err
}

pub(crate) fn log_failure(err: &ClientError) {
    match err {
        ClientError::Api { status, message } => {
            tracing::warn!(status, %message, "API error");
        }
        ClientError::Connection(detail) => {
            tracing::error!(%detail, "API connection failed");
        }
        ClientError::RequestSetup(detail) => {
            tracing::error!(%detail, "API request could not be sent");
        }
    }
}
