//! In-memory stand-in for the URL-shortener backend.
//!
//! Speaks the same `{success, error?, ...}` JSON envelope as the real
//! service. Unknown codes answer 404 on lookup but 200 with
//! `success: false` on delete, so clients see both failure layers.

use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc,
    },
};

use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderMap, StatusCode},
    routing::{delete, get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

pub const CODE_LEN: usize = 6;
pub const DEFAULT_PAGE_SIZE: u32 = 10;
pub const MAX_PAGE_SIZE: u32 = 100;

#[derive(Clone, Debug)]
pub struct StoredUrl {
    pub code: String,
    pub original_url: String,
    pub clicks: u64,
    pub created_at: String,
    seq: u64,
}

#[derive(Deserialize)]
pub struct ShortenInput {
    pub url: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListParams {
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}

pub type Db = Arc<RwLock<HashMap<String, StoredUrl>>>;

#[derive(Clone, Default)]
pub struct AppState {
    db: Db,
    next_seq: Arc<AtomicU64>,
}

pub fn app() -> Router {
    Router::new()
        .route("/api/Url/shorten", post(shorten_url))
        .route("/api/Url/list", get(list_urls))
        .route("/api/Url/{code}", delete(delete_url))
        .route("/{code}", get(lookup_url))
        .layer(TraceLayer::new_for_http())
        .with_state(AppState::default())
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

fn short_url(headers: &HeaderMap, code: &str) -> String {
    let host = headers
        .get(header::HOST)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("localhost");
    format!("http://{host}/{code}")
}

fn failure(status: StatusCode, error: &str) -> (StatusCode, Json<Value>) {
    (status, Json(json!({ "success": false, "error": error })))
}

fn new_code() -> String {
    Uuid::new_v4().simple().to_string()[..CODE_LEN].to_string()
}

async fn shorten_url(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(input): Json<ShortenInput>,
) -> (StatusCode, Json<Value>) {
    let url = input.url.trim();
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        return failure(StatusCode::BAD_REQUEST, "Invalid URL");
    }

    let mut db = state.db.write().await;
    let mut code = new_code();
    while db.contains_key(&code) {
        code = new_code();
    }
    let stored = StoredUrl {
        code: code.clone(),
        original_url: url.to_string(),
        clicks: 0,
        created_at: chrono::Utc::now().to_rfc3339(),
        seq: state.next_seq.fetch_add(1, Ordering::Relaxed),
    };
    db.insert(code.clone(), stored);
    tracing::info!(%code, original_url = %url, "shortened");

    (
        StatusCode::OK,
        Json(json!({
            "success": true,
            "shortUrl": short_url(&headers, &code),
            "originalUrl": url,
        })),
    )
}

async fn lookup_url(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(code): Path<String>,
) -> (StatusCode, Json<Value>) {
    let mut db = state.db.write().await;
    let Some(stored) = db.get_mut(&code) else {
        return failure(StatusCode::NOT_FOUND, "URL not found");
    };
    stored.clicks += 1;
    (
        StatusCode::OK,
        Json(json!({
            "success": true,
            "originalUrl": stored.original_url,
            "shortUrl": short_url(&headers, &code),
            "clicks": stored.clicks,
            "createdAt": stored.created_at,
        })),
    )
}

async fn list_urls(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<ListParams>,
) -> Json<Value> {
    let page = params.page.unwrap_or(1).max(1);
    let page_size = params
        .page_size
        .unwrap_or(DEFAULT_PAGE_SIZE)
        .clamp(1, MAX_PAGE_SIZE);

    let db = state.db.read().await;
    let mut all: Vec<&StoredUrl> = db.values().collect();
    all.sort_by_key(|u| u.seq);

    let total_count = all.len();
    let total_pages = total_count.div_ceil(page_size as usize).max(1);
    let urls: Vec<Value> = all
        .into_iter()
        .skip((page as usize - 1) * page_size as usize)
        .take(page_size as usize)
        .map(|u| {
            json!({
                "shortUrl": short_url(&headers, &u.code),
                "originalUrl": u.original_url,
                "clicks": u.clicks,
                "createdAt": u.created_at,
            })
        })
        .collect();

    Json(json!({
        "success": true,
        "urls": urls,
        "totalPages": total_pages,
        "currentPage": page,
        "totalCount": total_count,
    }))
}

async fn delete_url(State(state): State<AppState>, Path(code): Path<String>) -> (StatusCode, Json<Value>) {
    let mut db = state.db.write().await;
    match db.remove(&code) {
        Some(_) => {
            tracing::info!(%code, "deleted");
            (
                StatusCode::OK,
                Json(json!({ "success": true, "message": "URL deleted", "code": code })),
            )
        }
        None => failure(StatusCode::OK, "URL not found"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_code_has_fixed_length() {
        let code = new_code();
        assert_eq!(code.len(), CODE_LEN);
        assert!(code.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn list_params_are_optional() {
        let params: ListParams = serde_json::from_str(r#"{}"#).unwrap();
        assert!(params.page.is_none());
        assert!(params.page_size.is_none());

        let params: ListParams = serde_json::from_str(r#"{"page":2,"pageSize":5}"#).unwrap();
        assert_eq!(params.page, Some(2));
        assert_eq!(params.page_size, Some(5));
    }

    #[test]
    fn short_url_uses_host_header() {
        let mut headers = HeaderMap::new();
        assert_eq!(short_url(&headers, "abc123"), "http://localhost/abc123");
        headers.insert(header::HOST, "127.0.0.1:5293".parse().unwrap());
        assert_eq!(short_url(&headers, "abc123"), "http://127.0.0.1:5293/abc123");
    }
}
