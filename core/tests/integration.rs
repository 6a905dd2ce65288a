//! Full shortener lifecycle against the live mock server.
//!
//! # Design
//! Starts the mock server on a random port, then exercises every core client
//! operation over real HTTP using blocking ureq as the host. Validates that
//! request building and response parsing work end-to-end with the server.

use shortener_core::{
    ClientError, HttpMethod, HttpRequest, HttpResponse, ShortenerClient, DEFAULT_PAGE, DEFAULT_PAGE_SIZE,
};

/// Execute an `HttpRequest` using ureq and return an `HttpResponse`.
///
/// Disables ureq's automatic status-code-as-error behavior so 4xx/5xx
/// responses are returned as data and the core decides what they mean.
fn execute(req: HttpRequest) -> HttpResponse {
    let agent = ureq::Agent::config_builder()
        .http_status_as_error(false)
        .build()
        .new_agent();

    let mut response = match (req.method, req.body) {
        (HttpMethod::Get, _) => agent.get(&req.path).header("accept", "application/json").call(),
        (HttpMethod::Delete, _) => agent.delete(&req.path).header("accept", "application/json").call(),
        (HttpMethod::Post, Some(body)) => {
            agent.post(&req.path).content_type("application/json").send(body.as_bytes())
        }
        (HttpMethod::Post, None) => agent.post(&req.path).send_empty(),
    }
    .expect("HTTP transport error");

    let status = response.status().as_u16();
    let body = response.body_mut().read_to_string().unwrap_or_default();

    HttpResponse {
        status,
        headers: Vec::new(),
        body,
    }
}

fn start_mock_server() -> std::net::SocketAddr {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run(listener).await
        })
        .unwrap();
    });

    addr
}

#[test]
fn shortener_lifecycle() {
    let addr = start_mock_server();
    let client = ShortenerClient::new(&format!("http://{addr}"));

    // Step 1: list — should be empty.
    let req = client.build_get_all_urls(DEFAULT_PAGE, DEFAULT_PAGE_SIZE).unwrap();
    let page = client.parse_get_all_urls(DEFAULT_PAGE, execute(req)).unwrap();
    assert!(page.urls.is_empty(), "expected empty list");
    assert_eq!(page.total_pages, 1);

    // Step 2: shorten.
    let req = client.build_shorten_url("https://example.com/docs").unwrap();
    let shortened = client.parse_shorten_url(execute(req)).unwrap();
    assert_eq!(shortened.original_url, "https://example.com/docs");
    assert_eq!(shortened.short_url, format!("http://{addr}/{}", shortened.code));
    let code = shortened.code;

    // Step 3: lookup counts a click.
    let req = client.build_get_url_by_code(&code).unwrap();
    let record = client.parse_get_url_by_code(&code, execute(req)).unwrap();
    assert_eq!(record.code, code);
    assert_eq!(record.original_url, "https://example.com/docs");
    assert_eq!(record.clicks, 1);
    assert!(record.created_at.is_some());

    // Step 4: stats see the same record.
    let req = client.build_get_url_stats(&code).unwrap();
    let stats = client.parse_get_url_stats(&code, execute(req)).unwrap();
    assert_eq!(stats.clicks, 2);

    // Step 5: list — one item, code recovered from shortUrl.
    let req = client.build_get_all_urls(DEFAULT_PAGE, DEFAULT_PAGE_SIZE).unwrap();
    let page = client.parse_get_all_urls(DEFAULT_PAGE, execute(req)).unwrap();
    assert_eq!(page.urls.len(), 1);
    assert_eq!(page.urls[0].code, code);
    assert_eq!(page.total_count, 1);

    // Step 6: delete returns the raw body.
    let req = client.build_delete_url(&code).unwrap();
    let body = client.parse_delete_url(execute(req)).unwrap();
    assert_eq!(body["success"], true);

    // Step 7: lookup after delete — 404 with the backend's message.
    let req = client.build_get_url_by_code(&code).unwrap();
    let err = client.parse_get_url_by_code(&code, execute(req)).unwrap_err();
    assert_eq!(err, ClientError::api(404, "URL not found"));

    // Step 8: delete again — application-level failure on HTTP 200.
    let req = client.build_delete_url(&code).unwrap();
    let err = client.parse_delete_url(execute(req)).unwrap_err();
    assert_eq!(err, ClientError::api(200, "URL not found"));

    // Step 9: shorten a non-http URL — backend rejects with 400.
    let req = client.build_shorten_url("ftp://x").unwrap();
    let err = client.parse_shorten_url(execute(req)).unwrap_err();
    assert_eq!(err, ClientError::api(400, "Invalid URL"));
}
