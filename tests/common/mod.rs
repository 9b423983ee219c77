//! Shared utilities for integration testing.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{Method, StatusCode, Uri};
use axum::routing::any;
use axum::Router;
use serde_json::Value;
use tokio::net::TcpListener;

/// One call received by the mock renderer.
#[derive(Debug, Clone)]
pub struct RecordedRender {
    pub method: Method,
    pub path: String,
    pub query: Option<String>,
    pub body: Value,
}

#[derive(Clone)]
struct MockState {
    status: StatusCode,
    body: &'static str,
    delay: Duration,
    calls: Arc<Mutex<Vec<RecordedRender>>>,
}

/// Handle to a running mock renderer.
pub struct MockRenderer {
    pub addr: SocketAddr,
    calls: Arc<Mutex<Vec<RecordedRender>>>,
}

impl MockRenderer {
    pub fn calls(&self) -> Vec<RecordedRender> {
        self.calls.lock().unwrap().clone()
    }
}

/// Start a mock renderer answering every request with `status` and `body`.
pub async fn start_mock_renderer(status: u16, body: &'static str) -> MockRenderer {
    start_delayed_renderer(status, body, Duration::ZERO).await
}

/// Like [`start_mock_renderer`], but waits `delay` before answering.
pub async fn start_delayed_renderer(status: u16, body: &'static str, delay: Duration) -> MockRenderer {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let calls = Arc::new(Mutex::new(Vec::new()));

    let state = MockState {
        status: StatusCode::from_u16(status).unwrap(),
        body,
        delay,
        calls: calls.clone(),
    };
    let app = Router::new()
        .route("/", any(record))
        .route("/{*path}", any(record))
        .with_state(state);

    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    MockRenderer { addr, calls }
}

/// An address nothing listens on.
pub fn unused_addr() -> SocketAddr {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    listener.local_addr().unwrap()
}

async fn record(
    State(state): State<MockState>,
    method: Method,
    uri: Uri,
    body: Bytes,
) -> (StatusCode, &'static str) {
    state.calls.lock().unwrap().push(RecordedRender {
        method,
        path: uri.path().to_string(),
        query: uri.query().map(str::to_string),
        body: serde_json::from_slice(&body).unwrap_or(Value::Null),
    });
    if !state.delay.is_zero() {
        tokio::time::sleep(state.delay).await;
    }
    (state.status, state.body)
}
