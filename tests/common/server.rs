//! In-process HTTP server serving one resource with range support.

use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Knobs to make the server misbehave.
#[derive(Debug, Clone, Default)]
pub struct Behavior {
    /// Answer the range starting at this offset with this status.
    pub fail_at: Option<(u64, StatusCode)>,
    /// Answer the size probe with this status.
    pub probe_status: Option<StatusCode>,
    /// Sleep before answering a range request.
    pub range_delay: Option<Duration>,
    /// Answer range requests with the whole resource and a 200.
    pub ignore_range: bool,
    /// Stream the probe body so no Content-Length is sent.
    pub omit_length: bool,
    /// Send only half of every range body.
    pub short_body: bool,
    /// Content-Disposition sent with the probe.
    pub disposition: Option<String>,
    /// Reject requests lacking this header with a 401.
    pub require_header: Option<(String, String)>,
}

struct ServerState {
    data: Vec<u8>,
    behavior: Behavior,
    probes: AtomicUsize,
    range_requests: AtomicUsize,
}

/// A running test server.
pub struct TestServer {
    base: String,
    state: Arc<ServerState>,
}

impl TestServer {
    /// Serve `data` under `/files/<anything>`.
    pub async fn start(data: Vec<u8>, behavior: Behavior) -> Self {
        let state = Arc::new(ServerState {
            data,
            behavior,
            probes: AtomicUsize::new(0),
            range_requests: AtomicUsize::new(0),
        });

        let app = Router::new()
            .route("/files/:name", get(serve))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test server");
        let addr = listener.local_addr().expect("Failed to read local address");
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Self {
            base: format!("http://{}", addr),
            state,
        }
    }

    /// URL of `/files/<name>`.
    pub fn url(&self, name: &str) -> String {
        format!("{}/files/{}", self.base, name)
    }

    /// Number of requests that carried no `Range` header.
    pub fn probes(&self) -> usize {
        self.state.probes.load(Ordering::SeqCst)
    }

    /// Number of requests that carried a `Range` header.
    pub fn range_requests(&self) -> usize {
        self.state.range_requests.load(Ordering::SeqCst)
    }
}

fn parse_range(value: &str) -> Option<(u64, u64)> {
    let (start, end) = value.strip_prefix("bytes=")?.split_once('-')?;
    Some((start.parse().ok()?, end.parse().ok()?))
}

async fn serve(
    State(state): State<Arc<ServerState>>,
    Path(_name): Path<String>,
    headers: HeaderMap,
) -> Response {
    let behavior = &state.behavior;

    if let Some((name, value)) = &behavior.require_header {
        let sent = headers.get(name.as_str()).and_then(|v| v.to_str().ok());
        if sent != Some(value.as_str()) {
            return StatusCode::UNAUTHORIZED.into_response();
        }
    }

    let range = headers
        .get(header::RANGE)
        .and_then(|v| v.to_str().ok())
        .and_then(parse_range);

    let Some((start, end)) = range else {
        state.probes.fetch_add(1, Ordering::SeqCst);
        return probe_response(&state);
    };

    state.range_requests.fetch_add(1, Ordering::SeqCst);

    if let Some(delay) = behavior.range_delay {
        tokio::time::sleep(delay).await;
    }

    if let Some((at, status)) = behavior.fail_at {
        if start == at {
            return status.into_response();
        }
    }

    if behavior.ignore_range {
        return (StatusCode::OK, state.data.clone()).into_response();
    }

    let len = state.data.len() as u64;
    if start >= len {
        return StatusCode::RANGE_NOT_SATISFIABLE.into_response();
    }
    let end = end.min(len - 1);
    let mut body = state.data[start as usize..=end as usize].to_vec();
    if behavior.short_body {
        body.truncate(body.len() / 2);
    }

    (
        StatusCode::PARTIAL_CONTENT,
        [(header::CONTENT_RANGE, format!("bytes {}-{}/{}", start, end, len))],
        body,
    )
        .into_response()
}

fn probe_response(state: &ServerState) -> Response {
    let behavior = &state.behavior;

    if let Some(status) = behavior.probe_status {
        return status.into_response();
    }

    let mut response = if behavior.omit_length {
        let data = state.data.clone();
        Body::from_stream(futures::stream::once(async move {
            Ok::<_, std::io::Error>(data)
        }))
        .into_response()
    } else {
        state.data.clone().into_response()
    };

    if let Some(disposition) = &behavior.disposition {
        if let Ok(value) = disposition.parse() {
            response
                .headers_mut()
                .insert(header::CONTENT_DISPOSITION, value);
        }
    }
    response
}
