use crate::app::state::AppState;
use axum::extract::{Request, State};
use axum::http::{Method, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use std::time::Instant;

pub async fn version(State(state): State<AppState>) -> String {
    state.version
}

/// Echoes unmatched GET paths; anything else is a plain 404.
pub async fn fallback(method: Method, uri: axum::http::Uri) -> Response {
    if method == Method::GET {
        format!("Trying to GET: {}", uri.path().trim_start_matches('/')).into_response()
    } else {
        StatusCode::NOT_FOUND.into_response()
    }
}

pub async fn log_requests(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let started = Instant::now();

    let response = next.run(request).await;

    tracing::info!(
        method = %method,
        path = %path,
        status = response.status().as_u16(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "request handled"
    );
    response
}
