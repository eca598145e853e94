// src/middleware/logging.rs
//! Per-request tracing span and access log.
//!
//! Every request runs inside a `request` span carrying its id, so the
//! orchestrator's task and poll events can be tied back to the HTTP call that
//! caused them. The id is taken from an incoming `x-request-id` header when
//! present and is echoed on the response.

use axum::{
    extract::{MatchedPath, Request},
    http::{HeaderName, HeaderValue},
    middleware::Next,
    response::Response,
};
use std::time::Instant;
use tracing::Instrument;
use uuid::Uuid;

pub const REQUEST_ID_HEADER: HeaderName = HeaderName::from_static("x-request-id");

fn request_id_for(req: &Request) -> String {
    req.headers()
        .get(&REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty() && v.len() <= 128)
        .map(str::to_owned)
        .unwrap_or_else(|| Uuid::new_v4().to_string())
}

pub async fn request_logging_middleware(req: Request, next: Next) -> Response {
    let started = Instant::now();
    let request_id = request_id_for(&req);
    let route = req
        .extensions()
        .get::<MatchedPath>()
        .map(|mp| mp.as_str().to_owned())
        .unwrap_or_else(|| req.uri().path().to_owned());

    let span = tracing::info_span!(
        "request",
        request_id = %request_id,
        method = %req.method(),
        route = %route,
    );

    let mut response = next.run(req).instrument(span.clone()).await;

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }

    let status = response.status().as_u16();
    let elapsed_ms = started.elapsed().as_millis() as u64;
    span.in_scope(|| {
        if response.status().is_server_error() {
            tracing::error!(status, elapsed_ms, "request failed");
        } else if response.status().is_client_error() {
            tracing::warn!(status, elapsed_ms, "request rejected");
        } else {
            tracing::info!(status, elapsed_ms, "request served");
        }
    });

    response
}
