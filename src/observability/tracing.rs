//! Request spans.
//!
//! Every request runs inside a span carrying method, path and request ID,
//! so log lines from handlers and producers correlate without passing the ID
//! around explicitly.

use axum::{body::Body, http::Request};
use tracing::Span;

use crate::http::request::request_id;

/// `MakeSpan` hook for `TraceLayer`.
pub fn make_request_span(request: &Request<Body>) -> Span {
    let request_id = request_id(request).unwrap_or_else(|| "unknown".to_string());
    tracing::info_span!(
        "request",
        method = %request.method(),
        path = %request.uri().path(),
        request_id = %request_id,
    )
}
