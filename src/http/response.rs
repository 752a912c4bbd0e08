//! Response composition.
//!
//! # Responsibilities
//! - Describe what a route handler produced: declared content type plus body
//! - Translate that description into an HTTP response
//!
//! # Design Decisions
//! - Three production cadences map to three body kinds:
//!   streamed over time, completed JSON batch, completed text batch
//! - Streamed bodies are always `text/event-stream`, one SSE event per item
//! - Streaming responses are never buffered; dropping the response body
//!   drops the producing stream

use std::convert::Infallible;
use std::fmt;

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{
        sse::{Event, Sse},
        IntoResponse, Response,
    },
    Json,
};
use futures_util::stream::{BoxStream, StreamExt};
use serde::Serialize;

use crate::routing::RouteError;

/// Content types a route can declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ContentType {
    EventStream,
    Json,
    Html,
}

impl ContentType {
    /// Header value sent on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::EventStream => "text/event-stream",
            ContentType::Json => "application/json",
            ContentType::Html => "text/html; charset=utf-8",
        }
    }

    /// Media type without parameters, as listed in API documentation.
    pub fn essence(&self) -> &'static str {
        match self {
            ContentType::EventStream => "text/event-stream",
            ContentType::Json => "application/json",
            ContentType::Html => "text/html",
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Body produced by a route handler.
pub enum ResponseBody {
    /// Server-sent events, written item by item as the stream yields.
    Events(BoxStream<'static, String>),
    /// A completed JSON document.
    Json(serde_json::Value),
    /// A completed text payload.
    Text(String),
}

impl fmt::Debug for ResponseBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResponseBody::Events(_) => f.write_str("Events(..)"),
            ResponseBody::Json(value) => f.debug_tuple("Json").field(value).finish(),
            ResponseBody::Text(text) => f.debug_tuple("Text").field(text).finish(),
        }
    }
}

/// A handler's result: declared content type plus body.
#[derive(Debug)]
pub struct RouteResponse {
    pub content_type: ContentType,
    pub body: ResponseBody,
}

impl RouteResponse {
    pub fn events(stream: BoxStream<'static, String>) -> Self {
        Self {
            content_type: ContentType::EventStream,
            body: ResponseBody::Events(stream),
        }
    }

    pub fn json(value: serde_json::Value) -> Self {
        Self {
            content_type: ContentType::Json,
            body: ResponseBody::Json(value),
        }
    }

    pub fn text(content_type: ContentType, text: impl Into<String>) -> Self {
        Self {
            content_type,
            body: ResponseBody::Text(text.into()),
        }
    }
}

impl IntoResponse for RouteResponse {
    fn into_response(self) -> Response {
        let content_type = HeaderValue::from_static(self.content_type.as_str());

        match self.body {
            ResponseBody::Events(stream) => {
                let events = stream.map(|item| Ok::<_, Infallible>(Event::default().data(item)));
                Sse::new(events).into_response()
            }
            ResponseBody::Json(value) => {
                ([(header::CONTENT_TYPE, content_type)], value.to_string()).into_response()
            }
            ResponseBody::Text(text) => {
                ([(header::CONTENT_TYPE, content_type)], text).into_response()
            }
        }
    }
}

impl IntoResponse for RouteError {
    fn into_response(self) -> Response {
        let status = match self {
            RouteError::NotFound { .. } => StatusCode::NOT_FOUND,
            RouteError::Conflict { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        };
        error_response(status, self.to_string())
    }
}

/// JSON error body used for every non-route failure the service reports.
pub fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(serde_json::json!({ "error": message.into() }))).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use futures_util::stream;

    async fn body_string(response: Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    fn header_of(response: &Response) -> &str {
        response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
    }

    #[tokio::test]
    async fn test_event_stream_framing() {
        let items = stream::iter(vec!["1".to_string(), "2".to_string()]).boxed();
        let response = RouteResponse::events(items).into_response();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(header_of(&response), "text/event-stream");
        assert_eq!(body_string(response).await, "data: 1\n\ndata: 2\n\n");
    }

    #[tokio::test]
    async fn test_html_text_body() {
        let response = RouteResponse::text(ContentType::Html, "😆∑π").into_response();

        assert_eq!(header_of(&response), "text/html; charset=utf-8");
        assert_eq!(body_string(response).await, "😆∑π");
    }

    #[tokio::test]
    async fn test_json_body() {
        let response = RouteResponse::json(serde_json::json!(["a", "b"])).into_response();

        assert_eq!(header_of(&response), "application/json");
        assert_eq!(body_string(response).await, r#"["a","b"]"#);
    }

    #[tokio::test]
    async fn test_not_found_maps_to_404() {
        let error = RouteError::NotFound {
            method: axum::http::Method::GET,
            path: "/missing".into(),
        };
        let response = error.into_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(body_string(response).await.contains("/missing"));
    }

    #[test]
    fn test_essence_drops_parameters() {
        assert_eq!(ContentType::Html.essence(), "text/html");
        assert_eq!(ContentType::Html.as_str(), "text/html; charset=utf-8");
    }
}
