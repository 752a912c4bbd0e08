//! Handlers nested under `/api`.

use std::sync::Arc;

use crate::http::request::RequestContext;
use crate::http::response::{ContentType, RouteResponse};
use crate::producers::PayloadProvider;

/// Serves the asynchronously resolved payloads.
#[derive(Debug, Clone)]
pub struct ApiHandler {
    payloads: Arc<PayloadProvider>,
}

impl ApiHandler {
    pub const COMPONENT: &'static str = "ApiHandler";

    pub fn new(payloads: Arc<PayloadProvider>) -> Self {
        Self { payloads }
    }

    /// `GET /api/emojis`: the tokens concatenated into one HTML body.
    pub async fn get_emojis(&self, _ctx: RequestContext) -> RouteResponse {
        let emojis = self.payloads.resolve_emojis().await;
        RouteResponse::text(ContentType::Html, emojis.concat())
    }

    /// `GET /api/data`: the records as a JSON array.
    pub async fn get_data(&self, _ctx: RequestContext) -> RouteResponse {
        let records = self.payloads.resolve_records().await;
        RouteResponse::json(serde_json::json!(records))
    }
}
