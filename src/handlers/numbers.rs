//! Handlers for `/numbers` and `/letters`.

use std::sync::Arc;

use futures_util::StreamExt;

use crate::http::request::RequestContext;
use crate::http::response::RouteResponse;
use crate::producers::SequenceProducer;

/// Serves the numeric event stream and the letter sequence.
#[derive(Debug, Clone)]
pub struct NumberHandler {
    sequence: Arc<SequenceProducer>,
}

impl NumberHandler {
    pub const COMPONENT: &'static str = "NumberHandler";

    pub fn new(sequence: Arc<SequenceProducer>) -> Self {
        Self { sequence }
    }

    /// `GET /numbers`: one SSE event per number, spaced by the producer's interval.
    pub async fn get_numbers(&self, ctx: RequestContext) -> RouteResponse {
        tracing::debug!(request_id = %ctx.request_id_or_unknown(), "Starting number stream");
        let stream = self.sequence.produce_numbers().map(|n| n.to_string());
        RouteResponse::events(stream.boxed())
    }

    /// `GET /letters`: the alphabet as a JSON array of one-letter strings.
    pub async fn get_letters(&self, _ctx: RequestContext) -> RouteResponse {
        let letters: Vec<String> = self
            .sequence
            .produce_letters()
            .into_iter()
            .map(String::from)
            .collect();
        RouteResponse::json(serde_json::json!(letters))
    }
}
