//! HTTP server setup and dispatch.
//!
//! # Responsibilities
//! - Create the Axum router with documentation and health endpoints
//! - Wire up middleware (tracing, timeout, request ID)
//! - Dispatch every other request through the route table
//! - Serve until the shutdown signal fires
//!
//! # Design Decisions
//! - Demo routes are not Axum routes; a single fallback dispatches them so
//!   the route table stays the only source of truth
//! - Documentation endpoints sit outside the route table and so belong to
//!   no documentation group
//! - The timeout bounds the response head only; streamed bodies run to
//!   completion or until the client goes away

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    body::Body,
    extract::{Path, State},
    http::{Request, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::docs::openapi;
use crate::http::request::{propagate_request_id_layer, set_request_id_layer, RequestContext};
use crate::http::response::error_response;
use crate::lifecycle::App;
use crate::observability::{metrics, tracing::make_request_span};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub app: Arc<App>,
}

/// HTTP server for the demo routes.
pub struct HttpServer {
    router: Router,
    app: Arc<App>,
}

impl HttpServer {
    pub fn new(app: Arc<App>) -> Self {
        let router = Self::build_router(app.clone());
        Self { router, app }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(app: Arc<App>) -> Router {
        let request_timeout = Duration::from_secs(app.config.timeouts.request_secs);
        let state = AppState { app };

        Router::new()
            .route("/health", get(health))
            .route("/v3/api-docs/swagger-config", get(swagger_config))
            .route("/v3/api-docs/{group}", get(group_docs))
            .fallback(dispatch)
            .with_state(state)
            .layer(TimeoutLayer::new(request_timeout))
            .layer(propagate_request_id_layer())
            .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
            .layer(set_request_id_layer())
    }

    /// The fully layered router, for serving or in-process testing.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    pub fn app(&self) -> &Arc<App> {
        &self.app
    }

    /// Run the server until `shutdown` fires, then drain open connections.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            routes = self.app.table.len(),
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("HTTP server draining connections");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Look up the route table and run the matched handler.
async fn dispatch(State(state): State<AppState>, request: Request<Body>) -> Response {
    let start_time = Instant::now();
    let ctx = RequestContext::from_request(&request);
    let method = ctx.method.to_string();

    let route = match state.app.table.match_route(&ctx.method, &ctx.path) {
        Ok(route) => route,
        Err(e) => {
            tracing::warn!(
                request_id = %ctx.request_id_or_unknown(),
                method = %ctx.method,
                path = %ctx.path,
                "No route matched"
            );
            metrics::record_request(&method, metrics::UNMATCHED_PATH, StatusCode::NOT_FOUND.as_u16(), start_time);
            return e.into_response();
        }
    };

    tracing::debug!(
        request_id = %ctx.request_id_or_unknown(),
        route = %route.key(),
        "Dispatching request"
    );

    let response = route.call(ctx).await;
    if response.content_type != route.content_type() {
        tracing::warn!(
            route = %route.key(),
            declared = %route.content_type(),
            produced = %response.content_type,
            "Handler produced a different content type than declared"
        );
    }

    let response = response.into_response();
    metrics::record_request(&method, route.path(), response.status().as_u16(), start_time);
    response
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

async fn swagger_config(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(openapi::swagger_config(&state.app.grouper))
}

async fn group_docs(State(state): State<AppState>, Path(group): Path<String>) -> Response {
    let app = &state.app;
    match app.grouper.find(&group) {
        Some(found) => Json(openapi::group_document(&app.grouper, found, &app.table)).into_response(),
        None => {
            tracing::debug!(group = %group, "Unknown documentation group");
            error_response(StatusCode::NOT_FOUND, format!("unknown documentation group {group:?}"))
        }
    }
}
