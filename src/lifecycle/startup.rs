//! Startup orchestration.
//!
//! # Responsibilities
//! - Build producers, handlers, route table and documentation groups
//! - Register every route with its documentation descriptor
//!
//! # Design Decisions
//! - Components are constructed explicitly and passed by Arc; no registry
//! - Any registration error is fatal
//! - The resulting `App` is immutable and shared by all requests

use std::future::Future;
use std::sync::Arc;

use thiserror::Error;

use crate::config::ServiceConfig;
use crate::docs::DocumentationGrouper;
use crate::handlers::{ApiHandler, NumberHandler};
use crate::http::request::RequestContext;
use crate::http::response::{ContentType, RouteResponse};
use crate::producers::{PayloadProvider, SequenceProducer};
use crate::routing::{handler, Handler, PatternError, RouteDoc, RouteError, RouteTable};

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("route registration failed: {0}")]
    Routes(#[from] RouteError),

    #[error("documentation groups failed to compile: {0}")]
    Groups(#[from] PatternError),
}

/// Everything a request needs, built once at startup.
#[derive(Debug)]
pub struct App {
    pub config: ServiceConfig,
    pub table: RouteTable,
    pub grouper: DocumentationGrouper,
    pub sequence: Arc<SequenceProducer>,
    pub payloads: Arc<PayloadProvider>,
}

impl App {
    pub fn build(config: ServiceConfig) -> Result<Self, StartupError> {
        let sequence = Arc::new(SequenceProducer::from_config(&config.stream));
        let payloads = Arc::new(PayloadProvider::new());

        let numbers = NumberHandler::new(sequence.clone());
        let api = ApiHandler::new(payloads.clone());

        let mut table = RouteTable::new();
        register_routes(&mut table, &numbers, &api)?;

        let grouper = DocumentationGrouper::with_default_groups()?;

        tracing::info!(
            routes = table.len(),
            groups = grouper.list_groups().len(),
            stream_count = config.stream.count,
            stream_interval_ms = config.stream.interval_ms,
            "Application assembled"
        );

        Ok(Self {
            config,
            table,
            grouper,
            sequence,
            payloads,
        })
    }
}

/// Register the four demo routes.
pub fn register_routes(
    table: &mut RouteTable,
    numbers: &NumberHandler,
    api: &ApiHandler,
) -> Result<(), RouteError> {
    table.get(
        "/numbers",
        ContentType::EventStream,
        bind(numbers.clone(), |h, ctx| async move { h.get_numbers(ctx).await }),
        RouteDoc::new(NumberHandler::COMPONENT, "getNumbers"),
    )?;
    table.get(
        "/letters",
        ContentType::Json,
        bind(numbers.clone(), |h, ctx| async move { h.get_letters(ctx).await }),
        RouteDoc::new(NumberHandler::COMPONENT, "getLetters"),
    )?;

    table.nest("/api", |scope| {
        scope.get(
            "/data",
            ContentType::Json,
            bind(api.clone(), |h, ctx| async move { h.get_data(ctx).await }),
            RouteDoc::new(ApiHandler::COMPONENT, "getData"),
        )?;
        scope.get(
            "/emojis",
            ContentType::Html,
            bind(api.clone(), |h, ctx| async move { h.get_emojis(ctx).await }),
            RouteDoc::new(ApiHandler::COMPONENT, "getEmojis"),
        )
    })
}

/// Bind a handler method to a cloneable receiver.
fn bind<T, F, Fut>(target: T, f: F) -> Handler
where
    T: Clone + Send + Sync + 'static,
    F: Fn(T, RequestContext) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = RouteResponse> + Send + 'static,
{
    handler(move |ctx| f(target.clone(), ctx))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Method;

    #[test]
    fn test_all_routes_registered() {
        let app = App::build(ServiceConfig::default()).unwrap();

        let expected = [
            ("/numbers", ContentType::EventStream, "getNumbers"),
            ("/letters", ContentType::Json, "getLetters"),
            ("/api/data", ContentType::Json, "getData"),
            ("/api/emojis", ContentType::Html, "getEmojis"),
        ];
        assert_eq!(app.table.len(), expected.len());

        for (path, content_type, operation) in expected {
            let route = app.table.match_route(&Method::GET, path).unwrap();
            assert_eq!(route.content_type(), content_type);
            assert_eq!(app.table.doc(route.key()).unwrap().operation, operation);
        }
    }

    #[test]
    fn test_registering_twice_conflicts() {
        let app = App::build(ServiceConfig::default()).unwrap();
        let numbers = NumberHandler::new(app.sequence.clone());
        let api = ApiHandler::new(app.payloads.clone());

        let mut table = RouteTable::new();
        register_routes(&mut table, &numbers, &api).unwrap();
        assert!(matches!(
            register_routes(&mut table, &numbers, &api),
            Err(RouteError::Conflict { .. })
        ));
    }

    #[test]
    fn test_stream_shape_follows_config() {
        let mut config = ServiceConfig::default();
        config.stream.interval_ms = 25;
        let app = App::build(config).unwrap();

        assert_eq!(app.sequence.interval(), std::time::Duration::from_millis(25));
    }
}
