//! Route table: (method, path) → handler.
//!
//! # Responsibilities
//! - Store registered routes with their declared content type
//! - Reject duplicate (method, path) registrations
//! - Look up the route for a request, or report an explicit no-match
//! - Keep documentation descriptors in a separate table keyed by `RouteKey`
//!
//! # Design Decisions
//! - Built at startup, immutable afterwards (shared via Arc, no locks)
//! - O(1) lookup: method map, then exact path map
//! - Nesting is plain prefix concatenation; no parameters, no wildcards
//! - Registration order is preserved for documentation output

use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::sync::Arc;

use axum::http::Method;
use futures_util::future::BoxFuture;
use serde::Serialize;
use thiserror::Error;

use crate::http::request::RequestContext;
use crate::http::response::{ContentType, RouteResponse};

/// Future returned by a route handler.
pub type HandlerFuture = BoxFuture<'static, RouteResponse>;

/// A route handler. Cheap to clone, callable from any task.
pub type Handler = Arc<dyn Fn(RequestContext) -> HandlerFuture + Send + Sync>;

/// Wrap an async function or closure as a `Handler`.
pub fn handler<F, Fut>(f: F) -> Handler
where
    F: Fn(RequestContext) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = RouteResponse> + Send + 'static,
{
    Arc::new(move |ctx| Box::pin(f(ctx)))
}

/// Errors raised by route registration and lookup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    /// Two registrations share a (method, path). Fatal at startup.
    #[error("route conflict: {method} {path} is already registered")]
    Conflict { method: Method, path: String },

    /// No route for the requested (method, path).
    #[error("no route for {method} {path}")]
    NotFound { method: Method, path: String },
}

/// Join key between the dispatch table and the documentation table.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RouteKey {
    pub method: Method,
    pub path: String,
}

impl RouteKey {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
        }
    }
}

impl fmt::Display for RouteKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method, self.path)
    }
}

/// Documentation descriptor: which component and operation declare a route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteDoc {
    pub component: String,
    pub operation: String,
}

impl RouteDoc {
    pub fn new(component: impl Into<String>, operation: impl Into<String>) -> Self {
        Self {
            component: component.into(),
            operation: operation.into(),
        }
    }
}

/// A registered route.
pub struct Route {
    key: RouteKey,
    content_type: ContentType,
    handler: Handler,
}

impl Route {
    pub fn key(&self) -> &RouteKey {
        &self.key
    }

    pub fn method(&self) -> &Method {
        &self.key.method
    }

    pub fn path(&self) -> &str {
        &self.key.path
    }

    pub fn content_type(&self) -> ContentType {
        self.content_type
    }

    /// Invoke the handler. The returned future owns everything it needs.
    pub fn call(&self, ctx: RequestContext) -> HandlerFuture {
        (self.handler)(ctx)
    }
}

impl fmt::Debug for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Route")
            .field("method", &self.key.method)
            .field("path", &self.key.path)
            .field("content_type", &self.content_type)
            .finish_non_exhaustive()
    }
}

/// Registered routes plus their documentation descriptors.
#[derive(Debug, Default)]
pub struct RouteTable {
    routes: Vec<Route>,
    index: HashMap<Method, HashMap<String, usize>>,
    docs: HashMap<RouteKey, RouteDoc>,
}

impl RouteTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a route. Fails if (method, path) is already taken.
    pub fn register(
        &mut self,
        method: Method,
        path: &str,
        content_type: ContentType,
        handler: Handler,
        doc: RouteDoc,
    ) -> Result<(), RouteError> {
        let by_path = self.index.entry(method.clone()).or_default();
        if by_path.contains_key(path) {
            tracing::error!(method = %method, path = %path, "Duplicate route registration");
            return Err(RouteError::Conflict {
                method,
                path: path.to_string(),
            });
        }
        by_path.insert(path.to_string(), self.routes.len());

        let key = RouteKey::new(method, path);
        tracing::debug!(
            route = %key,
            content_type = %content_type,
            component = %doc.component,
            operation = %doc.operation,
            "Route registered"
        );
        self.docs.insert(key.clone(), doc);
        self.routes.push(Route {
            key,
            content_type,
            handler,
        });
        Ok(())
    }

    /// Shorthand for registering a GET route.
    pub fn get(
        &mut self,
        path: &str,
        content_type: ContentType,
        handler: Handler,
        doc: RouteDoc,
    ) -> Result<(), RouteError> {
        self.register(Method::GET, path, content_type, handler, doc)
    }

    /// Register a batch of routes under a shared path prefix.
    pub fn nest<F>(&mut self, prefix: &str, f: F) -> Result<(), RouteError>
    where
        F: FnOnce(&mut RouteScope<'_>) -> Result<(), RouteError>,
    {
        let mut scope = RouteScope {
            table: self,
            prefix: prefix.to_string(),
        };
        f(&mut scope)
    }

    /// Exact (method, path) lookup.
    pub fn match_route(&self, method: &Method, path: &str) -> Result<&Route, RouteError> {
        self.index
            .get(method)
            .and_then(|by_path| by_path.get(path))
            .map(|&i| &self.routes[i])
            .ok_or_else(|| RouteError::NotFound {
                method: method.clone(),
                path: path.to_string(),
            })
    }

    /// Routes in registration order.
    pub fn routes(&self) -> impl Iterator<Item = &Route> {
        self.routes.iter()
    }

    /// Documentation descriptor for a route, if one was registered.
    pub fn doc(&self, key: &RouteKey) -> Option<&RouteDoc> {
        self.docs.get(key)
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

/// Registration scope created by [`RouteTable::nest`].
pub struct RouteScope<'a> {
    table: &'a mut RouteTable,
    prefix: String,
}

impl RouteScope<'_> {
    pub fn register(
        &mut self,
        method: Method,
        path: &str,
        content_type: ContentType,
        handler: Handler,
        doc: RouteDoc,
    ) -> Result<(), RouteError> {
        let full = join_path(&self.prefix, path);
        self.table.register(method, &full, content_type, handler, doc)
    }

    pub fn get(
        &mut self,
        path: &str,
        content_type: ContentType,
        handler: Handler,
        doc: RouteDoc,
    ) -> Result<(), RouteError> {
        self.register(Method::GET, path, content_type, handler, doc)
    }

    /// Open a further nested scope under `prefix`.
    pub fn nest<F>(&mut self, prefix: &str, f: F) -> Result<(), RouteError>
    where
        F: FnOnce(&mut RouteScope<'_>) -> Result<(), RouteError>,
    {
        let mut scope = RouteScope {
            table: &mut *self.table,
            prefix: join_path(&self.prefix, prefix),
        };
        f(&mut scope)
    }
}

/// `"/api"` + `"/data"` → `"/api/data"`. A trailing slash on the prefix is
/// folded into the child's leading one.
fn join_path(prefix: &str, path: &str) -> String {
    if path.is_empty() {
        return prefix.to_string();
    }
    let prefix = prefix.trim_end_matches('/');
    if path.starts_with('/') {
        format!("{prefix}{path}")
    } else {
        format!("{prefix}/{path}")
    }
}
