//! Reactive route demo service.
//!
//! A small HTTP service whose routes demonstrate three response cadences:
//! a timed server-sent event stream, an immediate static sequence, and
//! payloads resolved through an await point. A documentation layer groups
//! the registered routes for an external API docs renderer.

pub mod config;
pub mod docs;
pub mod handlers;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod producers;
pub mod routing;

pub use config::schema::ServiceConfig;
pub use http::HttpServer;
pub use lifecycle::{App, Shutdown};
