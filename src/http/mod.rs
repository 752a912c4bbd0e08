//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware)
//!     → request.rs (request ID, RequestContext)
//!     → routing table lookup → handler
//!     → response.rs (RouteResponse → SSE / JSON / text)
//!     → Send to client
//! ```

pub mod request;
pub mod response;
pub mod server;

pub use request::{RequestContext, X_REQUEST_ID};
pub use response::{ContentType, ResponseBody, RouteResponse};
pub use server::{AppState, HttpServer};
