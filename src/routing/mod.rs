//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request (method, path)
//!     → table.rs (exact lookup)
//!     → Return: matched Route or RouteError::NotFound
//!
//! Route registration (at startup):
//!     register / nest(prefix, ...)
//!     → conflict check on (method, path)
//!     → frozen into Arc<RouteTable>
//!
//! Documentation (independent of dispatch):
//!     matcher.rs (Ant-style path patterns compiled into a GlobSet per docs group)
//! ```
//!
//! # Design Decisions
//! - Routes registered at startup, immutable at runtime
//! - Exact matching only; patterns never take part in dispatch
//! - Deterministic: same input always matches same route
//! - Route metadata for docs lives beside, not inside, the dispatch index

pub mod matcher;
pub mod table;

pub use matcher::{PathPatterns, PatternError};
pub use table::{handler, Handler, HandlerFuture, Route, RouteDoc, RouteError, RouteKey, RouteScope, RouteTable};
