//! API documentation subsystem.
//!
//! # Data Flow
//! ```text
//! startup:
//!     grouper.rs (named groups of path patterns)
//!
//! documentation query:
//!     RouteTable (routes + RouteDoc descriptors)
//!     → grouper.rs (lazy membership per group)
//!     → openapi.rs (JSON documents for an external renderer)
//! ```
//!
//! # Design Decisions
//! - Groups never influence dispatch
//! - Membership is evaluated on every query, never cached
//! - A route may belong to several groups, or to none

pub mod grouper;
pub mod openapi;

pub use grouper::{DocumentationGrouper, DocumentedRoute, RouteGroup};
