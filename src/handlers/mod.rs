//! Route handlers.
//!
//! Each handler owns the producer it draws from and turns a produced value
//! into a `RouteResponse` with a fixed content type.

pub mod api;
pub mod numbers;

pub use api::ApiHandler;
pub use numbers::NumberHandler;
