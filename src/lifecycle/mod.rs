//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Config → producers → handlers → route table → doc groups → App
//!
//! Shutdown (shutdown.rs):
//!     Signal received → stop accepting → drain in-flight streams → exit
//!
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → trigger graceful shutdown
//! ```
//!
//! # Design Decisions
//! - Explicit composition: every component is built by hand in startup.rs
//! - Fail fast: a route conflict or an invalid group pattern aborts startup
//! - Listeners start last (traffic only when ready)

pub mod shutdown;
pub mod signals;
pub mod startup;

pub use shutdown::Shutdown;
pub use startup::{App, StartupError};
