//! Value producers behind the demo routes.
//!
//! # Data Flow
//! ```text
//! NumberHandler
//!     → sequence.rs (timed numeric stream, static letters)
//! ApiHandler
//!     → payload.rs (batches resolved through an await point)
//! ```
//!
//! # Design Decisions
//! - Producers hold no per-request state; each call builds a fresh value
//! - Built once at startup and shared via Arc
//! - Nothing here knows about HTTP or content types

pub mod payload;
pub mod sequence;

pub use payload::{DataRecord, PayloadProvider, EMOJIS};
pub use sequence::{NumberStream, SequenceProducer, StreamStats};
