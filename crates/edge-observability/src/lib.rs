//! Observability infrastructure for the edge streaming SSR platform.
//!
//! This crate provides:
//! - `StructuredLogger` - Structured logging bound to a request ID, workload and route
//! - `LogBuilder` - Fluent construction of log entries with typed fields

mod logging;

pub use logging::*;

// Re-export RequestId and TimingContext from edge-core for convenience
pub use edge_core::{RequestId, TimingContext};
