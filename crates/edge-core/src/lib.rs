//! Core abstractions for the edge streaming SSR platform.
//!
//! This crate provides the fundamental types shared by workloads:
//! - `RequestContext` - Request method, path, query and headers
//! - `RequestId` - Correlation identifier for logs and upstream calls
//! - `TimingContext` / `LifecyclePhase` - Request lifecycle tracking
//! - `WorkloadError` - Errors raised while generating a page

mod context;
mod lifecycle;
mod workload;

pub use context::*;
pub use lifecycle::*;
pub use workload::*;
