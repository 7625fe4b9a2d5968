//! Caching infrastructure for the edge streaming SSR platform.
//!
//! Pages are generated on demand and cached by the CDN in front of the
//! platform. This crate describes how long they stay fresh:
//! - `RouteCachePolicy` - Route-level cache configuration, including
//!   incremental revalidation (`RouteCachePolicy::revalidate`)
//! - `CacheHeadersBuilder` - Response headers derived from a policy
//! - `generate_etag` / `etag_matches` - Conditional request support
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use edge_cache::{CacheHeadersBuilder, RouteCachePolicy};
//!
//! // Regenerate at most every 8 hours, serve the previous page meanwhile.
//! let policy = RouteCachePolicy::revalidate(Duration::from_secs(8 * 60 * 60));
//!
//! let headers = CacheHeadersBuilder::new()
//!     .cache_control_from_policy(&policy)
//!     .build();
//! assert_eq!(headers[0].0, "cache-control");
//! ```

mod headers;
mod policy;

pub use headers::*;
pub use policy::*;
