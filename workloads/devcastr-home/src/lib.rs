//! Devcastr home page - podcast episodes rendered at the edge.
//!
//! This workload demonstrates:
//! - Fetching the newest episodes from a JSON API before committing a response
//! - Incremental regeneration through shared-cache headers (every 8 hours)
//! - Conditional requests with an ETag of the rendered page, and HEAD requests
//! - Shell-first streaming of the toggle, latest and all-episodes sections

pub mod config;
pub mod data;
pub mod page;
pub mod player;
pub mod respond;
pub mod sections;

#[cfg(target_arch = "wasm32")]
mod handler;

/// Name reported in logs.
pub const WORKLOAD_NAME: &str = "devcastr-home";
