//! Data access layer for outbound API calls.
//!
//! This crate provides:
//! - `FetchClient` - Base-URL bound client issuing GET requests with query parameters
//! - `Transport` - The network seam (`SpinTransport` on wasm32, in-memory in tests)
//! - `Response` - Status, headers and body of an upstream response
//! - `FetchError` - Everything that can go wrong on the way
//!
//! Fetches are not retried. A failed fetch is returned to the caller as-is.

mod client;
mod error;
mod response;
mod transport;

pub use client::*;
pub use error::*;
pub use response::*;
pub use transport::*;
