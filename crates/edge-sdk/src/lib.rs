//! Public SDK for the edge streaming SSR platform.
//!
//! This crate re-exports all platform functionality:
//!
//! ```ignore
//! use edge_sdk::prelude::*;
//!
//! async fn render(ctx: RequestContext, body: OutgoingBody) -> anyhow::Result<()> {
//!     let logger = StructuredLogger::new(ctx.request_id.clone());
//!     logger.info("Rendering items");
//!     let client = FetchClient::new(SpinTransport, "https://api.example.com")
//!         .with_request_id(ctx.request_id.clone());
//!     let data: MyData = client.get_json("/items", &[]).await?;
//!
//!     let mut sink = StreamingSink::new(body, ctx.timing);
//!     sink.send_shell(&shell.render_opening()).await?;
//!     sink.send_section("content", &render_items(&data)).await?;
//!     sink.complete().await?;
//!     Ok(())
//! }
//! ```

pub use edge_cache;
pub use edge_core;
pub use edge_data;
pub use edge_observability;
pub use edge_streaming;

/// Prelude for convenient imports.
pub mod prelude {
    pub use edge_cache::*;
    pub use edge_core::*;
    pub use edge_data::*;
    pub use edge_observability::*;
    pub use edge_streaming::*;
}
