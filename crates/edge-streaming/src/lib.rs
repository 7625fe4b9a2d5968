//! Streaming primitives for shell-first SSR.
//!
//! This crate enforces shell-first streaming patterns:
//! - `Shell` / `HeadContent` - Document skeleton and `<head>` metadata
//! - `StreamingSink` - Platform-controlled streaming of the shell, then sections

mod shell;
mod sink;

pub use shell::*;
pub use sink::*;
