//! Episode data: API records, display formatting and page props loading.

mod episode;
mod format;
mod loader;

pub use episode::*;
pub use format::*;
pub use loader::*;
