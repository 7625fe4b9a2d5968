//! Section renderers for the home page.

mod all_episodes;
mod latest_episodes;
mod toggle;

pub use all_episodes::*;
pub use latest_episodes::*;
pub use toggle::*;
