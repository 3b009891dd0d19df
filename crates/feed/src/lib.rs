//! `prothunter-feed` — decoding of the scraper's product feed.
//!
//! **Responsibility:** turn feed bytes into [`RawProduct`] records for the
//! catalog. Fetching the feed (HTTP, cache-busting) is the caller's concern.
//!
//! [`RawProduct`]: prothunter_catalog::RawProduct

pub mod error;
pub mod loader;

pub use error::FeedError;
pub use loader::{FeedLoad, load_feed_path, load_feed_reader, load_feed_str, load_feed_value};
