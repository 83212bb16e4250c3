//! Catalog access: request construction, response decoding and page caching.
//!
//! # Modules
//!
//! - `client`: builds TMDB `search/movie` requests keyed by `(query, page)`
//! - `decode`: turns web-request results into result pages or errors
//! - `cache`: bounded LRU of result pages owned by the fetch orchestrator

pub mod cache;
pub mod client;
pub mod decode;

pub use cache::PageCache;
pub use client::{CatalogClient, CatalogRequest};
pub use decode::decode_page;
