//! Domain layer for the Marquee plugin.
//!
//! Core types independent of Zellij APIs: the catalog's movie summaries, result
//! pages, the `(query, page)` request key, and the crate error type.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`movie`]: Movie summary model
//! - [`page`]: Result pages and request keys
//!
//! # Examples
//!
//! ```
//! use marquee::domain::{Movie, PageKey, ResultPage};
//!
//! let page = ResultPage::new(vec![Movie::new(348, "Alien")], 1);
//! let key = PageKey::new("alien", 1);
//! assert_eq!(page.results.len(), 1);
//! assert_eq!(key.page, 1);
//! ```

pub mod error;
pub mod movie;
pub mod page;

pub use error::{MarqueeError, Result};
pub use movie::Movie;
pub use page::{PageKey, ResultPage};
