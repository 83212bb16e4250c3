//! Terminal user interface.
//!
//! ```text
//! AppState → compute_viewmodel → UIViewModel → render → ANSI output
//! ```
//!
//! # Modules
//!
//! - [`viewmodel`]: display-ready snapshot types
//! - [`renderer`]: entry point called from the plugin's `render`
//! - [`components`]: header, search bar, grid, pager, modal, toasts, footer
//! - [`pager`]: windowed page-number layout
//! - [`helpers`]: cursor positioning, highlighting, width-aware text fitting
//! - [`theme`]: color schemes and ANSI escapes

pub mod components;
pub mod helpers;
pub mod pager;
pub mod renderer;
pub mod theme;
pub mod viewmodel;

pub use renderer::render;
pub use theme::Theme;
pub use viewmodel::{Body, UIViewModel};
