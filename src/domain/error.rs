//! Error types for the Marquee plugin.
//!
//! This module defines the centralized error type [`MarqueeError`] and a type alias
//! [`Result`] used throughout the crate. All errors are implemented with the
//! `thiserror` crate.

use thiserror::Error;

/// The main error type for Marquee operations.
///
/// The user interface never distinguishes between these variants: any failed
/// page request surfaces as the same error banner. The variants exist for
/// tracing and tests.
///
/// # Examples
///
/// ```
/// use marquee::MarqueeError;
///
/// let err = MarqueeError::Api { status: 401, message: "Invalid API key".to_string() };
/// assert_eq!(err.to_string(), "Catalog API error (401): Invalid API key");
/// ```
#[derive(Debug, Error)]
pub enum MarqueeError {
    /// Configuration is invalid or missing.
    ///
    /// Raised when the catalog client cannot be built, most commonly because
    /// no `api_token` was provided in the plugin configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The catalog answered with a non-success HTTP status.
    ///
    /// `message` carries TMDB's `status_message` when the body contains one,
    /// otherwise a generic description of the status.
    #[error("Catalog API error ({status}): {message}")]
    Api {
        /// HTTP status code returned by the catalog.
        status: u16,
        /// Human-readable reason.
        message: String,
    },

    /// A response body could not be decoded into a result page.
    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// Communication with the background worker failed.
    #[error("Worker communication error: {0}")]
    Worker(String),

    /// Theme parsing or loading failed.
    #[error("Theme error: {0}")]
    Theme(String),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// A specialized `Result` type for Marquee operations.
pub type Result<T> = std::result::Result<T, MarqueeError>;
