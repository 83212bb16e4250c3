//! Request construction for the TMDB movie search endpoint.
//!
//! The plugin runtime performs the actual HTTP call through Zellij's
//! `web_request`. This module only describes the request: URL, headers, and a
//! context map carrying the [`PageKey`] so the response can be matched back to
//! the key that requested it.

use crate::domain::error::{MarqueeError, Result};
use crate::domain::PageKey;
use crate::Config;
use std::collections::BTreeMap;

/// A fully described `GET` request ready to hand to `web_request`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogRequest {
    pub url: String,
    pub headers: BTreeMap<String, String>,
    pub context: BTreeMap<String, String>,
}

/// Builds catalog search requests from plugin configuration.
#[derive(Clone)]
pub struct CatalogClient {
    api_base_url: String,
    api_token: String,
    language: String,
}

impl CatalogClient {
    /// Creates a client from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`MarqueeError::Config`] when `api_token` is missing or blank.
    pub fn new(config: &Config) -> Result<Self> {
        let api_token = config
            .api_token
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| {
                MarqueeError::Config("api_token is required to query the movie catalog".to_string())
            })?;

        Ok(Self {
            api_base_url: config.api_base_url.trim_end_matches('/').to_string(),
            api_token: api_token.to_string(),
            language: config.language.clone(),
        })
    }

    /// Describes the search request for one `(query, page)` key.
    ///
    /// # Examples
    ///
    /// ```
    /// use marquee::catalog::CatalogClient;
    /// use marquee::{Config, PageKey};
    ///
    /// let config = Config { api_token: Some("token".into()), ..Default::default() };
    /// let client = CatalogClient::new(&config).unwrap();
    /// let request = client.request_for(&PageKey::new("blade runner", 2));
    ///
    /// assert!(request.url.contains("query=blade%20runner"));
    /// assert!(request.url.ends_with("page=2"));
    /// ```
    #[must_use]
    pub fn request_for(&self, key: &PageKey) -> CatalogRequest {
        let url = format!(
            "{}/search/movie?query={}&include_adult=false&language={}&page={}",
            self.api_base_url,
            urlencoding::encode(&key.query),
            urlencoding::encode(&self.language),
            key.page,
        );

        let mut headers = BTreeMap::new();
        headers.insert(
            "Authorization".to_string(),
            format!("Bearer {}", self.api_token),
        );
        headers.insert("accept".to_string(), "application/json".to_string());

        CatalogRequest {
            url,
            headers,
            context: key.to_context(),
        }
    }
}

impl std::fmt::Debug for CatalogClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogClient")
            .field("api_base_url", &self.api_base_url)
            .field("language", &self.language)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> CatalogClient {
        let config = Config {
            api_token: Some("secret".to_string()),
            api_base_url: "https://api.themoviedb.org/3/".to_string(),
            ..Default::default()
        };
        CatalogClient::new(&config).unwrap()
    }

    #[test]
    fn test_missing_token_is_config_error() {
        let config = Config {
            api_token: Some("   ".to_string()),
            ..Default::default()
        };
        assert!(matches!(CatalogClient::new(&config), Err(MarqueeError::Config(_))));
        assert!(CatalogClient::new(&Config::default()).is_err());
    }

    #[test]
    fn test_request_url_and_headers() {
        let request = client().request_for(&PageKey::new("alien & co", 3));

        assert_eq!(
            request.url,
            "https://api.themoviedb.org/3/search/movie?query=alien%20%26%20co&include_adult=false&language=en-US&page=3"
        );
        assert_eq!(
            request.headers.get("Authorization").map(String::as_str),
            Some("Bearer secret")
        );
        assert_eq!(
            request.headers.get("accept").map(String::as_str),
            Some("application/json")
        );
    }

    #[test]
    fn test_request_context_round_trips_key() {
        let key = PageKey::new("alien", 3);
        let request = client().request_for(&key);
        assert_eq!(PageKey::from_context(&request.context), Some(key));
    }

    #[test]
    fn test_debug_hides_token() {
        let rendered = format!("{:?}", client());
        assert!(!rendered.contains("secret"));
    }
}
