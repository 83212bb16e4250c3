//! Response decoding for the catalog search endpoint.
//!
//! A successful (2xx) response is parsed into a [`ResultPage`]. Anything else is
//! an API error. TMDB error bodies look like
//! `{"status_code": 7, "status_message": "Invalid API key", "success": false}`,
//! and the message is surfaced when present.

use crate::domain::error::{MarqueeError, Result};
use crate::domain::ResultPage;
use serde::Deserialize;

/// Shape of a TMDB error body.
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    status_message: Option<String>,
}

/// Decodes a web-request result into a result page.
///
/// # Errors
///
/// - [`MarqueeError::Api`] for non-2xx statuses
/// - [`MarqueeError::Decode`] when a 2xx body is not a valid result page
///
/// # Examples
///
/// ```
/// use marquee::catalog::decode_page;
///
/// let page = decode_page(200, br#"{"results": [], "total_pages": 0}"#).unwrap();
/// assert!(page.results.is_empty());
///
/// assert!(decode_page(401, b"{}").is_err());
/// ```
pub fn decode_page(status: u16, body: &[u8]) -> Result<ResultPage> {
    if !(200..300).contains(&status) {
        let message = serde_json::from_slice::<ApiErrorBody>(body)
            .ok()
            .and_then(|b| b.status_message)
            .unwrap_or_else(|| fallback_message(status, body));

        tracing::debug!(status = status, message = %message, "catalog request failed");
        return Err(MarqueeError::Api { status, message });
    }

    let page: ResultPage = serde_json::from_slice(body)?;
    tracing::trace!(
        results = page.results.len(),
        total_pages = page.total_pages,
        "result page decoded"
    );
    Ok(page)
}

fn fallback_message(status: u16, body: &[u8]) -> String {
    let text = String::from_utf8_lossy(body);
    let text = text.trim();
    if text.is_empty() || text.starts_with('{') || text.starts_with('<') {
        format!("request failed with HTTP status {status}")
    } else {
        text.chars().take(120).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_results() {
        let body = br#"{
            "page": 1,
            "results": [
                {"id": 348, "title": "Alien", "release_date": "1979-05-25", "vote_average": 8.1, "vote_count": 15000},
                {"id": 679, "title": "Aliens", "release_date": "1986-07-18"}
            ],
            "total_pages": 3,
            "total_results": 58
        }"#;

        let page = decode_page(200, body).unwrap();
        assert_eq!(page.results.len(), 2);
        assert_eq!(page.results[1].title, "Aliens");
        assert_eq!(page.total_pages, 3);
    }

    #[test]
    fn test_no_matches_is_not_an_error() {
        let page = decode_page(200, br#"{"page":1,"results":[],"total_pages":0,"total_results":0}"#)
            .unwrap();
        assert!(page.is_empty());
        assert_eq!(page.total_pages, 0);
    }

    #[test]
    fn test_api_error_uses_status_message() {
        let body = br#"{"status_code":7,"status_message":"Invalid API key: You must be granted a valid key.","success":false}"#;
        match decode_page(401, body) {
            Err(MarqueeError::Api { status, message }) => {
                assert_eq!(status, 401);
                assert!(message.starts_with("Invalid API key"));
            }
            other => panic!("expected api error, got {other:?}"),
        }
    }

    #[test]
    fn test_transport_error_text_is_kept() {
        match decode_page(400, b"connection refused") {
            Err(MarqueeError::Api { message, .. }) => assert_eq!(message, "connection refused"),
            other => panic!("expected api error, got {other:?}"),
        }
    }

    #[test]
    fn test_malformed_body_is_decode_error() {
        assert!(matches!(
            decode_page(200, b"<html>gateway</html>"),
            Err(MarqueeError::Decode(_))
        ));
    }
}
