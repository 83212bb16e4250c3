//! Movie summary model as returned by the catalog search endpoint.
//!
//! A [`Movie`] is opaque to the rest of the plugin beyond display: the grid
//! shows its title, year and rating, and the detail modal shows the rest.
//! Every field except `id` and `title` tolerates being absent or `null` on the
//! wire, since TMDB omits or nulls them freely for obscure titles.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

/// One entry of a catalog search result page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    pub id: u64,
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub original_title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub overview: String,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub backdrop_path: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub release_date: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub vote_average: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub vote_count: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub original_language: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub popularity: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub adult: bool,
}

impl Movie {
    /// Creates a movie with only an identifier and a title.
    ///
    /// # Examples
    ///
    /// ```
    /// use marquee::Movie;
    ///
    /// let movie = Movie::new(348, "Alien");
    /// assert_eq!(movie.title, "Alien");
    /// assert!(movie.poster_path.is_none());
    /// ```
    #[must_use]
    pub fn new(id: u64, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            original_title: String::new(),
            overview: String::new(),
            poster_path: None,
            backdrop_path: None,
            release_date: String::new(),
            vote_average: 0.0,
            vote_count: 0,
            original_language: String::new(),
            popularity: 0.0,
            adult: false,
        }
    }

    /// Parses `release_date` (`YYYY-MM-DD`), returning `None` when it is blank
    /// or malformed.
    #[must_use]
    pub fn release(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.release_date, "%Y-%m-%d").ok()
    }

    /// Release year for compact display, e.g. `"1979"`.
    #[must_use]
    pub fn release_year(&self) -> Option<String> {
        self.release().map(|date| date.format("%Y").to_string())
    }

    /// Long-form release date for the detail view, e.g. `"May 25, 1979"`.
    #[must_use]
    pub fn release_label(&self) -> Option<String> {
        self.release().map(|date| date.format("%B %-d, %Y").to_string())
    }

    /// Rating as shown on cards and in the modal, e.g. `"8.1/10"`.
    ///
    /// Unrated titles (no votes) render as `"unrated"`.
    #[must_use]
    pub fn rating_label(&self) -> String {
        if self.vote_count == 0 && self.vote_average == 0.0 {
            "unrated".to_string()
        } else {
            format!("{:.1}/10", self.vote_average)
        }
    }

    /// Absolute poster URL for the given image base, if the movie has a poster.
    #[must_use]
    pub fn poster_url(&self, image_base_url: &str) -> Option<String> {
        self.poster_path
            .as_deref()
            .map(|path| join_image_url(image_base_url, path))
    }

    /// Absolute backdrop URL for the given image base, if the movie has one.
    #[must_use]
    pub fn backdrop_url(&self, image_base_url: &str) -> Option<String> {
        self.backdrop_path
            .as_deref()
            .map(|path| join_image_url(image_base_url, path))
    }
}

fn join_image_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// Treats an explicit JSON `null` like a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_sparse_entry() {
        let json = r#"{"id": 7, "title": "Obscure", "overview": null, "release_date": "", "poster_path": null}"#;
        let movie: Movie = serde_json::from_str(json).unwrap();

        assert_eq!(movie.id, 7);
        assert_eq!(movie.overview, "");
        assert!(movie.release().is_none());
        assert!(movie.release_year().is_none());
        assert_eq!(movie.rating_label(), "unrated");
    }

    #[test]
    fn test_release_formatting() {
        let mut movie = Movie::new(348, "Alien");
        movie.release_date = "1979-05-25".to_string();

        assert_eq!(movie.release_year().as_deref(), Some("1979"));
        assert_eq!(movie.release_label().as_deref(), Some("May 25, 1979"));
    }

    #[test]
    fn test_image_urls_join_cleanly() {
        let mut movie = Movie::new(348, "Alien");
        movie.poster_path = Some("/vfrQk5IPloGg1v9Rzbh2Eg3VGyM.jpg".to_string());

        assert_eq!(
            movie.poster_url("https://image.tmdb.org/t/p/w500/").as_deref(),
            Some("https://image.tmdb.org/t/p/w500/vfrQk5IPloGg1v9Rzbh2Eg3VGyM.jpg")
        );
        assert!(movie.backdrop_url("https://image.tmdb.org/t/p/w500").is_none());
    }

    #[test]
    fn test_rating_label() {
        let mut movie = Movie::new(1, "Rated");
        movie.vote_average = 8.149;
        movie.vote_count = 15000;
        assert_eq!(movie.rating_label(), "8.1/10");
    }
}
