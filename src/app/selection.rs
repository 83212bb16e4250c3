//! Selected movie for the detail modal.

use crate::domain::Movie;

/// At most one selected movie; last write wins.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Selection {
    current: Option<Movie>,
}

impl Selection {
    #[must_use]
    pub const fn new() -> Self {
        Self { current: None }
    }

    /// Selects `movie`, opening the modal. Returns whether anything changed.
    pub fn select(&mut self, movie: Movie) -> bool {
        if self.current.as_ref() == Some(&movie) {
            return false;
        }
        tracing::debug!(movie_id = movie.id, title = %movie.title, "movie selected");
        self.current = Some(movie);
        true
    }

    /// Clears the selection, closing the modal. Returns whether anything changed.
    pub fn close(&mut self) -> bool {
        self.current.take().is_some()
    }

    #[must_use]
    pub const fn current(&self) -> Option<&Movie> {
        self.current.as_ref()
    }

    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.current.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_selection_wins() {
        let mut selection = Selection::new();
        assert!(selection.select(Movie::new(1, "Alien")));
        assert!(selection.select(Movie::new(2, "Aliens")));
        assert_eq!(selection.current().map(|m| m.id), Some(2));

        assert!(selection.close());
        assert!(selection.current().is_none());
    }

    #[test]
    fn test_idempotent_operations() {
        let mut selection = Selection::new();
        assert!(!selection.close());

        assert!(selection.select(Movie::new(1, "Alien")));
        assert!(!selection.select(Movie::new(1, "Alien")));
        assert!(selection.is_open());

        assert!(selection.close());
        assert!(!selection.close());
    }
}
