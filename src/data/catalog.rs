//! Item catalog: id to title lookup and title search.

use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{Result, RulesError};
use crate::mining::ItemId;

/// One row of `movies.csv`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Movie {
    #[serde(rename = "movieId")]
    pub id: ItemId,
    pub title: String,
    #[serde(default)]
    pub genres: String,
}

impl Movie {
    #[must_use]
    pub fn new(id: ItemId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            genres: String::new(),
        }
    }
}

/// Items in file order with an id index.
///
/// Only used to show names; mining and ranking work on ids alone.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    movies: Vec<Movie>,
    index: HashMap<ItemId, usize>,
}

impl Catalog {
    /// Build a catalog; a repeated id keeps its first row.
    #[must_use]
    pub fn from_movies(movies: Vec<Movie>) -> Self {
        let mut catalog = Self::default();
        for movie in movies {
            if catalog.index.contains_key(&movie.id) {
                warn!(id = movie.id, title = %movie.title, "duplicate catalog id ignored");
                continue;
            }
            catalog.index.insert(movie.id, catalog.movies.len());
            catalog.movies.push(movie);
        }
        catalog
    }

    /// Read a `movies.csv` file.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the file cannot be opened and a parse error
    /// for a malformed row.
    pub fn read(path: &Path) -> Result<Self> {
        let reader = csv::Reader::from_path(path).map_err(|e| RulesError::from_csv(path, e))?;
        Self::collect(reader, path)
    }

    /// Read catalog CSV content from any reader; `source` labels errors.
    ///
    /// # Errors
    ///
    /// See [`Catalog::read`].
    pub fn read_from<R: Read>(reader: R, source: &Path) -> Result<Self> {
        Self::collect(csv::Reader::from_reader(reader), source)
    }

    fn collect<R: Read>(mut reader: csv::Reader<R>, source: &Path) -> Result<Self> {
        let movies = reader
            .deserialize()
            .collect::<std::result::Result<Vec<Movie>, _>>()
            .map_err(|e| RulesError::from_csv(source, e))?;
        let catalog = Self::from_movies(movies);
        debug!(source = %source.display(), items = catalog.len(), "catalog loaded");
        Ok(catalog)
    }

    #[must_use]
    pub fn get(&self, id: ItemId) -> Option<&Movie> {
        self.index.get(&id).map(|&pos| &self.movies[pos])
    }

    /// Display name of `id`.
    #[must_use]
    pub fn title(&self, id: ItemId) -> Option<&str> {
        self.get(id).map(|movie| movie.title.as_str())
    }

    #[must_use]
    pub fn contains(&self, id: ItemId) -> bool {
        self.index.contains_key(&id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.movies.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Movie> {
        self.movies.iter()
    }

    /// Titles containing `query`, ignoring case, in catalog order.
    ///
    /// The query is matched literally; at most `limit` movies are returned.
    /// A blank query matches nothing.
    ///
    /// # Examples
    ///
    /// ```
    /// use assocrec::data::{Catalog, Movie};
    ///
    /// let catalog = Catalog::from_movies(vec![
    ///     Movie::new(1, "Toy Story (1995)"),
    ///     Movie::new(2, "Jumanji (1995)"),
    ///     Movie::new(3, "Toy Story 2 (1999)"),
    /// ]);
    /// let hits = catalog.search("toy story", 5);
    /// assert_eq!(hits.len(), 2);
    /// assert_eq!(hits[1].id, 3);
    /// ```
    #[must_use]
    pub fn search(&self, query: &str, limit: usize) -> Vec<&Movie> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }
        self.movies
            .iter()
            .filter(|movie| movie.title.to_lowercase().contains(&needle))
            .take(limit)
            .collect()
    }
}
