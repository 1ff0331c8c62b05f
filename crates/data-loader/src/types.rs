//! Core domain types for the movie catalog.
//!
//! The external store hands us flat records where genres, cast and tags are
//! comma-separated strings. Those are parsed exactly once, at this boundary,
//! into `AttributeSet`s so the similarity code never re-splits a string.

use crate::error::DataLoadError;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

// =============================================================================
// Type Aliases
// =============================================================================

/// Unique, stable identifier assigned to a movie by the external store
pub type MovieId = u32;

/// Highest rating the catalog accepts (ratings are on a 0-10 scale)
pub const MAX_RATING: f32 = 10.0;

// =============================================================================
// AttributeSet
// =============================================================================

/// Unordered set of attribute labels (genres, cast members, keyword tags).
///
/// Labels are trimmed and lowercased on the way in and empty labels are
/// dropped, so two sets built from `"Action, Drama"` and `"drama,action "`
/// compare equal. A `BTreeSet` keeps iteration order stable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>")]
pub struct AttributeSet(BTreeSet<String>);

impl AttributeSet {
    /// Create an empty set
    pub fn new() -> Self {
        Self(BTreeSet::new())
    }

    /// Build a set from a comma-separated string such as `"Action, Drama"`
    pub fn from_delimited(raw: &str) -> Self {
        raw.split(',').collect()
    }

    /// Insert a single label, normalizing it first
    pub fn insert(&mut self, label: &str) -> bool {
        let label = normalize_label(label);
        if label.is_empty() {
            return false;
        }
        self.0.insert(label)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Check membership of a label (the probe is normalized too)
    pub fn contains(&self, label: &str) -> bool {
        self.0.contains(&normalize_label(label))
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Number of labels present in both sets
    pub fn intersection_count(&self, other: &AttributeSet) -> usize {
        self.0.intersection(&other.0).count()
    }

    /// Number of distinct labels present in either set
    pub fn union_count(&self, other: &AttributeSet) -> usize {
        self.len() + other.len() - self.intersection_count(other)
    }
}

impl<S: AsRef<str>> FromIterator<S> for AttributeSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = AttributeSet::new();
        for label in iter {
            set.insert(label.as_ref());
        }
        set
    }
}

impl From<Vec<String>> for AttributeSet {
    fn from(labels: Vec<String>) -> Self {
        labels.into_iter().collect()
    }
}

fn normalize_label(label: &str) -> String {
    label.trim().to_lowercase()
}

// =============================================================================
// Movie
// =============================================================================

/// A catalog movie as the engine sees it.
///
/// Unknown values are `None` (or an empty set) instead of sentinels, so the
/// similarity functions can skip them rather than compare garbage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    pub id: MovieId,
    pub title: String,
    pub director: Option<String>,
    pub genres: AttributeSet,
    /// Top-billed cast
    pub cast: AttributeSet,
    /// Keyword tags describing the subject of the movie
    pub tags: AttributeSet,
    pub year: Option<u16>,
    /// Rating on a 0-10 scale
    pub rating: Option<f32>,
    pub poster_path: Option<String>,
}

impl Movie {
    /// Minimal movie with only an id and a title; everything else unknown
    pub fn new(id: MovieId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            director: None,
            genres: AttributeSet::new(),
            cast: AttributeSet::new(),
            tags: AttributeSet::new(),
            year: None,
            rating: None,
            poster_path: None,
        }
    }

    pub fn with_director(mut self, director: &str) -> Self {
        self.director = clean_director(Some(director));
        self
    }

    pub fn with_genres(mut self, genres: &str) -> Self {
        self.genres = AttributeSet::from_delimited(genres);
        self
    }

    pub fn with_cast(mut self, cast: &str) -> Self {
        self.cast = AttributeSet::from_delimited(cast);
        self
    }

    pub fn with_tags(mut self, tags: &str) -> Self {
        self.tags = AttributeSet::from_delimited(tags);
        self
    }

    pub fn with_year(mut self, year: u16) -> Self {
        self.year = (year != 0).then_some(year);
        self
    }

    pub fn with_rating(mut self, rating: f32) -> Self {
        self.rating = (rating >= 0.0).then_some(rating);
        self
    }
}

// =============================================================================
// CatalogRecord - boundary shape
// =============================================================================

/// One row of the external movie table, exactly as the store serves it.
///
/// The store historically named the genre column `gender`; `genre` and
/// `genres` are accepted as well.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogRecord {
    pub id: MovieId,
    pub title: String,
    #[serde(default)]
    pub director: Option<String>,
    #[serde(default, alias = "genre", alias = "genres")]
    pub gender: Option<String>,
    #[serde(default)]
    pub year: Option<i64>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub cast: Option<String>,
    #[serde(default)]
    pub tags: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
}

impl TryFrom<CatalogRecord> for Movie {
    type Error = DataLoadError;

    fn try_from(record: CatalogRecord) -> Result<Self, Self::Error> {
        let title = record.title.trim().to_string();
        if title.is_empty() {
            return Err(DataLoadError::InvalidValue {
                id: record.id,
                field: "title".to_string(),
                value: record.title,
            });
        }

        let year = match record.year {
            None | Some(0) => None,
            Some(y) => Some(u16::try_from(y).map_err(|_| DataLoadError::InvalidValue {
                id: record.id,
                field: "year".to_string(),
                value: y.to_string(),
            })?),
        };

        let rating = match record.rating {
            None => None,
            Some(r) if r.is_nan() || r > MAX_RATING as f64 => {
                return Err(DataLoadError::InvalidValue {
                    id: record.id,
                    field: "rating".to_string(),
                    value: r.to_string(),
                });
            }
            // Negative ratings are the store's "unknown" sentinel
            Some(r) if r < 0.0 => None,
            Some(r) => Some(r as f32),
        };

        let as_set = |raw: &Option<String>| {
            raw.as_deref()
                .map(AttributeSet::from_delimited)
                .unwrap_or_default()
        };

        Ok(Movie {
            id: record.id,
            title,
            director: clean_director(record.director.as_deref()),
            genres: as_set(&record.gender),
            cast: as_set(&record.cast),
            tags: as_set(&record.tags),
            year,
            rating,
            poster_path: clean_optional(record.poster_path.as_deref()),
        })
    }
}

/// Trim a free-text field and treat an empty result as unknown
pub(crate) fn clean_optional(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Placeholders the store writes when it has no director on file
const UNKNOWN_DIRECTOR_PLACEHOLDERS: [&str; 2] = ["desconhecido", "unknown"];

/// Like `clean_optional`, but placeholder names are unknown too, so two
/// movies never match on a missing director
pub(crate) fn clean_director(raw: Option<&str>) -> Option<String> {
    clean_optional(raw).filter(|name| {
        !UNKNOWN_DIRECTOR_PLACEHOLDERS.contains(&name.to_lowercase().as_str())
    })
}

// =============================================================================
// Catalog - in-memory snapshot of the movie table
// =============================================================================

/// In-memory catalog keyed by movie id.
///
/// Every mutation bumps `revision`, which is what graph caches compare
/// against to decide whether a previously built graph is still valid.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    pub(crate) movies: HashMap<MovieId, Movie>,
    pub(crate) revision: u64,
}

impl Catalog {
    /// Creates a new, empty catalog
    pub fn new() -> Self {
        Self {
            movies: HashMap::new(),
            revision: 0,
        }
    }

    /// Get a movie by ID
    pub fn get_movie(&self, id: MovieId) -> Option<&Movie> {
        self.movies.get(&id)
    }

    pub fn contains(&self, id: MovieId) -> bool {
        self.movies.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }

    /// Current revision; changes whenever the catalog is mutated
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// All movie ids, ascending
    pub fn all_movie_ids(&self) -> Vec<MovieId> {
        let mut ids: Vec<MovieId> = self.movies.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    /// Consistent copy of every movie, ordered by id.
    ///
    /// This is the "one full-table read" a graph build starts from.
    pub fn snapshot(&self) -> Vec<Movie> {
        let mut movies: Vec<Movie> = self.movies.values().cloned().collect();
        movies.sort_unstable_by_key(|m| m.id);
        movies
    }

    /// Insert or replace a movie, returning the previous version if any
    pub fn insert_movie(&mut self, movie: Movie) -> Option<Movie> {
        self.revision += 1;
        self.movies.insert(movie.id, movie)
    }

    /// Remove a movie; the revision only changes if something was removed
    pub fn remove_movie(&mut self, id: MovieId) -> Option<Movie> {
        let removed = self.movies.remove(&id);
        if removed.is_some() {
            self.revision += 1;
        }
        removed
    }
}
