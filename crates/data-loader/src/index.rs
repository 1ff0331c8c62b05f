//! Catalog building, lookup and validation.
//!
//! This module turns parsed movies into a `Catalog`:
//! - Load from a JSON or `.dat` export
//! - Reject duplicate ids
//! - Validate the attribute ranges the similarity code relies on
//! - Title search for the command line front end

use crate::error::{DataLoadError, Result};
use crate::parser;
use crate::types::*;
use std::path::Path;
use tracing::{debug, info};

impl Catalog {
    /// Load a catalog export from disk.
    ///
    /// The format is picked by extension: `.json` or `.dat`.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        info!("Loading catalog from {:?}", path);

        let movies = match path.extension().and_then(|e| e.to_str()) {
            Some("json") => parser::parse_catalog_json(path)?,
            Some("dat") => parser::parse_movies_dat(path)?,
            _ => {
                return Err(DataLoadError::UnsupportedFormat {
                    path: path.display().to_string(),
                });
            }
        };

        let catalog = Self::from_movies(movies)?;
        catalog.validate()?;

        info!("Catalog loaded: {} movies", catalog.len());
        Ok(catalog)
    }

    /// Build a catalog from already parsed movies, rejecting duplicate ids
    pub fn from_movies(movies: Vec<Movie>) -> Result<Self> {
        let mut catalog = Catalog::new();
        for movie in movies {
            let id = movie.id;
            if catalog.insert_movie(movie).is_some() {
                return Err(DataLoadError::DuplicateMovie { id });
            }
        }
        Ok(catalog)
    }

    /// Validate data integrity
    ///
    /// Check that:
    /// - Every movie has a non-empty title
    /// - Ratings are finite and within 0-10
    pub fn validate(&self) -> Result<()> {
        for movie in self.movies.values() {
            if movie.title.trim().is_empty() {
                return Err(DataLoadError::ValidationError(format!(
                    "movie {} has an empty title",
                    movie.id
                )));
            }
            if let Some(rating) = movie.rating {
                if !rating.is_finite() || !(0.0..=MAX_RATING).contains(&rating) {
                    return Err(DataLoadError::InvalidValue {
                        id: movie.id,
                        field: "rating".to_string(),
                        value: rating.to_string(),
                    });
                }
            }
        }
        debug!("Validated {} movies", self.movies.len());
        Ok(())
    }

    /// Case-insensitive title search.
    ///
    /// Exact matches come first, then substring matches; within each group
    /// higher-rated movies come first and ids break the remaining ties.
    pub fn search_by_title(&self, query: &str) -> Vec<&Movie> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return Vec::new();
        }

        let mut matches: Vec<(u8, &Movie)> = self
            .movies
            .values()
            .filter_map(|movie| {
                let title = movie.title.to_lowercase();
                if title == query {
                    Some((0, movie))
                } else if title.contains(&query) {
                    Some((1, movie))
                } else {
                    None
                }
            })
            .collect();

        matches.sort_by(|a, b| {
            a.0.cmp(&b.0)
                .then_with(|| {
                    let ra = a.1.rating.unwrap_or(-1.0);
                    let rb = b.1.rating.unwrap_or(-1.0);
                    rb.partial_cmp(&ra).unwrap_or(std::cmp::Ordering::Equal)
                })
                .then_with(|| a.1.id.cmp(&b.1.id))
        });

        matches.into_iter().map(|(_, movie)| movie).collect()
    }
}
