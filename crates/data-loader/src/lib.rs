//! # Data Loader Crate
//!
//! This crate loads the movie catalog the recommendation engine works on.
//!
//! ## Main Components
//!
//! - **types**: Core domain types (Movie, AttributeSet, CatalogRecord, Catalog)
//! - **parser**: Parse JSON and `::`-delimited catalog exports
//! - **index**: Build, validate and search the in-memory catalog
//! - **error**: Error types for data loading
//!
//! ## Example Usage
//!
//! ```ignore
//! use data_loader::Catalog;
//! use std::path::Path;
//!
//! let catalog = Catalog::load_from_file(Path::new("data/movies.json"))?;
//! let movie = catalog.get_movie(1).unwrap();
//! println!("{} has {} tags", movie.title, movie.tags.len());
//! ```

pub mod error;
pub mod types;
pub mod parser;
pub mod index;

pub use error::{DataLoadError, Result};
pub use types::{AttributeSet, Catalog, CatalogRecord, Movie, MovieId, MAX_RATING};
