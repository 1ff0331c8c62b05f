//! Parsers for catalog exports.
//!
//! Two formats are understood:
//! - `.json`: an array of `CatalogRecord` objects as served by the store
//! - `.dat`: one movie per line, `id::title::director::genres::year::rating::cast::tags`
//!   where `cast` and `tags` are optional trailing fields and list fields
//!   are comma-separated
//!
//! Both paths funnel through `Movie::try_from(CatalogRecord)` so list
//! splitting and sentinel handling live in exactly one place.

use crate::error::{DataLoadError, Result};
use crate::types::*;
use rayon::prelude::*;
use std::fs;
use std::path::Path;

/// Read a whole file, mapping a missing file to `FileNotFound`
fn read_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => DataLoadError::FileNotFound {
            path: path.display().to_string(),
        },
        _ => DataLoadError::IoError(e),
    })
}

/// Parse a JSON catalog file
pub fn parse_catalog_json(path: &Path) -> Result<Vec<Movie>> {
    let content = read_file(path)?;
    parse_records_json(&content)
}

/// Parse a JSON array of catalog records held in memory
pub fn parse_records_json(content: &str) -> Result<Vec<Movie>> {
    let records: Vec<CatalogRecord> = serde_json::from_str(content)?;
    records_to_movies(records)
}

/// Convert raw records to movies in parallel
pub fn records_to_movies(records: Vec<CatalogRecord>) -> Result<Vec<Movie>> {
    records.into_par_iter().map(Movie::try_from).collect()
}

/// Parse a `::`-delimited catalog file
pub fn parse_movies_dat(path: &Path) -> Result<Vec<Movie>> {
    let content = read_file(path)?;
    let file = path
        .file_name()
        .map(|f| f.to_string_lossy().to_string())
        .unwrap_or_else(|| "movies.dat".to_string());
    parse_dat_lines(&file, &content)
}

/// Parse `::`-delimited catalog lines; `file` is only used in error messages
pub fn parse_dat_lines(file: &str, content: &str) -> Result<Vec<Movie>> {
    let mut movies = Vec::new();

    for (idx, line) in content.lines().enumerate() {
        let line_no = idx + 1;
        let line_trimmed = line.trim();
        if line_trimmed.is_empty() || line_trimmed.starts_with('#') {
            continue;
        }

        let parts: Vec<&str> = line_trimmed.split("::").collect();
        if parts.len() < 6 {
            return Err(DataLoadError::ParseError {
                file: file.to_string(),
                line: line_no,
                reason: format!("Expected at least 6 fields but found {}", parts.len()),
            });
        }

        let parse_err = |reason: String| DataLoadError::ParseError {
            file: file.to_string(),
            line: line_no,
            reason,
        };

        let id: MovieId = parts[0]
            .trim()
            .parse()
            .map_err(|e| parse_err(format!("Invalid movieId: {}", e)))?;

        let year = match parts[4].trim() {
            "" => None,
            raw => Some(
                raw.parse::<i64>()
                    .map_err(|e| parse_err(format!("Invalid year: {}", e)))?,
            ),
        };

        let rating = match parts[5].trim() {
            "" => None,
            raw => Some(
                raw.parse::<f64>()
                    .map_err(|e| parse_err(format!("Invalid rating: {}", e)))?,
            ),
        };

        let record = CatalogRecord {
            id,
            title: parts[1].to_string(),
            director: Some(parts[2].to_string()),
            gender: Some(parts[3].to_string()),
            year,
            rating,
            cast: parts.get(6).map(|s| s.to_string()),
            tags: parts.get(7).map(|s| s.to_string()),
            poster_path: None,
        };

        movies.push(Movie::try_from(record)?);
    }

    Ok(movies)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_json_records() {
        let json = r#"[
            {"id": 1, "title": "Top Gun", "director": "Tony Scott",
             "gender": "Action, Drama", "year": 1986, "rating": 6.9,
             "cast": "Tom Cruise, Kelly McGillis", "tags": "war, aviation"},
            {"id": 2, "title": "Unknowns", "director": "", "genre": "Comedy",
             "year": 0, "rating": -1}
        ]"#;

        let movies = parse_records_json(json).unwrap();
        assert_eq!(movies.len(), 2);

        let top_gun = &movies[0];
        assert_eq!(top_gun.director.as_deref(), Some("Tony Scott"));
        assert!(top_gun.genres.contains("action"));
        assert!(top_gun.genres.contains("drama"));
        assert!(top_gun.tags.contains("aviation"));
        assert_eq!(top_gun.year, Some(1986));

        let unknowns = &movies[1];
        assert_eq!(unknowns.director, None);
        assert!(unknowns.genres.contains("comedy"));
        assert_eq!(unknowns.year, None);
        assert_eq!(unknowns.rating, None);
        assert!(unknowns.cast.is_empty());
    }

    #[test]
    fn test_parse_json_rejects_out_of_range_rating() {
        let json = r#"[{"id": 7, "title": "Too Good", "rating": 11.5}]"#;
        let err = parse_records_json(json).unwrap_err();
        assert!(matches!(err, DataLoadError::InvalidValue { id: 7, .. }));
    }

    #[test]
    fn test_record_without_id_rejected() {
        let json = r#"[{"title": "No Id", "director": "X"}]"#;
        let err = parse_records_json(json).unwrap_err();
        assert!(matches!(err, DataLoadError::JsonError(_)));
    }

    #[test]
    fn test_record_without_title_rejected() {
        let json = r#"[{"id": 3, "director": "X"}]"#;
        let err = parse_records_json(json).unwrap_err();
        assert!(matches!(err, DataLoadError::JsonError(_)));
    }

    #[test]
    fn test_parse_dat_lines() {
        let content = "\
# id::title::director::genres::year::rating::cast::tags
1::Top Gun::Tony Scott::Action,Drama::1986::6.9::Tom Cruise::war,aviation

2::Airplane!::Jim Abrahams::Comedy::1980::7.7
";
        let movies = parse_dat_lines("movies.dat", content).unwrap();
        assert_eq!(movies.len(), 2);
        assert_eq!(movies[0].tags.len(), 2);
        assert!(movies[1].cast.is_empty());
        assert_eq!(movies[1].rating, Some(7.7));
    }

    #[test]
    fn test_parse_dat_reports_line_number() {
        let content = "1::Ok::Dir::Drama::2000::5.0\n2::Broken::Dir\n";
        match parse_dat_lines("movies.dat", content) {
            Err(DataLoadError::ParseError { line, .. }) => assert_eq!(line, 2),
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_file() {
        let err = parse_catalog_json(Path::new("does/not/exist.json")).unwrap_err();
        assert!(matches!(err, DataLoadError::FileNotFound { .. }));
    }
}
