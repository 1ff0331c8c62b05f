//! Scoring models that combine the attribute functions into one number.
//!
//! `SimilarityWeights` drives the canonical similarity graph and the
//! explanation reporter; `DistanceWeights` drives the distance graph used by
//! shortest-path ranking.

use crate::attributes::{
    bounded_difference, equality_score, optional_bounded_difference, proximity_bonus, set_overlap,
};
use data_loader::Movie;
use serde::{Deserialize, Serialize};

/// Attribute dimensions an explanation can attribute overlap to.
///
/// Year and rating only enter the graph as flat proximity bonuses and are
/// never reported per dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    Director,
    Tags,
    Cast,
    Genres,
}

/// Weights of the additive similarity score.
///
/// The defaults intentionally add up to more than 1: the year and rating
/// bonuses are flat boosts on top of the attribute overlap.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimilarityWeights {
    pub director: f32,
    pub tags: f32,
    pub genres: f32,
    pub cast: f32,
    /// Flat bonus when release years are within `year_window`
    pub year_bonus: f32,
    pub year_window: f32,
    /// Flat bonus when ratings are within `rating_window`
    pub rating_bonus: f32,
    pub rating_window: f32,
}

impl Default for SimilarityWeights {
    fn default() -> Self {
        Self {
            director: 0.3,
            tags: 0.4,
            genres: 0.2,
            cast: 0.2,
            year_bonus: 0.05,
            year_window: 5.0,
            rating_bonus: 0.05,
            rating_window: 1.0,
        }
    }
}

/// One weighted term of an attribute score
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightedTerm {
    pub dimension: Dimension,
    /// Raw similarity for the dimension, in [0, 1]
    pub similarity: f32,
    pub weight: f32,
}

impl WeightedTerm {
    pub fn contribution(&self) -> f32 {
        self.similarity * self.weight
    }
}

impl SimilarityWeights {
    /// Attribute-overlap terms only (director, tags, cast, genres), in that
    /// order. Year and rating bonuses are not part of this breakdown.
    pub fn attribute_terms(&self, a: &Movie, b: &Movie) -> [WeightedTerm; 4] {
        [
            WeightedTerm {
                dimension: Dimension::Director,
                similarity: equality_score(a.director.as_deref(), b.director.as_deref()),
                weight: self.director,
            },
            WeightedTerm {
                dimension: Dimension::Tags,
                similarity: set_overlap(&a.tags, &b.tags),
                weight: self.tags,
            },
            WeightedTerm {
                dimension: Dimension::Cast,
                similarity: set_overlap(&a.cast, &b.cast),
                weight: self.cast,
            },
            WeightedTerm {
                dimension: Dimension::Genres,
                similarity: set_overlap(&a.genres, &b.genres),
                weight: self.genres,
            },
        ]
    }

    /// Sum of the flat year and rating proximity bonuses
    pub fn proximity_bonuses(&self, a: &Movie, b: &Movie) -> f32 {
        let year = proximity_bonus(
            a.year.map(f32::from),
            b.year.map(f32::from),
            self.year_window,
            self.year_bonus,
        );
        let rating = proximity_bonus(a.rating, b.rating, self.rating_window, self.rating_bonus);
        year + rating
    }

    /// Full pair score used as a similarity graph edge weight
    pub fn score(&self, a: &Movie, b: &Movie) -> f32 {
        let overlap: f32 = self
            .attribute_terms(a, b)
            .iter()
            .map(WeightedTerm::contribution)
            .sum();
        overlap + self.proximity_bonuses(a, b)
    }
}

/// Weights of the normalized similarity that the distance graph inverts.
///
/// These sum to 1, so `1 - similarity` is a distance in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DistanceWeights {
    pub genres: f32,
    pub director: f32,
    pub cast: f32,
    pub year: f32,
    /// Year difference at which year similarity drops to 0
    pub year_max_diff: f32,
    pub rating: f32,
    /// Rating difference at which rating similarity drops to 0
    pub rating_max_diff: f32,
}

impl Default for DistanceWeights {
    fn default() -> Self {
        Self {
            genres: 0.4,
            director: 0.2,
            cast: 0.2,
            year: 0.1,
            year_max_diff: 30.0,
            rating: 0.1,
            rating_max_diff: 10.0,
        }
    }
}

impl DistanceWeights {
    /// Normalized similarity of two movies
    pub fn similarity(&self, a: &Movie, b: &Movie) -> f32 {
        let genres = set_overlap(&a.genres, &b.genres);
        let director = equality_score(a.director.as_deref(), b.director.as_deref());
        let cast = set_overlap(&a.cast, &b.cast);
        let year = optional_bounded_difference(
            a.year.map(f32::from),
            b.year.map(f32::from),
            self.year_max_diff,
        );
        let rating = match (a.rating, b.rating) {
            (Some(x), Some(y)) => bounded_difference(x, y, self.rating_max_diff),
            _ => 0.0,
        };

        self.genres * genres
            + self.director * director
            + self.cast * cast
            + self.year * year
            + self.rating * rating
    }

    /// Distance between two movies: `1 - similarity`, floored at 0 and
    /// rounded to 4 decimals so near-identical float noise doesn't reorder
    /// paths.
    pub fn distance(&self, a: &Movie, b: &Movie) -> f32 {
        let distance = (1.0 - self.similarity(a, b)).max(0.0);
        (distance * 10_000.0).round() / 10_000.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-5
    }

    #[test]
    fn test_director_and_genre_score() {
        let a = Movie::new(1, "A").with_director("X").with_genres("Action,Drama");
        let b = Movie::new(2, "B").with_director("X").with_genres("Action");
        let weights = SimilarityWeights::default();
        assert!(approx(weights.score(&a, &b), 0.4));
    }

    #[test]
    fn test_bonuses_are_flat() {
        let a = Movie::new(1, "A").with_year(1986).with_rating(6.9);
        let b = Movie::new(2, "B").with_year(1990).with_rating(7.5);
        let weights = SimilarityWeights::default();
        assert!(approx(weights.proximity_bonuses(&a, &b), 0.1));
        assert!(approx(weights.score(&a, &b), 0.1));
    }

    #[test]
    fn test_unknown_year_gets_no_bonus() {
        let a = Movie::new(1, "A");
        let b = Movie::new(2, "B").with_year(1990);
        assert_eq!(SimilarityWeights::default().proximity_bonuses(&a, &b), 0.0);
    }

    #[test]
    fn test_distance_of_identical_movies_is_zero() {
        let a = Movie::new(1, "A")
            .with_director("X")
            .with_genres("Action")
            .with_cast("Tom Cruise")
            .with_year(1986)
            .with_rating(7.0);
        let b = Movie { id: 2, ..a.clone() };
        assert_eq!(DistanceWeights::default().distance(&a, &b), 0.0);
    }

    #[test]
    fn test_distance_of_unrelated_movies_is_one() {
        let a = Movie::new(1, "A").with_genres("Action");
        let b = Movie::new(2, "B").with_genres("Comedy");
        assert_eq!(DistanceWeights::default().distance(&a, &b), 1.0);
    }
}
