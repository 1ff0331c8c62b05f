//! Explanation reports: why a movie was recommended for a seed set.
//!
//! The report breaks the match down per seed and per attribute. It only
//! uses attribute overlap (director, tags, cast, genres); the year and
//! rating bonuses that help connect the graph are left out, so
//! `total_score` is not the graph edge weight and must not be compared to
//! it.

use data_loader::{Movie, MovieId};
use serde::{Deserialize, Serialize};
use similarity::{Dimension, SimilarityWeights, WeightedTerm};
use tracing::debug;

/// One attribute's share of a seed's contribution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttributeContribution {
    pub dimension: Dimension,
    /// Raw similarity on this dimension, in [0, 1]
    pub similarity: f32,
    pub weight: f32,
    pub contribution: f32,
}

/// How one seed relates to the target
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedMatch {
    /// Title of the seed movie
    pub connected_with: String,
    pub seed_id: MovieId,
    pub score_contributed: f32,
    /// Human-readable breakdown, e.g. `Same director (X) [+0.30]`
    pub details: String,
    pub contributions: Vec<AttributeContribution>,
}

/// Structured report handed to an external text generator
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExplanationReport {
    pub total_score: f32,
    pub matches: Vec<SeedMatch>,
}

/// Builds explanation reports from the same weights as the graph
#[derive(Debug, Clone, Default)]
pub struct ExplanationReporter {
    weights: SimilarityWeights,
}

impl ExplanationReporter {
    pub fn new(weights: SimilarityWeights) -> Self {
        Self { weights }
    }

    /// Explain `target` against each seed.
    ///
    /// Seeds that share nothing with the target are omitted; the remaining
    /// matches keep the order the seeds were given in.
    pub fn explain(&self, seeds: &[Movie], target: &Movie) -> ExplanationReport {
        let mut report = ExplanationReport::default();

        for seed in seeds {
            let terms: Vec<WeightedTerm> = self
                .weights
                .attribute_terms(seed, target)
                .into_iter()
                .filter(|term| term.contribution() > 0.0)
                .collect();

            let interaction: f32 = terms.iter().map(WeightedTerm::contribution).sum();
            if interaction <= 0.0 {
                debug!("Seed {} shares nothing with {}", seed.id, target.id);
                continue;
            }

            let details = terms
                .iter()
                .map(|term| describe(term, seed))
                .collect::<Vec<_>>()
                .join(", ");

            report.total_score += interaction;
            report.matches.push(SeedMatch {
                connected_with: seed.title.clone(),
                seed_id: seed.id,
                score_contributed: interaction,
                details,
                contributions: terms
                    .iter()
                    .map(|term| AttributeContribution {
                        dimension: term.dimension,
                        similarity: term.similarity,
                        weight: term.weight,
                        contribution: term.contribution(),
                    })
                    .collect(),
            });
        }

        report
    }
}

fn describe(term: &WeightedTerm, seed: &Movie) -> String {
    let contribution = term.contribution();
    match term.dimension {
        Dimension::Director => format!(
            "Same director ({}) [+{:.2}]",
            seed.director.as_deref().unwrap_or_default(),
            contribution
        ),
        Dimension::Tags => format!(
            "Tags Jaccard {:.2} (weight {}) [+{:.2}]",
            term.similarity, term.weight, contribution
        ),
        Dimension::Cast => format!(
            "Cast overlap {:.2} (weight {}) [+{:.2}]",
            term.similarity, term.weight, contribution
        ),
        Dimension::Genres => format!(
            "Genre similarity {:.2} [+{:.2}]",
            term.similarity, contribution
        ),
    }
}
