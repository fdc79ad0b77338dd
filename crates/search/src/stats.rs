//! Summary statistics over a scored result list.

use crate::config::ScoringThresholds;
use crate::recipe::{MatchType, ScoredRecipe};
use crate::scoring::{default_matcher, RecipeMatcher};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Aggregate view of one search.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchStats {
    /// Number of results
    pub total: usize,
    /// Mean score, 0 for an empty list
    pub average_score: f64,
    /// Result count per match type
    pub match_types: BTreeMap<MatchType, usize>,
    /// Any result reached the exact threshold
    pub has_exact_match: bool,
    /// Any result reached the partial threshold
    pub has_partial_match: bool,
}

impl SearchStats {
    /// Aggregate `scored` using the given grouping thresholds.
    pub fn from_scored(scored: &[ScoredRecipe], thresholds: &ScoringThresholds) -> Self {
        let mut match_types = BTreeMap::new();
        let mut sum: u64 = 0;

        for recipe in scored {
            *match_types.entry(recipe.match_type).or_insert(0) += 1;
            sum += u64::from(recipe.match_score);
        }

        let average_score = if scored.is_empty() {
            0.0
        } else {
            sum as f64 / scored.len() as f64
        };

        Self {
            total: scored.len(),
            average_score,
            match_types,
            has_exact_match: scored.iter().any(|r| r.match_score >= thresholds.exact_group),
            has_partial_match: scored.iter().any(|r| r.match_score >= thresholds.partial_group),
        }
    }

    /// Count for one match type.
    pub fn count(&self, match_type: MatchType) -> usize {
        self.match_types.get(&match_type).copied().unwrap_or(0)
    }
}

impl RecipeMatcher {
    /// Summarise scored results under this matcher's thresholds.
    pub fn stats(&self, scored: &[ScoredRecipe]) -> SearchStats {
        SearchStats::from_scored(scored, &self.config.thresholds)
    }
}

/// Summarise scored results with the default thresholds.
pub fn get_search_stats(scored: &[ScoredRecipe]) -> SearchStats {
    default_matcher().stats(scored)
}
